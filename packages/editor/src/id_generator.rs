//! Widget id generation: `${type}-${millis}`
//!
//! Timestamps come from an injectable clock and are forced strictly
//! increasing, so two widgets created in the same millisecond still get
//! distinct ids.

use chrono::Utc;

/// Millisecond clock
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug, Clone)]
pub struct WidgetIdGenerator {
    clock: Clock,
    last: i64,
}

impl WidgetIdGenerator {
    pub fn new() -> Self {
        Self::with_clock(system_clock)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self { clock, last: i64::MIN }
    }

    /// Next id for `widget_type` that `is_taken` does not reject
    pub fn next_id(&mut self, widget_type: &str, is_taken: impl Fn(&str) -> bool) -> String {
        let mut stamp = (self.clock)().max(self.last.saturating_add(1));
        loop {
            let id = format!("{}-{}", widget_type, stamp);
            if !is_taken(&id) {
                self.last = stamp;
                return id;
            }
            stamp += 1;
        }
    }
}

impl Default for WidgetIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
