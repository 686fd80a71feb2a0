//! Leave-page guard
//!
//! Leaving a page with unsaved changes asks the caller for a blocking yes/no
//! decision. Closures work as prompts, which keeps tests simple.

/// Blocking yes/no decision supplied by the host
pub trait ConfirmPrompt {
    /// Returns `true` to leave
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Stay,
}

pub const UNSAVED_CHANGES_MESSAGE: &str = "You have unsaved changes. Are you sure you want to leave?";

/// Decide whether to leave, prompting only when `dirty`
pub fn guard_navigation(dirty: bool, prompt: &mut dyn ConfirmPrompt) -> NavigationDecision {
    if !dirty || prompt.confirm(UNSAVED_CHANGES_MESSAGE) {
        NavigationDecision::Proceed
    } else {
        NavigationDecision::Stay
    }
}
