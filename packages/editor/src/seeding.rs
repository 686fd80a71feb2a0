//! # Template Seeding
//!
//! Builds the initial widget list of a page from a template's `components`.
//!
//! Sections are visited in a priority order. Each section present on the
//! template becomes one widget with the stable id `${section}-1`, whose data
//! is the catalog defaults overlaid with the section content. Sections absent
//! from the template, and sections outside the order, produce nothing.
//!
//! ```text
//! components { hero, about, posts }   order [hero, features, ..., posts]
//!                 ↓
//! [ hero-1 (0), posts-1 (1) ]
//! ```

use crate::EditorError;
use pagecraft_catalog::{default_data, Template, WidgetInstance};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const DEFAULT_SEED_ORDER: [&str; 7] = [
    "hero",
    "features",
    "portfolio",
    "menu",
    "products",
    "services",
    "posts",
];

/// Section priority used when seeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedPolicy {
    order: Vec<String>,
}

impl SeedPolicy {
    pub fn new<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: order.into_iter().map(Into::into).collect(),
        }
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_ORDER)
    }
}

/// Build the initial widgets for `template`
///
/// Deterministic: the same template and policy always yield the same list.
pub fn initialize_template(template: &Template, policy: &SeedPolicy) -> Result<Vec<WidgetInstance>, EditorError> {
    let mut widgets = Vec::new();

    for section in policy.order() {
        if widgets.iter().any(|widget: &WidgetInstance| widget.widget_type == *section) {
            continue;
        }

        let Some(content) = template.section_data(section)? else {
            continue;
        };

        let Some(mut data) = default_data(section) else {
            warn!(template = %template.id, section = %section, "No widget type for section, skipping");
            continue;
        };

        for (key, value) in content {
            data.insert(key, value);
        }

        let mut widget = WidgetInstance::new(format!("{}-1", section), section.clone(), data);
        widget.position = widgets.len();
        widgets.push(widget);
    }

    info!(template = %template.id, widgets = widgets.len(), "Seeded page from template");

    Ok(widgets)
}
