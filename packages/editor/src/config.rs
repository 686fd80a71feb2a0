use crate::SeedPolicy;
use pagecraft_compiler_html::CompileOptions;
use serde::{Deserialize, Serialize};

/// Editor settings (the editor part of `pagecraft.config.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Section priority for template seeding
    pub seed_order: SeedPolicy,

    /// Maximum undo levels (0 = unlimited)
    pub undo_levels: usize,

    /// Attach rendered HTML to save payloads
    pub include_markup: bool,

    pub markup: CompileOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            seed_order: SeedPolicy::default(),
            undo_levels: 100,
            include_markup: true,
            markup: CompileOptions::default(),
        }
    }
}
