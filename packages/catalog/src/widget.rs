use crate::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Free-form widget payload. Its shape is determined by the widget type.
pub type WidgetData = Map<String, Value>;

/// Palette grouping for widget types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetCategory {
    Layout,
    Content,
    Media,
    Interactive,
    Forms,
    Business,
    Social,
}

impl WidgetCategory {
    pub const ALL: [WidgetCategory; 7] = [
        WidgetCategory::Layout,
        WidgetCategory::Content,
        WidgetCategory::Media,
        WidgetCategory::Interactive,
        WidgetCategory::Forms,
        WidgetCategory::Business,
        WidgetCategory::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetCategory::Layout => "layout",
            WidgetCategory::Content => "content",
            WidgetCategory::Media => "media",
            WidgetCategory::Interactive => "interactive",
            WidgetCategory::Forms => "forms",
            WidgetCategory::Business => "business",
            WidgetCategory::Social => "social",
        }
    }
}

impl fmt::Display for WidgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Catalog entry describing a kind of widget (immutable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetType {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: WidgetCategory,
    pub description: &'static str,
}

/// A widget placed on a page
///
/// `position` mirrors the widget's index in the owning tree. The tree
/// renumbers it after every structural change; it is never authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetInstance {
    pub id: String,

    #[serde(rename = "type")]
    pub widget_type: String,

    #[serde(default)]
    pub data: WidgetData,

    #[serde(default)]
    pub position: usize,
}

impl WidgetInstance {
    pub fn new(id: impl Into<String>, widget_type: impl Into<String>, data: WidgetData) -> Self {
        Self {
            id: id.into(),
            widget_type: widget_type.into(),
            data,
            position: 0,
        }
    }

    /// Look up a single data field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Look up a string data field
    pub fn text_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}
