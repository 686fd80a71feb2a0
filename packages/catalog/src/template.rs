use crate::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Blog,
    Restaurant,
    Fitness,
    Saas,
    Portfolio,
    Ecommerce,
    Agency,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 7] = [
        TemplateCategory::Blog,
        TemplateCategory::Restaurant,
        TemplateCategory::Fitness,
        TemplateCategory::Saas,
        TemplateCategory::Portfolio,
        TemplateCategory::Ecommerce,
        TemplateCategory::Agency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Blog => "blog",
            TemplateCategory::Restaurant => "restaurant",
            TemplateCategory::Fitness => "fitness",
            TemplateCategory::Saas => "saas",
            TemplateCategory::Portfolio => "portfolio",
            TemplateCategory::Ecommerce => "ecommerce",
            TemplateCategory::Agency => "agency",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Pre-authored website template
///
/// `components` holds the optional top-level sections (hero, about, posts,
/// menu, ...). Each section is either an object of fields or a list of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: TemplateCategory,
    pub description: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub is_premium: bool,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default, alias = "fullContent")]
    pub components: Map<String, Value>,
}

impl Template {
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.components.get(name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Section content as widget data
    ///
    /// Object sections are used as-is; list sections are wrapped as
    /// `{ "items": [...] }`. Scalars are rejected.
    pub fn section_data(&self, name: &str) -> Result<Option<Map<String, Value>>, CatalogError> {
        match self.components.get(name) {
            None => Ok(None),
            Some(Value::Object(fields)) => Ok(Some(fields.clone())),
            Some(Value::Array(items)) => {
                let mut fields = Map::new();
                fields.insert("items".to_string(), Value::Array(items.clone()));
                Ok(Some(fields))
            }
            Some(_) => Err(CatalogError::InvalidSection {
                template: self.id.clone(),
                section: name.to_string(),
            }),
        }
    }

    pub fn is_free(&self) -> bool {
        !self.is_premium
    }
}
