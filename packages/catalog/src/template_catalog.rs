//! # Template Catalog
//!
//! Built-in templates are embedded as JSON at compile time and parsed on
//! demand. Callers may also supply their own catalog JSON.

use crate::{CatalogError, Template, TemplateCategory};
use tracing::debug;

const BUILTIN_TEMPLATES: &str = include_str!("../data/templates.json");

#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Parse the templates shipped with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_TEMPLATES)
    }

    /// Parse a JSON array of templates
    pub fn from_json(source: &str) -> Result<Self, CatalogError> {
        let templates: Vec<Template> = serde_json::from_str(source)?;
        debug!(templates = templates.len(), "Loaded template catalog");
        Ok(Self { templates })
    }

    pub fn from_templates(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn get(&self, id: &str) -> Result<&Template, CatalogError> {
        self.templates
            .iter()
            .find(|template| template.id == id)
            .ok_or_else(|| CatalogError::UnknownTemplate(id.to_string()))
    }

    /// Case-insensitive lookup by display name
    pub fn find_by_name(&self, name: &str) -> Option<&Template> {
        self.templates
            .iter()
            .find(|template| template.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn by_category(&self, category: TemplateCategory) -> impl Iterator<Item = &Template> {
        self.templates
            .iter()
            .filter(move |template| template.category == category)
    }

    pub fn premium(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter().filter(|template| template.is_premium)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
