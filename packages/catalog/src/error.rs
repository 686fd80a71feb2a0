//! Error types for the catalog

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid section '{section}' in template '{template}'")]
    InvalidSection { template: String, section: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
