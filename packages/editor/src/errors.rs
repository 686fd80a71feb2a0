//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] pagecraft_catalog::CatalogError),

    #[error("Markup error: {0}")]
    Markup(#[from] pagecraft_compiler_html::CompileError),

    /// The referenced widget is gone; selection has been cleared
    #[error("Widget no longer exists: {0}")]
    StaleSelection(String),

    #[error("Save failed: {0}")]
    SaveFailed(#[source] crate::persistence::SinkError),

    #[error("Publish failed: {0}")]
    PublishFailed(#[source] crate::persistence::SinkError),
}
