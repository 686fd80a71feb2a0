//! Save/publish boundary
//!
//! The session hands a [`SavePayload`] to a [`PageSink`]. Sinks decide where
//! pages go (network, disk, memory); the editor only needs to know whether
//! the page was accepted.

use pagecraft_catalog::WidgetInstance;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Snapshot of a page handed to a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub widgets: Vec<WidgetInstance>,

    /// Template the page was seeded from
    pub template: Option<String>,

    /// Rendered HTML, when the editor is configured to include it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for saved and published pages
pub trait PageSink {
    fn save(&mut self, payload: &SavePayload) -> Result<(), SinkError>;

    fn publish(&mut self, payload: &SavePayload) -> Result<(), SinkError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Draft,
    Published,
}

/// Page as written by [`JsonFileSink`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPage {
    pub status: PageStatus,
    pub page: SavePayload,
}

/// Writes each save or publish to a JSON file, replacing the previous one
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn write(&self, status: PageStatus, payload: &SavePayload) -> Result<(), SinkError> {
        let stored = StoredPage {
            status,
            page: payload.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        std::fs::write(&self.path, json)?;

        debug!(path = %self.path.display(), ?status, "Wrote page");
        Ok(())
    }

    /// Read back a page written by this sink
    pub fn load(&self) -> Result<StoredPage, SinkError> {
        let source = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&source)?)
    }
}

impl PageSink for JsonFileSink {
    fn save(&mut self, payload: &SavePayload) -> Result<(), SinkError> {
        self.write(PageStatus::Draft, payload)
    }

    fn publish(&mut self, payload: &SavePayload) -> Result<(), SinkError> {
        self.write(PageStatus::Published, payload)
    }
}
