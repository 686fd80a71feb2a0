//! Render surface capability
//!
//! The live page the bridge edits. Handles can go stale when a region is
//! re-rendered, so every call takes the handle and may answer `Detached`.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Handle to an element on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(pub u64);

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Surface is not ready")]
    NotReady,

    #[error("Element {0} is no longer attached")]
    Detached(ElementRef),

    #[error("Unsupported style property: {0}")]
    UnsupportedProperty(String),
}

/// Snapshot of an element's metadata
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementInfo {
    pub tag_name: String,
    pub text_content: String,
    pub class_name: String,
    pub id: String,
    /// Inline style declarations
    pub style: BTreeMap<String, String>,
}

pub trait RenderSurface {
    fn is_ready(&self) -> bool;

    fn inspect(&self, element: ElementRef) -> Result<ElementInfo, SurfaceError>;

    /// Resolved value of a CSS property (inline value, else the default)
    fn computed_style(&self, element: ElementRef, property: &str) -> Result<String, SurfaceError>;

    fn set_style(&mut self, element: ElementRef, property: &str, value: &str) -> Result<(), SurfaceError>;

    fn text(&self, element: ElementRef) -> Result<String, SurfaceError>;

    fn set_text(&mut self, element: ElementRef, text: &str) -> Result<(), SurfaceError>;

    fn attribute(&self, element: ElementRef, name: &str) -> Result<Option<String>, SurfaceError>;

    fn set_attribute(&mut self, element: ElementRef, name: &str, value: &str) -> Result<(), SurfaceError>;

    /// Region the element was rendered into
    fn region_of(&self, element: ElementRef) -> Result<Option<String>, SurfaceError>;

    /// Replace a region's content, detaching every element it held
    fn render_region(&mut self, region: &str, markup: &str) -> Result<(), SurfaceError>;

    /// Drop a region and detach its elements. Unknown regions are ignored.
    fn remove_region(&mut self, region: &str) -> Result<(), SurfaceError>;
}
