//! # Pagecraft Canvas
//!
//! Live editing on the rendered page.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ editor: widget tree, session                │
//! └─────────────────────────────────────────────┘
//!          ↓ widgets               ↑ update_widget
//! ┌─────────────────────────────────────────────┐
//! │ canvas                                      │
//! │  - TemplateLoader: inject once ready        │
//! │  - StyleBridge: panel edits → element       │
//! │  - ContentLedger: Seeded → UserEdited       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ RenderSurface (VirtualSurface in memory)    │
//! └─────────────────────────────────────────────┘
//! ```

mod bridge;
mod canvas;
pub mod color;
mod content;
mod loader;
mod selection;
mod style;
mod surface;
mod virtual_surface;

pub use bridge::{BridgeError, StyleBridge};
pub use canvas::{Canvas, RefreshReport};
pub use color::{hex_to_rgb, rgb_to_hex, ColorError};
pub use content::{ContentLedger, ContentState, RenderOutcome};
pub use loader::{LoadError, LoadState, LoaderConfig, PageContent, TemplateLoader};
pub use pagecraft_compiler_html::FIELD_ATTRIBUTE;
pub use selection::{default_text_field, SelectedElement};
pub use style::{CustomizationPanel, PanelField, StyleProperty};
pub use surface::{ElementInfo, ElementRef, RenderSurface, SurfaceError};
pub use virtual_surface::{VElement, VirtualSurface};
