//! # Pagecraft Catalog
//!
//! Static, read-only definitions consumed by the page editor.
//!
//! ## Contents
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ widgets: WidgetType registry + defaults     │
//! │  - id, name, icon, category, description    │
//! │  - default data shape keyed by widget id    │
//! └─────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────┐
//! │ templates: pre-authored website templates   │
//! │  - metadata (price, premium, features)      │
//! │  - nested section content (hero, posts...)  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The widget instance type ([`WidgetInstance`]) lives here too, since both the
//! editor and the HTML compiler speak it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_catalog::{default_data, TemplateCatalog};
//!
//! let catalog = TemplateCatalog::builtin()?;
//! let blog = catalog.get("personal-blog")?;
//! assert!(blog.has_section("posts"));
//!
//! let button = default_data("button").unwrap();
//! assert_eq!(button["text"], "Click Me");
//! ```

mod error;
mod template;
mod template_catalog;
mod widget;
mod widget_catalog;

pub use error::CatalogError;
pub use template::{Template, TemplateCategory};
pub use template_catalog::TemplateCatalog;
pub use widget::{WidgetCategory, WidgetData, WidgetInstance, WidgetType};
pub use widget_catalog::{
    default_data, find_widget_type, is_known_widget_type, widget_types_in, WIDGET_TYPES,
};
