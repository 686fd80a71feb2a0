//! # Pagecraft HTML Compiler
//!
//! Renders widget trees and template previews to static HTML.
//!
//! The output is what the editor attaches to a save payload as `markup`, and
//! what the canvas loader injects into each page region. Every top-level
//! widget element carries a `data-widget-id` attribute so live elements can be
//! mapped back to the widget they came from. Editable text elements also carry
//! it, together with `data-field` naming the data key they show.

mod compiler;

#[cfg(test)]
mod tests;

pub use compiler::{
    compile_page, compile_template_preview, compile_widget, compile_widgets, CompileError,
    CompileOptions, FIELD_ATTRIBUTE, WIDGET_ID_ATTRIBUTE,
};
