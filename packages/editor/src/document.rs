//! # Page Document
//!
//! Core page abstraction for Pagecraft editing.
//!
//! A PageDocument is the widget tree of one page plus its editing state:
//! the template it was seeded from, a version counter, and the dirty flag.
//!
//! ## Lifecycle
//!
//! ```text
//! Seed → Edit → Render → Save
//!   ↓      ↓       ↓       ↓
//! Template Mutations HTML  PageSink
//! ```

use crate::{EditorError, Mutation, MutationResult, WidgetTree};
use pagecraft_catalog::WidgetInstance;
use pagecraft_compiler_html::{compile_page, CompileOptions};
use tracing::debug;

/// Editable page
#[derive(Debug, Clone, Default)]
pub struct PageDocument {
    /// Template this page was seeded from (if any)
    pub template_id: Option<String>,

    /// Current version number (increments on each mutation)
    pub version: u64,

    tree: WidgetTree,

    /// Unsaved changes since the last successful save or publish
    dirty: bool,
}

impl PageDocument {
    /// Empty page, not tied to a template
    pub fn new() -> Self {
        Self::default()
    }

    /// Page seeded from a template's widgets (clean)
    pub fn seeded(template_id: impl Into<String>, widgets: Vec<WidgetInstance>) -> Result<Self, EditorError> {
        Ok(Self {
            template_id: Some(template_id.into()),
            version: 0,
            tree: WidgetTree::from_widgets(widgets)?,
            dirty: false,
        })
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn widgets(&self) -> &[WidgetInstance] {
        self.tree.widgets()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag (after a successful save)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Apply a mutation
    ///
    /// On failure the tree, version and dirty flag are unchanged.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, EditorError> {
        let widget_id = mutation.apply(&mut self.tree)?;
        self.touch();

        debug!(mutation = mutation.name(), version = self.version, "Applied mutation");

        Ok(MutationResult {
            version: self.version,
            widget_id,
        })
    }

    /// Bump the version and mark the page unsaved
    fn touch(&mut self) {
        self.version += 1;
        self.dirty = true;
    }

    /// Render the page to HTML
    pub fn render(&self, title: &str, options: CompileOptions) -> Result<String, EditorError> {
        Ok(compile_page(title, self.tree.widgets(), options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_catalog::WidgetData;

    #[test]
    fn test_seeded_document_is_clean() {
        let widgets = vec![
            WidgetInstance::new("hero-1", "hero", WidgetData::new()),
            WidgetInstance::new("posts-1", "posts", WidgetData::new()),
        ];
        let doc = PageDocument::seeded("personal-blog", widgets).unwrap();

        assert!(!doc.is_dirty());
        assert_eq!(doc.version, 0);
        assert_eq!(doc.template_id.as_deref(), Some("personal-blog"));
        assert_eq!(doc.widgets()[1].position, 1);
    }

    #[test]
    fn test_apply_marks_dirty_and_bumps_version() {
        let mut doc = PageDocument::new();
        let result = doc
            .apply(&Mutation::AddWidget {
                widget_id: "button-1".to_string(),
                widget_type: "button".to_string(),
            })
            .unwrap();

        assert_eq!(result.version, 1);
        assert_eq!(result.widget_id.as_deref(), Some("button-1"));
        assert!(doc.is_dirty());

        doc.mark_clean();
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_failed_apply_leaves_document_untouched() {
        let mut doc = PageDocument::new();
        let result = doc.apply(&Mutation::DeleteWidget {
            widget_id: "missing".to_string(),
        });

        assert!(result.is_err());
        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_render_includes_widget_ids() {
        let mut doc = PageDocument::new();
        doc.apply(&Mutation::AddWidget {
            widget_id: "text-1".to_string(),
            widget_type: "text".to_string(),
        })
        .unwrap();

        let html = doc.render("Page", CompileOptions::default()).unwrap();
        assert!(html.contains("data-widget-id=\"text-1\""));
    }
}
