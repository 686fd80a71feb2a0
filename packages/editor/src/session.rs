//! # Edit Session Management
//!
//! Tracks one user's editing state for a page.
//!
//! An EditSession owns the page document, its undo history, the widget
//! selection, and the id generator. Every store operation goes through the
//! session so that selection and dirty state stay in step with the tree:
//!
//! - add and duplicate select the new widget
//! - deleting the selected widget clears the selection
//! - any operation naming a widget that is gone clears the selection and
//!   returns [`EditorError::StaleSelection`]
//! - only a successful save or publish clears the dirty flag

use crate::{
    guard_navigation, initialize_template, ConfirmPrompt, EditorConfig, EditorError, Mutation,
    MutationResult, NavigationDecision, PageDocument, PageSink, SavePayload, UndoStack,
    WidgetIdGenerator,
};
use pagecraft_catalog::{is_known_widget_type, Template, WidgetData, WidgetInstance};
use std::time::SystemTime;
use tracing::{debug, info, warn};

const UNTITLED: &str = "Untitled page";

/// Outcome of handing a template to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateLoad {
    /// Same template as before; the page was left alone
    Unchanged,
    /// Different template; the page was reset and reseeded
    Reseeded,
}

/// Single-user edit session
#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// When the session started
    pub started_at: SystemTime,

    document: PageDocument,
    history: UndoStack,
    ids: WidgetIdGenerator,
    selected: Option<String>,
    title: String,
    config: EditorConfig,
}

impl EditSession {
    /// Session on an empty page
    pub fn new(id: impl Into<String>, config: EditorConfig) -> Self {
        Self {
            id: id.into(),
            started_at: SystemTime::now(),
            document: PageDocument::new(),
            history: UndoStack::with_max_levels(config.undo_levels),
            ids: WidgetIdGenerator::new(),
            selected: None,
            title: UNTITLED.to_string(),
            config,
        }
    }

    /// Session on a page seeded from `template`
    pub fn from_template(id: impl Into<String>, template: &Template, config: EditorConfig) -> Result<Self, EditorError> {
        let mut session = Self::new(id, config);
        session.load_template(template)?;
        Ok(session)
    }

    /// Replace the id generator (deterministic ids in tests and replays)
    pub fn with_id_generator(mut self, ids: WidgetIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Point the session at `template`
    ///
    /// A template with a new identity resets the page, history and
    /// selection, then reseeds. The same template again is a no-op, so
    /// edits survive repeated loads.
    pub fn load_template(&mut self, template: &Template) -> Result<TemplateLoad, EditorError> {
        if self.document.template_id.as_deref() == Some(template.id.as_str()) {
            debug!(template = %template.id, "Template unchanged, keeping page");
            return Ok(TemplateLoad::Unchanged);
        }

        let widgets = initialize_template(template, &self.config.seed_order)?;
        self.document = PageDocument::seeded(template.id.clone(), widgets)?;
        self.history.clear();
        self.selected = None;
        self.title = template.name.clone();

        info!(session = %self.id, template = %template.id, "Loaded template");
        Ok(TemplateLoad::Reseeded)
    }

    // Accessors

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn widgets(&self) -> &[WidgetInstance] {
        self.document.widgets()
    }

    pub fn widget(&self, id: &str) -> Option<&WidgetInstance> {
        self.document.tree().get(id)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    // Store operations

    /// Append a widget of `widget_type` with default data and select it
    pub fn add_widget(&mut self, widget_type: &str) -> Result<WidgetInstance, EditorError> {
        if !is_known_widget_type(widget_type) {
            return Err(crate::MutationError::UnknownWidgetType(widget_type.to_string()).into());
        }

        let tree = self.document.tree();
        let widget_id = self.ids.next_id(widget_type, |candidate| tree.contains(candidate));

        self.history.apply(
            &Mutation::AddWidget {
                widget_id: widget_id.clone(),
                widget_type: widget_type.to_string(),
            },
            &mut self.document,
        )?;

        debug!(widget_id = %widget_id, widget_type, "Widget added");
        self.select_existing(widget_id)
    }

    /// Shallow-merge `data` into the widget's data
    pub fn update_widget(&mut self, id: &str, data: WidgetData) -> Result<MutationResult, EditorError> {
        self.require_widget(id)?;
        self.history.apply(
            &Mutation::UpdateWidget {
                widget_id: id.to_string(),
                data,
            },
            &mut self.document,
        )
    }

    pub fn delete_widget(&mut self, id: &str) -> Result<MutationResult, EditorError> {
        self.require_widget(id)?;
        let result = self.history.apply(
            &Mutation::DeleteWidget {
                widget_id: id.to_string(),
            },
            &mut self.document,
        )?;

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }

        debug!(widget_id = %id, "Widget deleted");
        Ok(result)
    }

    /// Clone a widget directly after itself and select the clone
    pub fn duplicate_widget(&mut self, id: &str) -> Result<WidgetInstance, EditorError> {
        let source = self.require_widget(id)?;
        let widget_type = source.widget_type.clone();

        let tree = self.document.tree();
        let new_id = self.ids.next_id(&widget_type, |candidate| tree.contains(candidate));

        self.history.apply(
            &Mutation::DuplicateWidget {
                widget_id: id.to_string(),
                new_id: new_id.clone(),
            },
            &mut self.document,
        )?;

        debug!(widget_id = %id, new_id = %new_id, "Widget duplicated");
        self.select_existing(new_id)
    }

    /// Move the widget at `from` to `to`
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<MutationResult, EditorError> {
        self.history.apply(&Mutation::Reorder { from, to }, &mut self.document)
    }

    /// Apply an arbitrary mutation with undo support
    ///
    /// Used when replaying recorded edits. Selection is repaired afterwards.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, EditorError> {
        let result = self.history.apply(mutation, &mut self.document)?;
        self.repair_selection();
        Ok(result)
    }

    /// Group the following operations into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let undone = self.history.undo(&mut self.document)?;
        self.repair_selection();
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let redone = self.history.redo(&mut self.document)?;
        self.repair_selection();
        Ok(redone)
    }

    // Selection

    /// Select a widget, replacing any previous selection
    pub fn select(&mut self, id: &str) -> Result<&WidgetInstance, EditorError> {
        self.require_widget(id)?;
        self.selected = Some(id.to_string());
        self.require_widget(id)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_widget(&self) -> Option<&WidgetInstance> {
        self.selected.as_deref().and_then(|id| self.document.tree().get(id))
    }

    fn select_existing(&mut self, id: String) -> Result<WidgetInstance, EditorError> {
        let widget = self
            .document
            .tree()
            .get(&id)
            .cloned()
            .ok_or_else(|| EditorError::StaleSelection(id.clone()))?;
        self.selected = Some(id);
        Ok(widget)
    }

    /// Look up a widget, clearing the selection if it points at nothing
    fn require_widget(&mut self, id: &str) -> Result<&WidgetInstance, EditorError> {
        if !self.document.tree().contains(id) {
            warn!(widget_id = %id, "Operation on missing widget");
            self.selected = None;
            return Err(EditorError::StaleSelection(id.to_string()));
        }
        self.document
            .tree()
            .get(id)
            .ok_or_else(|| EditorError::StaleSelection(id.to_string()))
    }

    fn repair_selection(&mut self) {
        if let Some(id) = &self.selected {
            if !self.document.tree().contains(id) {
                debug!(widget_id = %id, "Selected widget removed, clearing selection");
                self.selected = None;
            }
        }
    }

    // Persistence

    /// Snapshot of the page for a sink
    pub fn payload(&self) -> Result<SavePayload, EditorError> {
        let markup = if self.config.include_markup {
            Some(self.document.render(&self.title, self.config.markup.clone())?)
        } else {
            None
        };

        Ok(SavePayload {
            widgets: self.document.widgets().to_vec(),
            template: self.document.template_id.clone(),
            markup,
        })
    }

    /// Hand the page to `sink`
    ///
    /// On rejection the page and the dirty flag are untouched, so the save
    /// can be retried.
    pub fn save(&mut self, sink: &mut dyn PageSink) -> Result<(), EditorError> {
        let payload = self.payload()?;
        if let Err(e) = sink.save(&payload) {
            warn!(session = %self.id, error = %e, "Save failed");
            return Err(EditorError::SaveFailed(e));
        }

        self.document.mark_clean();
        info!(session = %self.id, widgets = payload.widgets.len(), "Page saved");
        Ok(())
    }

    /// Save and make the page public
    pub fn publish(&mut self, sink: &mut dyn PageSink) -> Result<(), EditorError> {
        let payload = self.payload()?;
        if let Err(e) = sink.publish(&payload) {
            warn!(session = %self.id, error = %e, "Publish failed");
            return Err(EditorError::PublishFailed(e));
        }

        self.document.mark_clean();
        info!(session = %self.id, widgets = payload.widgets.len(), "Page published");
        Ok(())
    }

    /// Ask before leaving a page with unsaved changes
    pub fn navigate_away(&self, prompt: &mut dyn ConfirmPrompt) -> NavigationDecision {
        guard_navigation(self.is_dirty(), prompt)
    }
}
