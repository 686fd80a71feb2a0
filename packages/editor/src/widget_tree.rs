//! # Widget Tree
//!
//! Ordered collection of widget instances. Array order is authoritative;
//! every structural change renumbers `position` so it always equals the index.

use crate::MutationError;
use pagecraft_catalog::WidgetInstance;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WidgetTree {
    widgets: Vec<WidgetInstance>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from widgets in display order
    ///
    /// Fails on the first duplicated id.
    pub fn from_widgets(widgets: Vec<WidgetInstance>) -> Result<Self, MutationError> {
        let mut seen = HashSet::new();
        for widget in &widgets {
            if !seen.insert(widget.id.as_str()) {
                return Err(MutationError::DuplicateId(widget.id.clone()));
            }
        }

        let mut tree = Self { widgets };
        tree.renumber();
        Ok(tree)
    }

    pub fn widgets(&self) -> &[WidgetInstance] {
        &self.widgets
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetInstance> {
        self.widgets.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.widgets.iter().map(|widget| widget.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&WidgetInstance> {
        self.widgets.iter().find(|widget| widget.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut WidgetInstance> {
        self.widgets.iter_mut().find(|widget| widget.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&WidgetInstance> {
        self.widgets.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.widgets.iter().position(|widget| widget.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub(crate) fn insert(&mut self, index: usize, widget: WidgetInstance) {
        let index = index.min(self.widgets.len());
        self.widgets.insert(index, widget);
        self.renumber();
    }

    pub(crate) fn push(&mut self, widget: WidgetInstance) {
        self.widgets.push(widget);
        self.renumber();
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<(usize, WidgetInstance)> {
        let index = self.index_of(id)?;
        let widget = self.widgets.remove(index);
        self.renumber();
        Some((index, widget))
    }

    /// Move the widget at `from` so it ends up at `to`
    pub(crate) fn move_widget(&mut self, from: usize, to: usize) {
        let widget = self.widgets.remove(from);
        self.widgets.insert(to, widget);
        self.renumber();
    }

    fn renumber(&mut self) {
        for (index, widget) in self.widgets.iter_mut().enumerate() {
            widget.position = index;
        }
    }

    /// Ids are unique and positions match indices
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::new();
        self.widgets
            .iter()
            .enumerate()
            .all(|(index, widget)| widget.position == index && seen.insert(widget.id.as_str()))
    }

    pub fn into_widgets(self) -> Vec<WidgetInstance> {
        self.widgets
    }
}
