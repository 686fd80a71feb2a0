//! # Undo/Redo Stack
//!
//! Tracks mutation history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each mutation records its inverse before being applied
//! - Undo applies the inverse and moves the batch to the redo stack
//! - Redo reapplies the original mutations
//! - New mutations clear the redo stack
//! - Batches group several mutations into one undo step
//! - Undo and redo go through `PageDocument::apply`, so they mark the page dirty
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let mut doc = PageDocument::new();
//!
//! stack.apply(&Mutation::AddWidget { .. }, &mut doc)?;
//! stack.undo(&mut doc)?;
//! stack.redo(&mut doc)?;
//! ```

use crate::{EditorError, Mutation, MutationResult, PageDocument};

/// A group of mutations that are undone/redone together
#[derive(Debug, Clone)]
pub struct MutationBatch {
    /// The mutations in this batch (in application order)
    pub mutations: Vec<Mutation>,

    /// The inverse mutations (in reverse order for undo)
    pub inverses: Vec<Mutation>,

    pub description: Option<String>,
}

impl MutationBatch {
    pub fn single(mutation: Mutation, inverse: Mutation) -> Self {
        Self {
            mutations: vec![mutation],
            inverses: vec![inverse],
            description: None,
        }
    }

    fn empty() -> Self {
        Self {
            mutations: Vec::new(),
            inverses: Vec::new(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Undo/redo stack for page editing
#[derive(Debug)]
pub struct UndoStack {
    /// Applied batches (most recent last)
    undo_stack: Vec<MutationBatch>,

    /// Undone batches (most recent last)
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn apply(&mut self, mutation: &Mutation, doc: &mut PageDocument) -> Result<MutationResult, EditorError> {
        // Inverse must be computed against the pre-mutation tree
        let inverse = mutation.to_inverse(doc.tree())?;
        let result = doc.apply(mutation)?;

        if let Some(batch) = &mut self.current_batch {
            batch.mutations.push(mutation.clone());
            batch.inverses.insert(0, inverse);
        } else {
            self.push_batch(MutationBatch::single(mutation.clone(), inverse));
        }

        Ok(result)
    }

    /// Start a batch of mutations (undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(MutationBatch::empty());
    }

    /// End the current batch and push it to the undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Undo the most recent batch
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, doc: &mut PageDocument) -> Result<bool, EditorError> {
        let Some(batch) = self.undo_stack.pop() else {
            return Ok(false);
        };

        for inverse in &batch.inverses {
            doc.apply(inverse)?;
        }

        self.redo_stack.push(batch);
        Ok(true)
    }

    /// Redo the most recently undone batch
    pub fn redo(&mut self, doc: &mut PageDocument) -> Result<bool, EditorError> {
        let Some(batch) = self.redo_stack.pop() else {
            return Ok(false);
        };

        for mutation in &batch.mutations {
            doc.apply(mutation)?;
        }

        self.undo_stack.push(batch);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn add(id: &str, widget_type: &str) -> Mutation {
        Mutation::AddWidget {
            widget_id: id.to_string(),
            widget_type: widget_type.to_string(),
        }
    }

    fn set_text(id: &str, text: &str) -> Mutation {
        Mutation::UpdateWidget {
            widget_id: id.to_string(),
            data: json!({ "text": text }).as_object().unwrap().clone(),
        }
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_apply_undo_redo_update() {
        let mut doc = PageDocument::new();
        let mut stack = UndoStack::new();

        stack.apply(&add("button-1", "button"), &mut doc).unwrap();
        stack.apply(&set_text("button-1", "Buy Now"), &mut doc).unwrap();
        assert_eq!(stack.undo_levels(), 2);

        assert!(stack.undo(&mut doc).unwrap());
        assert_eq!(doc.tree().get("button-1").unwrap().text_field("text"), Some("Click Me"));
        assert_eq!(stack.redo_levels(), 1);

        assert!(stack.redo(&mut doc).unwrap());
        assert_eq!(doc.tree().get("button-1").unwrap().text_field("text"), Some("Buy Now"));
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_undo_on_empty_stack() {
        let mut doc = PageDocument::new();
        let mut stack = UndoStack::new();
        assert!(!stack.undo(&mut doc).unwrap());
        assert!(!stack.redo(&mut doc).unwrap());
    }

    #[test]
    fn test_undo_marks_document_dirty() {
        let mut doc = PageDocument::new();
        let mut stack = UndoStack::new();

        stack.apply(&add("text-1", "text"), &mut doc).unwrap();
        doc.mark_clean();

        stack.undo(&mut doc).unwrap();
        assert!(doc.is_dirty());
        assert!(doc.tree().is_empty());
    }

    #[test]
    fn test_batch_undone_as_one_step() {
        let mut doc = PageDocument::new();
        let mut stack = UndoStack::new();

        stack.begin_batch();
        stack.set_batch_description("Add hero and button");
        stack.apply(&add("hero-1", "hero"), &mut doc).unwrap();
        stack.apply(&add("button-1", "button"), &mut doc).unwrap();
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Add hero and button"));

        stack.undo(&mut doc).unwrap();
        assert!(doc.tree().is_empty());
        assert_eq!(stack.redo_description(), Some("Add hero and button"));
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut doc = PageDocument::new();
        let mut stack = UndoStack::new();

        stack.apply(&add("button-1", "button"), &mut doc).unwrap();
        stack.apply(&set_text("button-1", "One"), &mut doc).unwrap();
        stack.undo(&mut doc).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        stack.apply(&set_text("button-1", "Two"), &mut doc).unwrap();
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut doc = PageDocument::new();
        let mut stack = UndoStack::with_max_levels(2);

        stack.apply(&add("button-1", "button"), &mut doc).unwrap();
        for i in 0..3 {
            stack.apply(&set_text("button-1", &format!("Text {}", i)), &mut doc).unwrap();
        }

        assert_eq!(stack.undo_levels(), 2);
    }

    #[test]
    fn test_failed_mutation_is_not_recorded() {
        let mut doc = PageDocument::new();
        let mut stack = UndoStack::new();

        assert!(stack.apply(&add("x-1", "hologram"), &mut doc).is_err());
        assert!(!stack.can_undo());
    }
}
