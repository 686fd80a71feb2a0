//! # Widget Mutations
//!
//! High-level semantic operations on a page's widget tree.
//!
//! ## Design Principles
//!
//! 1. **Replayable**: Mutations carry every id they create, so applying the
//!    same mutation to the same tree always yields the same tree
//! 2. **Validated**: All mutations validate before touching the tree
//! 3. **Invertible**: Each mutation can produce its inverse for undo
//!
//! ## Mutation Semantics
//!
//! ### UpdateWidget
//! - Shallow merge: keys in the patch overwrite, other keys survive
//! - Never changes the widget type
//!
//! ### DuplicateWidget
//! - Deep-clones data under a new id, directly after the source
//!
//! ### Reorder
//! - Moves one widget; every position is renumbered

use crate::WidgetTree;
use pagecraft_catalog::{default_data, WidgetData, WidgetInstance};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations on the widget tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    /// Append a widget of `widget_type` with catalog default data
    AddWidget {
        widget_id: String,
        widget_type: String,
    },

    /// Insert a fully-formed widget at index (restores deletions)
    InsertWidget {
        index: usize,
        widget: WidgetInstance,
    },

    /// Shallow-merge `data` into the widget's data
    UpdateWidget {
        widget_id: String,
        data: WidgetData,
    },

    /// Replace the widget's data wholesale (reverts updates)
    ReplaceData {
        widget_id: String,
        data: WidgetData,
    },

    /// Remove a widget from the tree
    DeleteWidget {
        widget_id: String,
    },

    /// Clone a widget under `new_id`, directly after the source
    DuplicateWidget {
        widget_id: String,
        new_id: String,
    },

    /// Move the widget at `from` to `to`
    Reorder {
        from: usize,
        to: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Widget not found: {0}")]
    WidgetNotFound(String),

    #[error("Unknown widget type: {0}")]
    UnknownWidgetType(String),

    #[error("Duplicate widget id: {0}")]
    DuplicateId(String),

    #[error("Index {index} out of range for {len} widgets")]
    IndexOutOfRange { index: usize, len: usize },
}

impl Mutation {
    /// Apply mutation to the tree with validation
    ///
    /// Returns the id of the widget the mutation touched, if any.
    pub fn apply(&self, tree: &mut WidgetTree) -> Result<Option<String>, MutationError> {
        self.validate(tree)?;

        match self {
            Mutation::AddWidget { widget_id, widget_type } => {
                let data = default_data(widget_type)
                    .ok_or_else(|| MutationError::UnknownWidgetType(widget_type.clone()))?;
                tree.push(WidgetInstance::new(widget_id.clone(), widget_type.clone(), data));
                Ok(Some(widget_id.clone()))
            }

            Mutation::InsertWidget { index, widget } => {
                tree.insert(*index, widget.clone());
                Ok(Some(widget.id.clone()))
            }

            Mutation::UpdateWidget { widget_id, data } => {
                let widget = Self::find_mut(tree, widget_id)?;
                for (key, value) in data {
                    widget.data.insert(key.clone(), value.clone());
                }
                Ok(Some(widget_id.clone()))
            }

            Mutation::ReplaceData { widget_id, data } => {
                let widget = Self::find_mut(tree, widget_id)?;
                widget.data = data.clone();
                Ok(Some(widget_id.clone()))
            }

            Mutation::DeleteWidget { widget_id } => {
                tree.remove(widget_id)
                    .ok_or_else(|| MutationError::WidgetNotFound(widget_id.clone()))?;
                Ok(Some(widget_id.clone()))
            }

            Mutation::DuplicateWidget { widget_id, new_id } => {
                let index = tree
                    .index_of(widget_id)
                    .ok_or_else(|| MutationError::WidgetNotFound(widget_id.clone()))?;
                let source = &tree.widgets()[index];
                let copy = WidgetInstance::new(new_id.clone(), source.widget_type.clone(), source.data.clone());
                tree.insert(index + 1, copy);
                Ok(Some(new_id.clone()))
            }

            Mutation::Reorder { from, to } => {
                tree.move_widget(*from, *to);
                Ok(tree.at(*to).map(|widget| widget.id.clone()))
            }
        }
    }

    fn find_mut<'a>(tree: &'a mut WidgetTree, id: &str) -> Result<&'a mut WidgetInstance, MutationError> {
        tree.get_mut(id)
            .ok_or_else(|| MutationError::WidgetNotFound(id.to_string()))
    }

    /// Validate without applying
    pub fn validate(&self, tree: &WidgetTree) -> Result<(), MutationError> {
        match self {
            Mutation::AddWidget { widget_id, widget_type } => {
                if default_data(widget_type).is_none() {
                    return Err(MutationError::UnknownWidgetType(widget_type.clone()));
                }
                Self::require_free_id(tree, widget_id)
            }

            Mutation::InsertWidget { index, widget } => {
                if default_data(&widget.widget_type).is_none() {
                    return Err(MutationError::UnknownWidgetType(widget.widget_type.clone()));
                }
                if *index > tree.len() {
                    return Err(MutationError::IndexOutOfRange {
                        index: *index,
                        len: tree.len(),
                    });
                }
                Self::require_free_id(tree, &widget.id)
            }

            Mutation::UpdateWidget { widget_id, .. }
            | Mutation::ReplaceData { widget_id, .. }
            | Mutation::DeleteWidget { widget_id } => Self::require_widget(tree, widget_id),

            Mutation::DuplicateWidget { widget_id, new_id } => {
                Self::require_widget(tree, widget_id)?;
                Self::require_free_id(tree, new_id)
            }

            Mutation::Reorder { from, to } => {
                for index in [*from, *to] {
                    if index >= tree.len() {
                        return Err(MutationError::IndexOutOfRange {
                            index,
                            len: tree.len(),
                        });
                    }
                }
                Ok(())
            }
        }
    }

    fn require_widget(tree: &WidgetTree, id: &str) -> Result<(), MutationError> {
        if tree.contains(id) {
            Ok(())
        } else {
            Err(MutationError::WidgetNotFound(id.to_string()))
        }
    }

    fn require_free_id(tree: &WidgetTree, id: &str) -> Result<(), MutationError> {
        if tree.contains(id) {
            Err(MutationError::DuplicateId(id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Create the inverse mutation for undo
    ///
    /// Must be called before `apply`, against the tree the mutation will run on.
    pub fn to_inverse(&self, tree: &WidgetTree) -> Result<Mutation, MutationError> {
        self.validate(tree)?;

        match self {
            Mutation::AddWidget { widget_id, .. } => Ok(Mutation::DeleteWidget {
                widget_id: widget_id.clone(),
            }),

            Mutation::InsertWidget { widget, .. } => Ok(Mutation::DeleteWidget {
                widget_id: widget.id.clone(),
            }),

            Mutation::UpdateWidget { widget_id, .. } | Mutation::ReplaceData { widget_id, .. } => {
                let widget = tree
                    .get(widget_id)
                    .ok_or_else(|| MutationError::WidgetNotFound(widget_id.clone()))?;
                Ok(Mutation::ReplaceData {
                    widget_id: widget_id.clone(),
                    data: widget.data.clone(),
                })
            }

            Mutation::DeleteWidget { widget_id } => {
                let index = tree
                    .index_of(widget_id)
                    .ok_or_else(|| MutationError::WidgetNotFound(widget_id.clone()))?;
                Ok(Mutation::InsertWidget {
                    index,
                    widget: tree.widgets()[index].clone(),
                })
            }

            Mutation::DuplicateWidget { new_id, .. } => Ok(Mutation::DeleteWidget {
                widget_id: new_id.clone(),
            }),

            Mutation::Reorder { from, to } => Ok(Mutation::Reorder { from: *to, to: *from }),
        }
    }

    /// Get a debug name for this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddWidget { .. } => "add_widget",
            Mutation::InsertWidget { .. } => "insert_widget",
            Mutation::UpdateWidget { .. } => "update_widget",
            Mutation::ReplaceData { .. } => "replace_data",
            Mutation::DeleteWidget { .. } => "delete_widget",
            Mutation::DuplicateWidget { .. } => "duplicate_widget",
            Mutation::Reorder { .. } => "reorder",
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Widget the mutation created, changed or removed
    pub widget_id: Option<String>,
}
