//! # Pagecraft Editor
//!
//! Core page editing engine for Pagecraft.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ catalog: widget types + templates           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: page lifecycle + mutations          │
//! │  - Seed pages from templates                │
//! │  - Apply mutations with validation          │
//! │  - Undo/redo history                        │
//! │  - Selection + dirty tracking               │
//! │  - Save/publish through a PageSink          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: widget tree → HTML           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Array order is the source of truth**: `position` is derived
//! 2. **Mutations are data**: every edit is a validated, invertible `Mutation`
//! 3. **Ids are unique**: no operation can leave two widgets with one id
//! 4. **Failures keep state**: a rejected save never touches the page
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_catalog::TemplateCatalog;
//! use pagecraft_editor::{EditSession, EditorConfig, JsonFileSink};
//!
//! let catalog = TemplateCatalog::builtin()?;
//! let template = catalog.get("personal-blog")?;
//!
//! let mut session = EditSession::from_template("local", template, EditorConfig::default())?;
//! let button = session.add_widget("button")?;
//! session.update_widget(&button.id, patch)?;
//!
//! session.save(&mut JsonFileSink::new("page.json"))?;
//! ```

mod config;
mod document;
mod errors;
mod id_generator;
mod mutations;
mod navigation;
mod persistence;
mod seeding;
mod session;
mod undo_stack;
mod widget_tree;

pub use config::EditorConfig;
pub use document::PageDocument;
pub use errors::EditorError;
pub use id_generator::{Clock, WidgetIdGenerator};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use navigation::{guard_navigation, ConfirmPrompt, NavigationDecision, UNSAVED_CHANGES_MESSAGE};
pub use persistence::{JsonFileSink, PageSink, PageStatus, SavePayload, SinkError, StoredPage};
pub use seeding::{initialize_template, SeedPolicy, DEFAULT_SEED_ORDER};
pub use session::{EditSession, TemplateLoad};
pub use undo_stack::{MutationBatch, UndoStack};
pub use widget_tree::WidgetTree;

// Re-export common types for convenience
pub use pagecraft_catalog::{WidgetData, WidgetInstance};
