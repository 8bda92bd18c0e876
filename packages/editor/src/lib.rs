//! # Slidecraft Editor
//!
//! Editing engine for slide-based lessons.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Lesson / Slide / ContentElement      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: document store + mutations          │
//! │  - Pure document operations                 │
//! │  - Serializable mutations, undo/redo        │
//! │  - Selection and progress metrics           │
//! │  - Local cache persistence with freshness   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ lesson store: submit for review / publish   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Documents are values**: every operation returns a new lesson
//! 2. **One way in**: the store only changes through mutations
//! 3. **Restore never fails**: a bad cache entry means a fresh lesson
//! 4. **Selection is transient**: never saved, always reconciled
//!
//! ## Usage
//!
//! ```rust,ignore
//! use slidecraft_editor::{EditSession, EditorConfig, FileCache, SystemClock};
//!
//! let mut session = EditSession::open(
//!     &context,
//!     Box::new(FileCache::new(".slidecraft")),
//!     Box::new(SystemClock),
//!     EditorConfig::default(),
//! );
//!
//! session.add_text("Photosynthesis", TextVariant::Bold)?;
//! session.add_options(vec!["Roots".into(), "Leaves".into()], 1)?;
//! session.save()?;
//! ```

mod config;
mod document;
mod errors;
mod metrics;
mod mutations;
mod persistence;
mod publish;
mod selection;
mod session;
mod store;
mod undo_stack;

pub use config::EditorConfig;
pub use document::{
    add_element_to_slide, add_slide, append_slide, create_document, insert_element_at_anchor,
    insert_element_relative, move_element_relative, remove_element, remove_slide,
    reorder_elements, reorder_slides, update_details, update_element, update_slide,
    DetailsPatch, SlidePatch, DEFAULT_LESSON_TITLE, STARTER_TEXT,
};
pub use errors::{CacheError, EditorError};
pub use metrics::{
    estimated_duration_minutes, lesson_progress, LessonMetrics, RECOMMENDED_SLIDE_COUNT,
    SECONDS_PER_SLIDE,
};
pub use mutations::Mutation;
pub use persistence::{
    load_envelope, restore_lesson, save_lesson, Clock, Envelope, FileCache, FixedClock,
    LocalCache, MemoryCache, SystemClock, DEFAULT_FRESHNESS_WINDOW_MS, SESSION_KEY,
};
pub use publish::{InMemoryLessonStore, LessonStore, PublishState, Submission};
pub use selection::Selection;
pub use session::EditSession;
pub use store::DocumentStore;
pub use undo_stack::{MutationBatch, UndoStack};

// Re-export model types for convenience
pub use slidecraft_model::{
    Align, ContentElement, Direction, DisplayMode, ElementBody, ElementKind, ElementPatch,
    Layout, Lesson, Position, RoutingContext, Slide, SlideKind, TextVariant, ValidationError,
    Width,
};
