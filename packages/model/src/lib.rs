//! # Slidecraft Model
//!
//! Document types for authored lessons.
//!
//! ```text
//! Lesson ─┬─ Slide ─┬─ ContentElement (text | image | expression | options | carousel)
//!         │         └─ ...
//!         └─ Slide ...
//! ```
//!
//! All helpers are value-returning: a slide or lesson is never edited in
//! place, callers get a new value back.

pub mod element;
pub mod error;
pub mod id;
mod keyword;
pub mod lesson;
pub mod slide;

pub use element::{
    Align, ContentElement, DisplayMode, ElementBody, ElementKind, ElementPatch, Layout,
    TextVariant, Width, MAX_SPACING, PLACEHOLDER_IMAGE_URI,
};
pub use error::{UnknownElementType, UnknownKeyword, ValidationError, ValidationResult};
pub use id::{new_id, pick_title, SLIDE_TITLE_POOL};
pub use lesson::{Lesson, RoutingContext};
pub use slide::{move_item, Direction, Position, Slide, SlideKind};
