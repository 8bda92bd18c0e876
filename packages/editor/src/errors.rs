//! Error types for the editor

use slidecraft_model::{UnknownElementType, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Insertion target doesn't exist. Removals of missing targets are
    /// no-ops and never produce this.
    #[error("Slide index {index} out of range for {len} slides")]
    Index { index: usize, len: usize },

    #[error(transparent)]
    UnknownElementType(#[from] UnknownElementType),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Cannot {action} lesson {lesson_id} while it is {state}")]
    Publish {
        lesson_id: String,
        action: &'static str,
        state: String,
    },
}

impl EditorError {
    pub fn index(index: usize, len: usize) -> Self {
        Self::Index { index, len }
    }
}

/// Local cache read/write failures. Always recovered from by the caller.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}
