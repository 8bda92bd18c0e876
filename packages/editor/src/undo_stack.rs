//! # Undo/Redo Stack
//!
//! Tracks document history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Documents are immutable snapshots, so history stores the document
//!   before and after each change instead of inverse operations
//! - Undo restores the `before` snapshot and moves the batch to the redo stack
//! - Redo restores the `after` snapshot
//! - New changes clear the redo stack
//! - Supports batched changes (group several mutations as one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let next = Arc::new(mutation.apply(&doc)?);
//! stack.record(doc.clone(), next.clone(), mutation.name());
//!
//! let restored = stack.undo();   // Some(doc)
//! let again = stack.redo();      // Some(next)
//! ```

use slidecraft_model::Lesson;
use std::sync::Arc;

/// One undo step: the document on either side of one or more mutations
#[derive(Debug, Clone)]
pub struct MutationBatch {
    pub before: Arc<Lesson>,
    pub after: Arc<Lesson>,

    /// Names of the mutations in this step, in application order
    pub mutations: Vec<&'static str>,

    pub description: Option<String>,
}

impl MutationBatch {
    pub fn single(before: Arc<Lesson>, after: Arc<Lesson>, name: &'static str) -> Self {
        Self {
            before,
            after,
            mutations: vec![name],
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug)]
pub struct UndoStack {
    /// Most recent last
    undo_stack: Vec<MutationBatch>,

    /// Most recent last
    redo_stack: Vec<MutationBatch>,

    /// 0 = unlimited
    max_levels: usize,

    current_batch: Option<BatchBuilder>,
}

#[derive(Debug, Default)]
struct BatchBuilder {
    inner: Option<MutationBatch>,
    description: Option<String>,
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

    /// Record a change from `before` to `after`
    pub fn record(&mut self, before: Arc<Lesson>, after: Arc<Lesson>, name: &'static str) {
        if let Some(builder) = &mut self.current_batch {
            match &mut builder.inner {
                Some(batch) => {
                    batch.after = after;
                    batch.mutations.push(name);
                }
                None => builder.inner = Some(MutationBatch::single(before, after, name)),
            }
        } else {
            self.push_batch(MutationBatch::single(before, after, name));
        }
    }

    /// Start a batch of changes (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(BatchBuilder::default());
    }

    /// End the current batch and push it, unless nothing was recorded
    pub fn end_batch(&mut self) {
        if let Some(builder) = self.current_batch.take() {
            if let Some(mut batch) = builder.inner {
                batch.description = builder.description;
                self.push_batch(batch);
            }
        }
    }

    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(builder) = &mut self.current_batch {
            builder.description = Some(description.into());
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Pop the latest step; returns the document to restore
    pub fn undo(&mut self) -> Option<Arc<Lesson>> {
        self.end_batch();
        let batch = self.undo_stack.pop()?;
        let before = batch.before.clone();
        self.redo_stack.push(batch);
        Some(before)
    }

    /// Reapply the latest undone step; returns the document to restore
    pub fn redo(&mut self) -> Option<Arc<Lesson>> {
        self.end_batch();
        let batch = self.redo_stack.pop()?;
        let after = batch.after.clone();
        self.undo_stack.push(batch);
        Some(after)
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

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Description of the next undo step, falling back to the mutation name
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().and_then(describe)
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().and_then(describe)
    }
}

fn describe(batch: &MutationBatch) -> Option<&str> {
    batch
        .description
        .as_deref()
        .or_else(|| batch.mutations.first().copied())
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
