//! # Document Store
//!
//! Owns the lesson being edited. Every change goes through a [`Mutation`]:
//! the store applies it to the current snapshot, swaps in the result and
//! flags the document as having unsaved changes.
//!
//! Snapshots are `Arc<Lesson>` and never change once handed out, so callers
//! can hold on to one while editing continues.

use crate::document::{DetailsPatch, SlidePatch};
use crate::errors::EditorError;
use crate::mutations::Mutation;
use crate::undo_stack::UndoStack;
use slidecraft_model::{
    ContentElement, Direction, DisplayMode, ElementKind, ElementPatch, Lesson, Position, Slide,
    TextVariant,
};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct DocumentStore {
    lesson: Arc<Lesson>,

    /// Increments on each applied mutation
    version: u64,

    has_unsaved_changes: bool,
    history: UndoStack,
}

impl DocumentStore {
    pub fn new(lesson: Lesson) -> Self {
        Self::with_undo_levels(lesson, 100)
    }

    pub fn with_undo_levels(lesson: Lesson, undo_levels: usize) -> Self {
        Self {
            lesson: Arc::new(lesson),
            version: 0,
            has_unsaved_changes: false,
            history: UndoStack::with_max_levels(undo_levels),
        }
    }

    /// Current snapshot
    pub fn lesson(&self) -> Arc<Lesson> {
        self.lesson.clone()
    }

    pub fn current(&self) -> &Lesson {
        &self.lesson
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn mark_saved(&mut self) {
        self.has_unsaved_changes = false;
    }

    /// Start over with a different lesson. History doesn't carry over.
    pub fn replace(&mut self, lesson: Lesson) {
        self.lesson = Arc::new(lesson);
        self.has_unsaved_changes = false;
        self.history.clear();
    }

    /// Apply a mutation and return the new snapshot
    ///
    /// On error nothing changes. A mutation that leaves the document as it
    /// was still counts as an edit but isn't recorded for undo.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Arc<Lesson>, EditorError> {
        let next = match mutation.apply(&self.lesson) {
            Ok(next) => next,
            Err(e) => {
                debug!(mutation = mutation.name(), error = %e, "Mutation rejected");
                return Err(e);
            }
        };

        self.version += 1;
        self.has_unsaved_changes = true;

        if next == *self.lesson {
            debug!(mutation = mutation.name(), version = self.version, "Mutation was a no-op");
        } else {
            let next = Arc::new(next);
            self.history
                .record(self.lesson.clone(), next.clone(), mutation.name());
            self.lesson = next;
            debug!(
                mutation = mutation.name(),
                version = self.version,
                slides = self.lesson.slide_count(),
                "Applied mutation"
            );
        }

        Ok(self.lesson.clone())
    }

    pub fn add_slide(&mut self) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::AddSlide {
            slide: Slide::untitled(),
        })
    }

    pub fn remove_slide(&mut self, slide_id: &str) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::RemoveSlide {
            slide_id: slide_id.to_string(),
        })
    }

    pub fn reorder_slides(&mut self, from: usize, to: usize) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::ReorderSlides { from, to })
    }

    pub fn update_slide(
        &mut self,
        slide_id: &str,
        patch: SlidePatch,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::UpdateSlide {
            slide_id: slide_id.to_string(),
            patch,
        })
    }

    pub fn update_details(&mut self, patch: DetailsPatch) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::UpdateDetails { patch })
    }

    pub fn add_element(
        &mut self,
        slide_index: usize,
        element: ContentElement,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::AddElement {
            slide_index,
            element,
        })
    }

    pub fn add_text(
        &mut self,
        slide_index: usize,
        content: &str,
        variant: TextVariant,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.add_element(slide_index, ContentElement::text(content, variant))
    }

    pub fn add_image(&mut self, slide_index: usize, uri: &str) -> Result<Arc<Lesson>, EditorError> {
        self.add_element(slide_index, ContentElement::image(uri))
    }

    pub fn add_expression(
        &mut self,
        slide_index: usize,
        latex: &str,
        display_mode: DisplayMode,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.add_element(slide_index, ContentElement::expression(latex, display_mode))
    }

    pub fn add_options(
        &mut self,
        slide_index: usize,
        choices: Vec<String>,
        correct_answer: usize,
    ) -> Result<Arc<Lesson>, EditorError> {
        let element = ContentElement::options(choices, correct_answer)?;
        self.add_element(slide_index, element)
    }

    pub fn add_carousel(
        &mut self,
        slide_index: usize,
        images: Vec<String>,
        arr: bool,
        show_dots: bool,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.add_element(slide_index, ContentElement::carousel(images, arr, show_dots))
    }

    pub fn update_element(
        &mut self,
        slide_index: usize,
        element_id: &str,
        patch: ElementPatch,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::UpdateElement {
            slide_index,
            element_id: element_id.to_string(),
            patch,
        })
    }

    pub fn remove_element(
        &mut self,
        slide_index: usize,
        element_id: &str,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::RemoveElement {
            slide_index,
            element_id: element_id.to_string(),
        })
    }

    pub fn reorder_elements(
        &mut self,
        slide_index: usize,
        from: usize,
        to: usize,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::ReorderElements {
            slide_index,
            from,
            to,
        })
    }

    pub fn move_element(
        &mut self,
        slide_index: usize,
        element_id: &str,
        direction: Direction,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::MoveElement {
            slide_index,
            element_id: element_id.to_string(),
            direction,
        })
    }

    pub fn insert_element_relative(
        &mut self,
        slide_index: usize,
        anchor_id: &str,
        kind: ElementKind,
        position: Position,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::InsertElement {
            slide_index,
            anchor_id: anchor_id.to_string(),
            element: ContentElement::default_of(kind),
            position,
        })
    }

    /// Same as [`Self::insert_element_relative`] with the kind given by name
    pub fn insert_element_relative_named(
        &mut self,
        slide_index: usize,
        anchor_id: &str,
        type_name: &str,
        position: Position,
    ) -> Result<Arc<Lesson>, EditorError> {
        let kind: ElementKind = type_name.parse()?;
        self.insert_element_relative(slide_index, anchor_id, kind, position)
    }

    /// Group the following mutations into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn undo(&mut self) -> Option<Arc<Lesson>> {
        let restored = self.history.undo()?;
        self.restore_snapshot(restored, "undo");
        Some(self.lesson.clone())
    }

    pub fn redo(&mut self) -> Option<Arc<Lesson>> {
        let restored = self.history.redo()?;
        self.restore_snapshot(restored, "redo");
        Some(self.lesson.clone())
    }

    fn restore_snapshot(&mut self, snapshot: Arc<Lesson>, action: &'static str) {
        self.lesson = snapshot;
        self.version += 1;
        self.has_unsaved_changes = true;
        debug!(action, version = self.version, "Restored snapshot");
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::create_document;
    use slidecraft_model::RoutingContext;

    fn store() -> DocumentStore {
        DocumentStore::new(create_document(&RoutingContext::default()))
    }

    #[test]
    fn test_mutation_marks_dirty() {
        let mut store = store();
        assert!(!store.has_unsaved_changes());

        store.add_slide().unwrap();
        assert!(store.has_unsaved_changes());
        assert_eq!(store.version(), 1);

        store.mark_saved();
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_rejected_mutation_changes_nothing() {
        let mut store = store();
        let before = store.lesson();

        let result = store.add_options(0, vec!["only one".to_string()], 0);
        assert!(matches!(result, Err(EditorError::Validation(_))));
        assert!(!store.has_unsaved_changes());
        assert_eq!(store.version(), 0);
        assert!(Arc::ptr_eq(&before, &store.lesson()));
    }

    #[test]
    fn test_snapshots_are_stable() {
        let mut store = store();
        let before = store.lesson();
        store.add_slide().unwrap();

        assert_eq!(before.slide_count(), 1);
        assert_eq!(store.current().slide_count(), 2);
    }

    #[test]
    fn test_noop_is_not_recorded() {
        let mut store = store();
        store.remove_slide("nope").unwrap();

        assert!(store.has_unsaved_changes());
        assert!(!store.history().can_undo());
    }

    #[test]
    fn test_undo_redo() {
        let mut store = store();
        store.add_slide().unwrap();
        store.add_slide().unwrap();

        let doc = store.undo().unwrap();
        assert_eq!(doc.slide_count(), 2);

        let doc = store.redo().unwrap();
        assert_eq!(doc.slide_count(), 3);
        assert!(store.redo().is_none());
    }

    #[test]
    fn test_batch_undoes_together() {
        let mut store = store();
        store.begin_batch("Build quiz");
        store.add_slide().unwrap();
        store.add_text(1, "Question", TextVariant::Bold).unwrap();
        store
            .add_options(1, vec!["a".to_string(), "b".to_string()], 1)
            .unwrap();
        store.end_batch();

        assert_eq!(store.history().undo_description(), Some("Build quiz"));
        let doc = store.undo().unwrap();
        assert_eq!(doc.slide_count(), 1);
    }

    #[test]
    fn test_unknown_type_name_is_programmer_error() {
        let mut store = store();
        let anchor = store.current().slides[0].elements()[0].id.clone();

        let result = store.insert_element_relative_named(0, &anchor, "video", Position::Below);
        assert!(matches!(result, Err(EditorError::UnknownElementType(_))));
    }
}
