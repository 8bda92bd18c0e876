//! # Edit Session
//!
//! One user's editing session over one lesson: the document store, the
//! transient selection and the local cache the lesson is saved to.
//!
//! Element operations act on the current slide, the way the editor UI
//! drives them. Saving happens at explicit boundaries ([`EditSession::save`])
//! or, when `autosave_debounce_ms` is configured, from [`EditSession::tick`]
//! once edits have settled.

use crate::config::EditorConfig;
use crate::document::{create_document, DetailsPatch, SlidePatch};
use crate::errors::{CacheError, EditorError};
use crate::metrics::LessonMetrics;
use crate::mutations::Mutation;
use crate::persistence::{restore_lesson, save_lesson, Clock, LocalCache};
use crate::selection::Selection;
use crate::store::DocumentStore;
use slidecraft_model::{
    ContentElement, Direction, DisplayMode, ElementKind, ElementPatch, Lesson, Position,
    RoutingContext, Slide, TextVariant,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct EditSession {
    store: DocumentStore,
    selection: Selection,
    cache: Box<dyn LocalCache>,
    clock: Box<dyn Clock>,
    config: EditorConfig,

    /// Clock time of the latest edit not yet saved
    last_edit_at: Option<i64>,
}

impl EditSession {
    /// Restore the cached lesson, or start a new one for `context`
    pub fn open(
        context: &RoutingContext,
        cache: Box<dyn LocalCache>,
        clock: Box<dyn Clock>,
        config: EditorConfig,
    ) -> Self {
        let lesson = restore_lesson(
            cache.as_ref(),
            clock.as_ref(),
            &config.cache_key,
            context,
            config.freshness_window_ms,
        );

        Self {
            store: DocumentStore::with_undo_levels(lesson, config.undo_levels),
            selection: Selection::new(),
            cache,
            clock,
            config,
            last_edit_at: None,
        }
    }

    /// Discard the current lesson and start a new one for `context`
    pub fn start_new(&mut self, context: &RoutingContext) -> Result<(), CacheError> {
        self.store.replace(create_document(context));
        self.selection = Selection::new();
        self.last_edit_at = Some(self.clock.now_millis());
        self.save()
    }

    pub fn lesson(&self) -> Arc<Lesson> {
        self.store.lesson()
    }

    pub fn current(&self) -> &Lesson {
        self.store.current()
    }

    pub fn current_slide(&self) -> usize {
        self.selection.current_slide()
    }

    pub fn current_slide_data(&self) -> Option<&Slide> {
        self.current().slide(self.selection.current_slide())
    }

    pub fn selected_element(&self) -> Option<&str> {
        self.selection.selected_element()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.store.has_unsaved_changes()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn metrics(&self) -> LessonMetrics {
        LessonMetrics::of(self.current())
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn set_current_slide(&mut self, index: usize) {
        let count = self.current().slide_count();
        self.selection.set_current_slide(index, count);
    }

    pub fn next_slide(&mut self) {
        let count = self.current().slide_count();
        self.selection.next_slide(count);
    }

    pub fn previous_slide(&mut self) {
        let count = self.current().slide_count();
        self.selection.previous_slide(count);
    }

    pub fn select_element(&mut self, element_id: impl Into<String>) {
        self.selection.select(element_id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Apply any mutation and keep the selection pointing at something real
    pub fn apply(&mut self, mutation: Mutation) -> Result<Arc<Lesson>, EditorError> {
        let removed_slide = match &mutation {
            Mutation::RemoveSlide { slide_id } => self.current().position_of_slide(slide_id),
            _ => None,
        };
        let removed_element = match &mutation {
            Mutation::RemoveElement { element_id, .. } => {
                self.selection.selected_element() == Some(element_id.as_str())
            }
            _ => false,
        };

        let doc = self.store.apply(mutation)?;
        self.touch();

        match removed_slide {
            Some(at) => self.selection.on_slide_removed(at, &doc),
            None => self.selection.reconcile(&doc),
        }
        if removed_element {
            self.selection.on_element_removed();
        }

        Ok(doc)
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

    /// Append to the current slide
    pub fn add_element(&mut self, element: ContentElement) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::AddElement {
            slide_index: self.current_slide(),
            element,
        })
    }

    pub fn add_text(&mut self, content: &str, variant: TextVariant) -> Result<Arc<Lesson>, EditorError> {
        self.add_element(ContentElement::text(content, variant))
    }

    pub fn add_image(&mut self, uri: &str) -> Result<Arc<Lesson>, EditorError> {
        self.add_element(ContentElement::image(uri))
    }

    pub fn add_expression(
        &mut self,
        latex: &str,
        display_mode: DisplayMode,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.add_element(ContentElement::expression(latex, display_mode))
    }

    pub fn add_options(
        &mut self,
        choices: Vec<String>,
        correct_answer: usize,
    ) -> Result<Arc<Lesson>, EditorError> {
        let element = ContentElement::options(choices, correct_answer)?;
        self.add_element(element)
    }

    pub fn add_carousel(
        &mut self,
        images: Vec<String>,
        arr: bool,
        show_dots: bool,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.add_element(ContentElement::carousel(images, arr, show_dots))
    }

    pub fn update_element(
        &mut self,
        element_id: &str,
        patch: ElementPatch,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::UpdateElement {
            slide_index: self.current_slide(),
            element_id: element_id.to_string(),
            patch,
        })
    }

    pub fn remove_element(&mut self, element_id: &str) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::RemoveElement {
            slide_index: self.current_slide(),
            element_id: element_id.to_string(),
        })
    }

    pub fn reorder_elements(&mut self, from: usize, to: usize) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::ReorderElements {
            slide_index: self.current_slide(),
            from,
            to,
        })
    }

    pub fn move_element(
        &mut self,
        element_id: &str,
        direction: Direction,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::MoveElement {
            slide_index: self.current_slide(),
            element_id: element_id.to_string(),
            direction,
        })
    }

    pub fn insert_element_relative(
        &mut self,
        anchor_id: &str,
        kind: ElementKind,
        position: Position,
    ) -> Result<Arc<Lesson>, EditorError> {
        self.apply(Mutation::InsertElement {
            slide_index: self.current_slide(),
            anchor_id: anchor_id.to_string(),
            element: ContentElement::default_of(kind),
            position,
        })
    }

    pub fn undo(&mut self) -> Option<Arc<Lesson>> {
        let doc = self.store.undo()?;
        self.touch();
        self.selection.reconcile(&doc);
        Some(doc)
    }

    pub fn redo(&mut self) -> Option<Arc<Lesson>> {
        let doc = self.store.redo()?;
        self.touch();
        self.selection.reconcile(&doc);
        Some(doc)
    }

    /// Write the lesson to the cache
    ///
    /// The dirty flag is only cleared when the write went through. A failed
    /// save leaves the session editable and can be retried.
    pub fn save(&mut self) -> Result<(), CacheError> {
        let doc = self.store.lesson();
        match save_lesson(
            self.cache.as_ref(),
            self.clock.as_ref(),
            &self.config.cache_key,
            &doc,
        ) {
            Ok(()) => {
                self.store.mark_saved();
                self.last_edit_at = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, lesson_id = %doc.id, "Save failed - keeping unsaved changes");
                Err(e)
            }
        }
    }

    /// Autosave once the document has been dirty for the debounce interval
    ///
    /// Returns `Ok(true)` when a save happened.
    pub fn tick(&mut self) -> Result<bool, CacheError> {
        let Some(debounce) = self.config.autosave_debounce_ms else {
            return Ok(false);
        };
        if !self.store.has_unsaved_changes() {
            return Ok(false);
        }

        let now = self.clock.now_millis();
        let settled = match self.last_edit_at {
            Some(at) => now.saturating_sub(at) >= debounce,
            None => true,
        };
        if !settled {
            return Ok(false);
        }

        debug!(debounce_ms = debounce, "Autosaving");
        self.save()?;
        Ok(true)
    }

    fn touch(&mut self) {
        self.last_edit_at = Some(self.clock.now_millis());
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("store", &self.store)
            .field("selection", &self.selection)
            .field("config", &self.config)
            .field("last_edit_at", &self.last_edit_at)
            .finish_non_exhaustive()
    }
}
