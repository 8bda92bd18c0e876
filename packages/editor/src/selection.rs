//! Transient editor focus: which slide is showing and which element is
//! selected. Never persisted.

use slidecraft_model::Lesson;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current_slide: usize,
    selected_element: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn selected_element(&self) -> Option<&str> {
        self.selected_element.as_deref()
    }

    /// Move to `index`, clamped to `[0, slide_count - 1]`
    pub fn set_current_slide(&mut self, index: usize, slide_count: usize) {
        self.current_slide = index.min(slide_count.saturating_sub(1));
    }

    pub fn next_slide(&mut self, slide_count: usize) {
        self.set_current_slide(self.current_slide + 1, slide_count);
    }

    pub fn previous_slide(&mut self, slide_count: usize) {
        self.set_current_slide(self.current_slide.saturating_sub(1), slide_count);
    }

    /// Select an element by id. Ids not on the current slide are accepted
    /// and simply have nothing to highlight.
    pub fn select(&mut self, element_id: impl Into<String>) {
        self.selected_element = Some(element_id.into());
    }

    pub fn clear(&mut self) {
        self.selected_element = None;
    }

    /// Keep the selection valid after slides were removed or reordered
    pub fn reconcile(&mut self, doc: &Lesson) {
        let count = doc.slide_count();
        if self.current_slide >= count {
            self.current_slide = count.saturating_sub(1);
            self.selected_element = None;
        }
    }

    /// Called after a slide was removed; `removed_at` is where it used to be
    pub fn on_slide_removed(&mut self, removed_at: usize, doc: &Lesson) {
        if removed_at == self.current_slide {
            self.selected_element = None;
        } else if removed_at < self.current_slide {
            self.current_slide -= 1;
        }
        self.reconcile(doc);
    }

    pub fn on_element_removed(&mut self) {
        self.selected_element = None;
    }
}
