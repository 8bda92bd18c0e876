//! # Slides
//!
//! A slide is one screen of a lesson: an ordered list of elements plus a
//! title and a kind. Every helper here returns a new slide; a helper whose
//! precondition doesn't hold hands back an unchanged copy.

use crate::element::{ContentElement, ElementPatch};
use crate::error::ValidationResult;
use crate::id::{new_id, pick_title};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    #[default]
    Info,
    Qa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Above,
    Below,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// `None` until the first element is added
    pub elements: Option<Vec<ContentElement>>,

    /// Display hint; recomputed from list position by the lesson
    #[serde(default)]
    pub index: usize,

    #[serde(rename = "type", default)]
    pub kind: SlideKind,
}

/// Remove the item at `from` and reinsert it at `to`
///
/// An out-of-range `from` leaves the list alone; `to` is clamped to the end
/// of the shortened list.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

impl Slide {
    pub fn new(title: impl Into<String>, kind: SlideKind) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            elements: None,
            index: 0,
            kind,
        }
    }

    /// Empty info slide with a title from the pool
    pub fn untitled() -> Self {
        Self::new(pick_title(), SlideKind::Info)
    }

    pub fn elements(&self) -> &[ContentElement] {
        self.elements.as_deref().unwrap_or(&[])
    }

    pub fn element_count(&self) -> usize {
        self.elements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    pub fn find_element(&self, element_id: &str) -> Option<&ContentElement> {
        self.elements().iter().find(|el| el.id == element_id)
    }

    pub fn position_of(&self, element_id: &str) -> Option<usize> {
        self.elements().iter().position(|el| el.id == element_id)
    }

    fn with_elements(&self, elements: Vec<ContentElement>) -> Self {
        Self {
            elements: Some(elements),
            ..self.clone()
        }
    }

    pub fn with_element_appended(&self, element: ContentElement) -> Self {
        let mut elements = self.elements().to_vec();
        elements.push(element);
        self.with_elements(elements)
    }

    pub fn without_element(&self, element_id: &str) -> Self {
        if self.position_of(element_id).is_none() {
            return self.clone();
        }

        let elements = self
            .elements()
            .iter()
            .filter(|el| el.id != element_id)
            .cloned()
            .collect();
        self.with_elements(elements)
    }

    pub fn with_elements_reordered(&self, from: usize, to: usize) -> Self {
        if from >= self.element_count() {
            return self.clone();
        }

        let mut elements = self.elements().to_vec();
        move_item(&mut elements, from, to);
        self.with_elements(elements)
    }

    /// Swap with the neighbour in `direction`; no-op at the boundary
    pub fn with_element_moved(&self, element_id: &str, direction: Direction) -> Self {
        let Some(current) = self.position_of(element_id) else {
            return self.clone();
        };

        let target = match direction {
            Direction::Up if current > 0 => current - 1,
            Direction::Down if current + 1 < self.element_count() => current + 1,
            _ => return self.clone(),
        };

        let mut elements = self.elements().to_vec();
        elements.swap(current, target);
        self.with_elements(elements)
    }

    pub fn with_element_inserted(
        &self,
        anchor_id: &str,
        element: ContentElement,
        position: Position,
    ) -> Self {
        let Some(anchor) = self.position_of(anchor_id) else {
            return self.clone();
        };

        let at = match position {
            Position::Above => anchor,
            Position::Below => anchor + 1,
        };

        let mut elements = self.elements().to_vec();
        elements.insert(at, element);
        self.with_elements(elements)
    }

    /// Patch one element by id. Unknown ids leave the slide untouched.
    pub fn with_element_patched(
        &self,
        element_id: &str,
        patch: &ElementPatch,
    ) -> ValidationResult<Self> {
        let Some(at) = self.position_of(element_id) else {
            return Ok(self.clone());
        };

        let mut elements = self.elements().to_vec();
        elements[at] = elements[at].patched(patch)?;
        Ok(self.with_elements(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, TextVariant};

    fn slide_with(n: usize) -> Slide {
        let mut slide = Slide::new("Test", SlideKind::Info);
        for i in 0..n {
            let mut el = ContentElement::text(format!("el {}", i), TextVariant::Default);
            el.id = format!("el-{}", i);
            slide = slide.with_element_appended(el);
        }
        slide
    }

    fn ids(slide: &Slide) -> Vec<&str> {
        slide.elements().iter().map(|el| el.id.as_str()).collect()
    }

    #[test]
    fn test_append_creates_list() {
        let slide = Slide::new("Empty", SlideKind::Qa);
        assert!(slide.elements.is_none());

        let slide = slide.with_element_appended(ContentElement::default_of(ElementKind::Text));
        assert_eq!(slide.element_count(), 1);
    }

    #[test]
    fn test_move_item_semantics() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        move_item(&mut items, 0, 2);
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);

        move_item(&mut items, 1, 99);
        assert_eq!(items, vec!['b', 'a', 'd', 'c']);

        move_item(&mut items, 7, 0);
        assert_eq!(items, vec!['b', 'a', 'd', 'c']);
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let slide = slide_with(3);
        assert_eq!(slide.with_element_moved("el-0", Direction::Up), slide);
        assert_eq!(slide.with_element_moved("el-2", Direction::Down), slide);
        assert_eq!(slide.with_element_moved("missing", Direction::Down), slide);
    }

    #[test]
    fn test_move_swaps_neighbours() {
        let slide = slide_with(3);
        let moved = slide.with_element_moved("el-1", Direction::Up);
        assert_eq!(ids(&moved), vec!["el-1", "el-0", "el-2"]);

        let moved = slide.with_element_moved("el-1", Direction::Down);
        assert_eq!(ids(&moved), vec!["el-0", "el-2", "el-1"]);
    }

    #[test]
    fn test_insert_relative_to_anchor() {
        let slide = slide_with(2);

        let mut above = ContentElement::default_of(ElementKind::Image);
        above.id = "new".to_string();
        let result = slide.with_element_inserted("el-1", above, Position::Above);
        assert_eq!(ids(&result), vec!["el-0", "new", "el-1"]);

        let mut below = ContentElement::default_of(ElementKind::Image);
        below.id = "new".to_string();
        let result = slide.with_element_inserted("el-1", below, Position::Below);
        assert_eq!(ids(&result), vec!["el-0", "el-1", "new"]);

        let orphan = ContentElement::default_of(ElementKind::Image);
        assert_eq!(slide.with_element_inserted("nope", orphan, Position::Below), slide);
    }

    #[test]
    fn test_remove_missing_element_is_noop() {
        let slide = slide_with(2);
        assert_eq!(slide.without_element("nope"), slide);
        assert_eq!(ids(&slide.without_element("el-0")), vec!["el-1"]);
    }

    #[test]
    fn test_slide_serializes_kind_as_type() {
        let mut slide = Slide::new("Summary", SlideKind::Qa);
        slide.id = "1".to_string();

        let json = serde_json::to_value(&slide).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "title": "Summary",
                "elements": null,
                "index": 0,
                "type": "qa"
            })
        );
    }
}
