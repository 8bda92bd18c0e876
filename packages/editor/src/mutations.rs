//! # Lesson Mutations
//!
//! Serializable editing intents. A mutation carries every generated value it
//! needs (new ids, titles, starter elements), so applying the same mutation
//! to the same document always gives the same result.
//!
//! ## Semantics
//!
//! ### AddSlide / RemoveSlide / ReorderSlides
//! - Slides are reindexed after every change to the list
//! - Removing an unknown slide or moving from an out-of-range index is a no-op
//!
//! ### AddElement
//! - Fails if the target slide doesn't exist
//! - Fails if the element breaks its own invariants
//!
//! ### UpdateElement / RemoveElement / MoveElement / InsertElement
//! - Unknown element or anchor ids are no-ops
//! - Patches that break an options element are rejected

use crate::document::{self, DetailsPatch, SlidePatch};
use crate::errors::EditorError;
use serde::{Deserialize, Serialize};
use slidecraft_model::{ContentElement, Direction, ElementPatch, Lesson, Position, Slide};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Mutation {
    AddSlide {
        slide: Slide,
    },

    #[serde(rename_all = "camelCase")]
    RemoveSlide {
        slide_id: String,
    },

    ReorderSlides {
        from: usize,
        to: usize,
    },

    #[serde(rename_all = "camelCase")]
    UpdateSlide {
        slide_id: String,
        patch: SlidePatch,
    },

    UpdateDetails {
        patch: DetailsPatch,
    },

    #[serde(rename_all = "camelCase")]
    AddElement {
        slide_index: usize,
        element: ContentElement,
    },

    #[serde(rename_all = "camelCase")]
    UpdateElement {
        slide_index: usize,
        element_id: String,
        patch: ElementPatch,
    },

    #[serde(rename_all = "camelCase")]
    RemoveElement {
        slide_index: usize,
        element_id: String,
    },

    #[serde(rename_all = "camelCase")]
    ReorderElements {
        slide_index: usize,
        from: usize,
        to: usize,
    },

    #[serde(rename_all = "camelCase")]
    MoveElement {
        slide_index: usize,
        element_id: String,
        direction: Direction,
    },

    #[serde(rename_all = "camelCase")]
    InsertElement {
        slide_index: usize,
        anchor_id: String,
        element: ContentElement,
        position: Position,
    },
}

impl Mutation {
    /// Apply to a document, producing the next document
    pub fn apply(&self, doc: &Lesson) -> Result<Lesson, EditorError> {
        let next = match self {
            Mutation::AddSlide { slide } => document::append_slide(doc, slide.clone()),

            Mutation::RemoveSlide { slide_id } => document::remove_slide(doc, slide_id),

            Mutation::ReorderSlides { from, to } => document::reorder_slides(doc, *from, *to),

            Mutation::UpdateSlide { slide_id, patch } => {
                document::update_slide(doc, slide_id, patch)
            }

            Mutation::UpdateDetails { patch } => document::update_details(doc, patch),

            Mutation::AddElement {
                slide_index,
                element,
            } => document::add_element_to_slide(doc, *slide_index, element.clone())?,

            Mutation::UpdateElement {
                slide_index,
                element_id,
                patch,
            } => document::update_element(doc, *slide_index, element_id, patch)?,

            Mutation::RemoveElement {
                slide_index,
                element_id,
            } => document::remove_element(doc, *slide_index, element_id),

            Mutation::ReorderElements {
                slide_index,
                from,
                to,
            } => document::reorder_elements(doc, *slide_index, *from, *to),

            Mutation::MoveElement {
                slide_index,
                element_id,
                direction,
            } => document::move_element_relative(doc, *slide_index, element_id, *direction),

            Mutation::InsertElement {
                slide_index,
                anchor_id,
                element,
                position,
            } => document::insert_element_at_anchor(
                doc,
                *slide_index,
                anchor_id,
                element.clone(),
                *position,
            ),
        };

        Ok(next)
    }

    /// Short name for logs and history descriptions
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddSlide { .. } => "add slide",
            Mutation::RemoveSlide { .. } => "remove slide",
            Mutation::ReorderSlides { .. } => "reorder slides",
            Mutation::UpdateSlide { .. } => "update slide",
            Mutation::UpdateDetails { .. } => "update details",
            Mutation::AddElement { .. } => "add element",
            Mutation::UpdateElement { .. } => "update element",
            Mutation::RemoveElement { .. } => "remove element",
            Mutation::ReorderElements { .. } => "reorder elements",
            Mutation::MoveElement { .. } => "move element",
            Mutation::InsertElement { .. } => "insert element",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidecraft_model::{ElementKind, RoutingContext, TextVariant};

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::MoveElement {
            slide_index: 2,
            element_id: "el-1".to_string(),
            direction: Direction::Up,
        };

        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "moveElement",
                "slideIndex": 2,
                "elementId": "el-1",
                "direction": "up"
            })
        );

        let back: Mutation = serde_json::from_value(json).unwrap();
        assert_eq!(back, mutation);
    }

    #[test]
    fn test_apply_is_deterministic() {
        let doc = document::create_document(&RoutingContext::default());
        let mutation = Mutation::AddElement {
            slide_index: 0,
            element: ContentElement::text("Hi", TextVariant::Bold),
        };

        let a = mutation.apply(&doc).unwrap();
        let b = mutation.apply(&doc).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_add_element_twice_is_rejected() {
        let doc = document::create_document(&RoutingContext::default());
        let mutation = Mutation::AddElement {
            slide_index: 0,
            element: ContentElement::default_of(ElementKind::Carousel),
        };

        let once = mutation.apply(&doc).unwrap();
        assert!(matches!(
            mutation.apply(&once),
            Err(EditorError::Validation(_))
        ));
    }

    #[test]
    fn test_add_to_missing_slide_is_index_error() {
        let doc = document::create_document(&RoutingContext::default());
        let mutation = Mutation::AddElement {
            slide_index: 1,
            element: ContentElement::image("a.png"),
        };

        assert!(matches!(
            mutation.apply(&doc),
            Err(EditorError::Index { index: 1, len: 1 })
        ));
    }
}
