//! # Document Operations
//!
//! Pure operations over a [`Lesson`]. Each takes the current document and
//! returns a new one; the input is never touched.
//!
//! Failure policy:
//! - Inserting into something that doesn't exist is an error
//!   ([`EditorError::Index`]).
//! - Removing, moving or patching something that doesn't exist is a no-op
//!   and returns an unchanged copy.
//! - Element payloads that break their own invariants are rejected with
//!   [`EditorError::Validation`] and the document is left as it was.

use crate::errors::EditorError;
use crate::metrics::estimated_duration_minutes;
use serde::{Deserialize, Serialize};
use slidecraft_model::{
    move_item, new_id, ContentElement, Direction, ElementKind, ElementPatch, Lesson, Position,
    RoutingContext, Slide, SlideKind, TextVariant, ValidationError,
};

pub const DEFAULT_LESSON_TITLE: &str = "Untitled Lesson";
pub const STARTER_TEXT: &str = "Start writing your first slide here.";

/// Partial update for slide metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlidePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SlideKind>,
}

/// Partial update for lesson metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fresh lesson for a curriculum slot: one slide with a starter text element
pub fn create_document(context: &RoutingContext) -> Lesson {
    let slide = Slide::untitled()
        .with_element_appended(ContentElement::text(STARTER_TEXT, TextVariant::Default));

    let doc = Lesson {
        id: new_id(),
        title: DEFAULT_LESSON_TITLE.to_string(),
        description: String::new(),
        path: context.path.clone(),
        path_id: context.path_id.clone(),
        level: context.level.clone(),
        level_id: context.level_id.clone(),
        course: context.course.clone(),
        course_id: context.course_id.clone(),
        slides: vec![slide],
        duration: 0,
    }
    .reindexed();

    Lesson {
        duration: estimated_duration_minutes(&doc),
        ..doc
    }
}

/// Append an empty slide with a title from the pool
pub fn add_slide(doc: &Lesson) -> Lesson {
    append_slide(doc, Slide::untitled())
}

/// Append a prepared slide. A slide whose id is already taken is dropped.
pub fn append_slide(doc: &Lesson, slide: Slide) -> Lesson {
    if doc.slide_by_id(&slide.id).is_some() {
        return doc.clone();
    }

    let mut slides = doc.slides.clone();
    slides.push(slide);
    doc.with_slides(slides)
}

pub fn remove_slide(doc: &Lesson, slide_id: &str) -> Lesson {
    if doc.slide_by_id(slide_id).is_none() {
        return doc.clone();
    }

    let slides = doc
        .slides
        .iter()
        .filter(|slide| slide.id != slide_id)
        .cloned()
        .collect();
    doc.with_slides(slides)
}

pub fn reorder_slides(doc: &Lesson, from: usize, to: usize) -> Lesson {
    if from >= doc.slide_count() {
        return doc.clone();
    }

    let mut slides = doc.slides.clone();
    move_item(&mut slides, from, to);
    doc.with_slides(slides)
}

pub fn update_slide(doc: &Lesson, slide_id: &str, patch: &SlidePatch) -> Lesson {
    let Some(at) = doc.position_of_slide(slide_id) else {
        return doc.clone();
    };

    let mut slide = doc.slides[at].clone();
    if let Some(title) = &patch.title {
        slide.title = title.clone();
    }
    if let Some(kind) = patch.kind {
        slide.kind = kind;
    }
    doc.with_slide_at(at, slide)
}

pub fn update_details(doc: &Lesson, patch: &DetailsPatch) -> Lesson {
    let mut next = doc.clone();
    if let Some(title) = &patch.title {
        next.title = title.clone();
    }
    if let Some(description) = &patch.description {
        next.description = description.clone();
    }
    next
}

/// Append an element to the slide at `slide_index`
pub fn add_element_to_slide(
    doc: &Lesson,
    slide_index: usize,
    element: ContentElement,
) -> Result<Lesson, EditorError> {
    let slide = doc
        .slide(slide_index)
        .ok_or_else(|| EditorError::index(slide_index, doc.slide_count()))?;

    element.validate()?;
    if slide.find_element(&element.id).is_some() {
        return Err(ValidationError::DuplicateElementId {
            slide_id: slide.id.clone(),
            element_id: element.id,
        }
        .into());
    }

    let slide = slide.with_element_appended(element);
    Ok(doc.with_slide_at(slide_index, slide))
}

pub fn update_element(
    doc: &Lesson,
    slide_index: usize,
    element_id: &str,
    patch: &ElementPatch,
) -> Result<Lesson, EditorError> {
    let Some(slide) = doc.slide(slide_index) else {
        return Ok(doc.clone());
    };

    let slide = slide.with_element_patched(element_id, patch)?;
    Ok(doc.with_slide_at(slide_index, slide))
}

pub fn remove_element(doc: &Lesson, slide_index: usize, element_id: &str) -> Lesson {
    map_slide(doc, slide_index, |slide| slide.without_element(element_id))
}

pub fn reorder_elements(doc: &Lesson, slide_index: usize, from: usize, to: usize) -> Lesson {
    map_slide(doc, slide_index, |slide| slide.with_elements_reordered(from, to))
}

pub fn move_element_relative(
    doc: &Lesson,
    slide_index: usize,
    element_id: &str,
    direction: Direction,
) -> Lesson {
    map_slide(doc, slide_index, |slide| {
        slide.with_element_moved(element_id, direction)
    })
}

/// Insert a starter element of `kind` right above or below the anchor
pub fn insert_element_relative(
    doc: &Lesson,
    slide_index: usize,
    anchor_id: &str,
    kind: ElementKind,
    position: Position,
) -> Lesson {
    insert_element_at_anchor(
        doc,
        slide_index,
        anchor_id,
        ContentElement::default_of(kind),
        position,
    )
}

pub fn insert_element_at_anchor(
    doc: &Lesson,
    slide_index: usize,
    anchor_id: &str,
    element: ContentElement,
    position: Position,
) -> Lesson {
    map_slide(doc, slide_index, |slide| {
        if slide.find_element(&element.id).is_some() {
            return slide.clone();
        }
        slide.with_element_inserted(anchor_id, element, position)
    })
}

fn map_slide(doc: &Lesson, slide_index: usize, f: impl FnOnce(&Slide) -> Slide) -> Lesson {
    match doc.slide(slide_index) {
        Some(slide) => doc.with_slide_at(slide_index, f(slide)),
        None => doc.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidecraft_model::ElementBody;

    fn context() -> RoutingContext {
        RoutingContext {
            path_id: "p1".to_string(),
            path: "Algebra".to_string(),
            level_id: "l1".to_string(),
            level: "Level 1".to_string(),
            course_id: "c1".to_string(),
            course: "Expressions".to_string(),
        }
    }

    fn element_ids(doc: &Lesson, slide_index: usize) -> Vec<String> {
        doc.slides[slide_index]
            .elements()
            .iter()
            .map(|el| el.id.clone())
            .collect()
    }

    #[test]
    fn test_create_document() {
        let doc = create_document(&context());

        assert_eq!(doc.path_id, "p1");
        assert_eq!(doc.course, "Expressions");
        assert_eq!(doc.slide_count(), 1);
        assert_eq!(doc.slides[0].element_count(), 1);
        assert_eq!(doc.slides[0].index, 0);
        assert_eq!(doc.duration, 1);
        assert!(matches!(
            doc.slides[0].elements()[0].body,
            ElementBody::Text { .. }
        ));
    }

    #[test]
    fn test_add_slide_sets_index_to_position() {
        let doc = create_document(&context());
        let doc = add_slide(&add_slide(&doc));

        assert_eq!(doc.slide_count(), 3);
        assert_eq!(doc.slides[2].index, 2);
        assert!(doc.slides[2].elements.is_none());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let doc = create_document(&context());
        let before = doc.clone();
        let _ = add_slide(&doc);
        let _ = remove_slide(&doc, &doc.slides[0].id);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_unknown_slide_is_noop() {
        let doc = create_document(&context());
        assert_eq!(remove_slide(&doc, "nope"), doc);
    }

    #[test]
    fn test_reorder_slides_out_of_range_is_noop() {
        let doc = add_slide(&create_document(&context()));
        assert_eq!(reorder_slides(&doc, 5, 0), doc);
    }

    #[test]
    fn test_reorder_slides_reindexes() {
        let doc = add_slide(&add_slide(&create_document(&context())));
        let first = doc.slides[0].id.clone();

        let doc = reorder_slides(&doc, 0, 2);
        assert_eq!(doc.slides[2].id, first);
        let indices: Vec<usize> = doc.slides.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_add_element_to_missing_slide_fails() {
        let doc = create_document(&context());
        let result = add_element_to_slide(&doc, 3, ContentElement::image("a.png"));
        assert!(matches!(result, Err(EditorError::Index { index: 3, len: 1 })));
    }

    #[test]
    fn test_add_element_creates_list() {
        let doc = add_slide(&create_document(&context()));
        let doc = add_element_to_slide(&doc, 1, ContentElement::image("a.png")).unwrap();
        assert_eq!(doc.slides[1].element_count(), 1);
    }

    #[test]
    fn test_add_element_rejects_invalid_options() {
        let doc = create_document(&context());
        let mut bad = ContentElement::default_of(ElementKind::Options);
        if let ElementBody::Options { correct_answer, .. } = &mut bad.body {
            *correct_answer = 9;
        }

        let result = add_element_to_slide(&doc, 0, bad);
        assert!(matches!(result, Err(EditorError::Validation(_))));
    }

    #[test]
    fn test_update_unknown_element_is_noop() {
        let doc = create_document(&context());
        let next = update_element(&doc, 0, "nope", &ElementPatch::content("x")).unwrap();
        assert_eq!(next, doc);

        let next = update_element(&doc, 4, "nope", &ElementPatch::content("x")).unwrap();
        assert_eq!(next, doc);
    }

    #[test]
    fn test_update_element_merges_patch() {
        let doc = create_document(&context());
        let id = doc.slides[0].elements()[0].id.clone();

        let next = update_element(&doc, 0, &id, &ElementPatch::content("Hello")).unwrap();
        assert_eq!(
            next.slides[0].elements()[0].body,
            ElementBody::Text {
                content: "Hello".to_string(),
                variant: TextVariant::Default,
            }
        );
    }

    #[test]
    fn test_insert_relative_above() {
        let doc = create_document(&context());
        let anchor = doc.slides[0].elements()[0].id.clone();

        let next = insert_element_relative(&doc, 0, &anchor, ElementKind::Text, Position::Above);
        let ids = element_ids(&next, 0);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[1], anchor);
        assert_ne!(ids[0], anchor);
    }

    #[test]
    fn test_insert_relative_missing_anchor_is_noop() {
        let doc = create_document(&context());
        let next = insert_element_relative(&doc, 0, "nope", ElementKind::Image, Position::Below);
        assert_eq!(next, doc);
    }

    #[test]
    fn test_update_slide_and_details() {
        let doc = create_document(&context());
        let slide_id = doc.slides[0].id.clone();

        let doc = update_slide(
            &doc,
            &slide_id,
            &SlidePatch {
                title: Some("Warm up".to_string()),
                kind: Some(SlideKind::Qa),
            },
        );
        assert_eq!(doc.slides[0].title, "Warm up");
        assert_eq!(doc.slides[0].kind, SlideKind::Qa);

        let doc = update_details(
            &doc,
            &DetailsPatch {
                title: Some("Finding Unknowns".to_string()),
                description: None,
            },
        );
        assert_eq!(doc.title, "Finding Unknowns");
        assert_eq!(doc.description, "");
    }
}
