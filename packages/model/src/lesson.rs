use crate::element::ContentElement;
use crate::error::{ValidationError, ValidationResult};
use crate::slide::Slide;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Curriculum placement of a lesson, supplied by navigation at session start
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutingContext {
    pub path_id: String,
    pub path: String,
    pub level_id: String,
    pub level: String,
    pub course_id: String,
    pub course: String,
}

/// The authored document: ordered slides plus curriculum metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub path_id: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub level_id: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub course_id: String,

    /// Learner-facing order
    pub slides: Vec<Slide>,

    /// Minutes, as stored by older documents. Live value comes from metrics.
    #[serde(default)]
    pub duration: u32,
}

impl Lesson {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slide_by_id(&self, slide_id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == slide_id)
    }

    pub fn position_of_slide(&self, slide_id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == slide_id)
    }

    pub fn element_count(&self) -> usize {
        self.slides.iter().map(Slide::element_count).sum()
    }

    pub fn context(&self) -> RoutingContext {
        RoutingContext {
            path_id: self.path_id.clone(),
            path: self.path.clone(),
            level_id: self.level_id.clone(),
            level: self.level.clone(),
            course_id: self.course_id.clone(),
            course: self.course.clone(),
        }
    }

    /// Copy with a new slide list, every `index` reset to its position
    pub fn with_slides(&self, slides: Vec<Slide>) -> Self {
        Self {
            slides,
            ..self.clone()
        }
        .reindexed()
    }

    /// Copy with slide `index` replaced. Out-of-range indices are ignored.
    pub fn with_slide_at(&self, index: usize, slide: Slide) -> Self {
        if index >= self.slides.len() {
            return self.clone();
        }
        let mut next = self.clone();
        next.slides[index] = slide;
        next
    }

    pub fn reindexed(mut self) -> Self {
        for (position, slide) in self.slides.iter_mut().enumerate() {
            slide.index = position;
        }
        self
    }

    /// Check id uniqueness and element invariants
    pub fn validate(&self) -> ValidationResult<()> {
        let mut slide_ids = HashSet::new();

        for slide in &self.slides {
            if !slide_ids.insert(slide.id.as_str()) {
                return Err(ValidationError::DuplicateSlideId(slide.id.clone()));
            }

            // Explanations share the slide's id space with top-level elements
            let mut element_ids = HashSet::new();
            claim_element_ids(&slide.id, slide.elements(), &mut element_ids)?;
            for element in slide.elements() {
                element.validate()?;
            }
        }

        Ok(())
    }
}

fn claim_element_ids<'a>(
    slide_id: &str,
    elements: &'a [ContentElement],
    seen: &mut HashSet<&'a str>,
) -> ValidationResult<()> {
    for element in elements {
        if !seen.insert(element.id.as_str()) {
            return Err(ValidationError::DuplicateElementId {
                slide_id: slide_id.to_string(),
                element_id: element.id.clone(),
            });
        }
        claim_element_ids(slide_id, element.explanations(), seen)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementBody, Layout, TextVariant};
    use crate::slide::SlideKind;

    fn lesson(slides: Vec<Slide>) -> Lesson {
        Lesson {
            id: "lesson-1".to_string(),
            title: "Building Expressions".to_string(),
            description: String::new(),
            path: "Path".to_string(),
            path_id: "p1".to_string(),
            level: "Level 1".to_string(),
            level_id: "l1".to_string(),
            course: "Course".to_string(),
            course_id: "c1".to_string(),
            slides,
            duration: 0,
        }
    }

    #[test]
    fn test_with_slides_reindexes() {
        let mut a = Slide::new("A", SlideKind::Info);
        a.index = 7;
        let b = Slide::new("B", SlideKind::Qa);

        let doc = lesson(vec![]).with_slides(vec![b, a]);
        assert_eq!(doc.slides[0].index, 0);
        assert_eq!(doc.slides[1].index, 1);
        assert_eq!(doc.slides[1].title, "A");
    }

    #[test]
    fn test_validate_rejects_duplicate_slide_ids() {
        let a = Slide::new("A", SlideKind::Info);
        let doc = lesson(vec![a.clone(), a.clone()]);
        assert_eq!(doc.validate(), Err(ValidationError::DuplicateSlideId(a.id)));
    }

    #[test]
    fn test_validate_rejects_duplicate_element_ids() {
        let el = ContentElement::text("x", TextVariant::Default);
        let slide = Slide::new("A", SlideKind::Info)
            .with_element_appended(el.clone())
            .with_element_appended(el.clone());
        let doc = lesson(vec![slide.clone()]);

        assert_eq!(
            doc.validate(),
            Err(ValidationError::DuplicateElementId {
                slide_id: slide.id,
                element_id: el.id,
            })
        );
    }

    #[test]
    fn test_validate_checks_explanation_ids() {
        let explanation = ContentElement::text("Because", TextVariant::Caption);
        let options = ContentElement::new(
            ElementBody::Options {
                choices: vec!["a".to_string(), "b".to_string()],
                correct_answer: 0,
                why: vec![explanation.clone()],
            },
            Layout::default(),
        );

        let ok = Slide::new("A", SlideKind::Qa).with_element_appended(options.clone());
        assert_eq!(lesson(vec![ok]).validate(), Ok(()));

        let clash = Slide::new("A", SlideKind::Qa)
            .with_element_appended(explanation.clone())
            .with_element_appended(options);
        assert_eq!(
            lesson(vec![clash.clone()]).validate(),
            Err(ValidationError::DuplicateElementId {
                slide_id: clash.id,
                element_id: explanation.id,
            })
        );
    }

    #[test]
    fn test_camel_case_fields() {
        let json = serde_json::to_value(lesson(vec![])).unwrap();
        assert_eq!(json["pathId"], "p1");
        assert_eq!(json["levelId"], "l1");
        assert_eq!(json["courseId"], "c1");
    }

    #[test]
    fn test_context_round_trip() {
        let doc = lesson(vec![]);
        let ctx = doc.context();
        assert_eq!(ctx.path_id, "p1");
        assert_eq!(ctx.course, "Course");
    }
}
