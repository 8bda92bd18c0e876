use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Structural problems in elements, slides or whole lessons
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Options need at least {required} filled choices, found {found}")]
    TooFewChoices { required: usize, found: usize },

    #[error("Correct answer {index} is out of range for {len} choices")]
    CorrectAnswerOutOfRange { index: usize, len: usize },

    #[error("Duplicate slide id: {0}")]
    DuplicateSlideId(String),

    #[error("Duplicate element id {element_id} in slide {slide_id}")]
    DuplicateElementId {
        slide_id: String,
        element_id: String,
    },
}

impl ValidationError {
    pub fn too_few_choices(found: usize) -> Self {
        Self::TooFewChoices {
            required: crate::element::MIN_CHOICES,
            found,
        }
    }

    pub fn correct_answer_out_of_range(index: usize, len: usize) -> Self {
        Self::CorrectAnswerOutOfRange { index, len }
    }
}

/// Returned when an element type name is not one of the known variants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown element type: {0}")]
pub struct UnknownElementType(pub String);

/// Returned when a name doesn't match any variant of a plain enum
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{value}', expected one of: {expected}")]
pub struct UnknownKeyword {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl UnknownKeyword {
    pub fn new<'a>(
        kind: &'static str,
        value: &str,
        expected: impl Iterator<Item = &'a str>,
    ) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.collect::<Vec<_>>().join(", "),
        }
    }
}
