//! # Content Elements
//!
//! A slide is built from typed content elements. The set of variants is
//! closed; every element also carries shared layout attributes.
//!
//! Serialized shape (variant fields and layout share one flat object):
//!
//! ```text
//! { "id": "..", "type": "text", "content": "..", "variant": "default",
//!   "width": "fill", "align": "left", "topSpace": 4 }
//! ```

use crate::error::{UnknownElementType, ValidationError, ValidationResult};
use crate::id::new_id;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound for `topSpace` / `bottomSpace`
pub const MAX_SPACING: u8 = 24;

/// Minimum number of filled choices an options element needs
pub const MIN_CHOICES: usize = 2;

pub const PLACEHOLDER_IMAGE_URI: &str =
    "https://adaptcommunitynetwork.org/wp-content/uploads/2022/01/ef3-placeholder-image.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    #[default]
    Fill,
    Hug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextVariant {
    Bold,
    #[default]
    Default,
    Caption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Inline,
    Block,
}

/// Layout attributes shared by every element
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default)]
    pub width: Width,

    #[serde(default)]
    pub align: Align,

    #[serde(
        default,
        deserialize_with = "clamped_spacing",
        skip_serializing_if = "Option::is_none"
    )]
    pub top_space: Option<u8>,

    #[serde(
        default,
        deserialize_with = "clamped_spacing",
        skip_serializing_if = "Option::is_none"
    )]
    pub bottom_space: Option<u8>,
}

impl Layout {
    pub fn new(width: Width, align: Align) -> Self {
        Self {
            width,
            align,
            top_space: None,
            bottom_space: None,
        }
    }

    pub fn with_top_space(mut self, space: u8) -> Self {
        self.top_space = Some(clamp_spacing(space));
        self
    }

    pub fn with_bottom_space(mut self, space: u8) -> Self {
        self.bottom_space = Some(clamp_spacing(space));
        self
    }
}

pub fn clamp_spacing(space: u8) -> u8 {
    space.min(MAX_SPACING)
}

/// Stored spacing outside `0..=MAX_SPACING` is clamped on read
fn clamped_spacing<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let space = Option::<i64>::deserialize(deserializer)?;
    Ok(space.map(|s| s.clamp(0, i64::from(MAX_SPACING)) as u8))
}

/// Variant-specific payload, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementBody {
    Text {
        content: String,
        #[serde(default)]
        variant: TextVariant,
    },

    Image {
        uri: String,
    },

    #[serde(rename_all = "camelCase")]
    Expression {
        latex: String,
        #[serde(default)]
        display_mode: DisplayMode,
    },

    /// Multiple choice. `why` holds optional explanation elements shown
    /// once the learner has answered.
    #[serde(rename_all = "camelCase")]
    Options {
        choices: Vec<String>,
        correct_answer: usize,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        why: Vec<ContentElement>,
    },

    #[serde(rename_all = "camelCase")]
    Carousel {
        images: Vec<String>,
        #[serde(default)]
        arr: bool,
        #[serde(default)]
        show_dots: bool,
    },
}

impl ElementBody {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementBody::Text { .. } => ElementKind::Text,
            ElementBody::Image { .. } => ElementKind::Image,
            ElementBody::Expression { .. } => ElementKind::Expression,
            ElementBody::Options { .. } => ElementKind::Options,
            ElementBody::Carousel { .. } => ElementKind::Carousel,
        }
    }
}

/// A typed unit of slide content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentElement {
    pub id: String,

    #[serde(flatten)]
    pub body: ElementBody,

    #[serde(flatten)]
    pub layout: Layout,
}

/// Element type names, used when the caller only knows the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Expression,
    Options,
    Carousel,
}

impl ElementKind {
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Expression,
        ElementKind::Options,
        ElementKind::Carousel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Expression => "expression",
            ElementKind::Options => "options",
            ElementKind::Carousel => "carousel",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = UnknownElementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownElementType(s.to_string()))
    }
}

impl ContentElement {
    /// Wrap a body with a fresh id
    pub fn new(body: ElementBody, layout: Layout) -> Self {
        Self {
            id: new_id(),
            body,
            layout,
        }
    }

    pub fn text(content: impl Into<String>, variant: TextVariant) -> Self {
        let mut content = content.into();
        if content.is_empty() {
            content = match variant {
                TextVariant::Bold => "Bold text",
                _ => "Enter text",
            }
            .to_string();
        }

        Self::new(
            ElementBody::Text { content, variant },
            Layout::new(Width::Fill, Align::Left),
        )
    }

    pub fn image(uri: impl Into<String>) -> Self {
        Self::new(
            ElementBody::Image { uri: uri.into() },
            Layout::new(Width::Fill, Align::Center),
        )
    }

    pub fn expression(latex: impl Into<String>, display_mode: DisplayMode) -> Self {
        Self::new(
            ElementBody::Expression {
                latex: latex.into(),
                display_mode,
            },
            Layout::new(Width::Fill, Align::Center),
        )
    }

    /// Build a multiple-choice element, rejecting malformed choice lists
    pub fn options(choices: Vec<String>, correct_answer: usize) -> ValidationResult<Self> {
        validate_options(&choices, correct_answer)?;

        Ok(Self::new(
            ElementBody::Options {
                choices,
                correct_answer,
                why: Vec::new(),
            },
            Layout::new(Width::Fill, Align::Center),
        ))
    }

    pub fn carousel(images: Vec<String>, arr: bool, show_dots: bool) -> Self {
        Self::new(
            ElementBody::Carousel {
                images,
                arr,
                show_dots,
            },
            Layout::new(Width::Fill, Align::Center),
        )
    }

    /// Starter element of the given kind, as inserted next to an anchor
    pub fn default_of(kind: ElementKind) -> Self {
        let body = match kind {
            ElementKind::Text => ElementBody::Text {
                content: "New text".to_string(),
                variant: TextVariant::Default,
            },
            ElementKind::Image => ElementBody::Image {
                uri: PLACEHOLDER_IMAGE_URI.to_string(),
            },
            ElementKind::Expression => ElementBody::Expression {
                latex: String::new(),
                display_mode: DisplayMode::Inline,
            },
            ElementKind::Options => ElementBody::Options {
                choices: vec!["Option 1".to_string(), "Option 2".to_string()],
                correct_answer: 0,
                why: Vec::new(),
            },
            ElementKind::Carousel => ElementBody::Carousel {
                images: Vec::new(),
                arr: true,
                show_dots: true,
            },
        };

        Self::new(body, Layout::new(Width::Fill, Align::Left))
    }

    pub fn kind(&self) -> ElementKind {
        self.body.kind()
    }

    /// Explanation elements nested under an options element
    pub fn explanations(&self) -> &[ContentElement] {
        match &self.body {
            ElementBody::Options { why, .. } => why,
            _ => &[],
        }
    }

    /// Re-check invariants that construction enforces
    pub fn validate(&self) -> ValidationResult<()> {
        if let ElementBody::Options {
            choices,
            correct_answer,
            why,
        } = &self.body
        {
            validate_options(choices, *correct_answer)?;
            for explanation in why {
                explanation.validate()?;
            }
        }
        Ok(())
    }

    /// Merge a partial update into a copy of this element
    ///
    /// Variant fields that don't belong to this element's kind are ignored.
    /// The id is never touched.
    pub fn patched(&self, patch: &ElementPatch) -> ValidationResult<Self> {
        let mut next = self.clone();

        if let Some(width) = patch.width {
            next.layout.width = width;
        }
        if let Some(align) = patch.align {
            next.layout.align = align;
        }
        if let Some(space) = patch.top_space {
            next.layout.top_space = Some(clamp_spacing(space));
        }
        if let Some(space) = patch.bottom_space {
            next.layout.bottom_space = Some(clamp_spacing(space));
        }

        match &mut next.body {
            ElementBody::Text { content, variant } => {
                set_if(content, &patch.content);
                set_if(variant, &patch.variant);
            }
            ElementBody::Image { uri } => {
                set_if(uri, &patch.uri);
            }
            ElementBody::Expression {
                latex,
                display_mode,
            } => {
                set_if(latex, &patch.latex);
                set_if(display_mode, &patch.display_mode);
            }
            ElementBody::Options {
                choices,
                correct_answer,
                why,
            } => {
                set_if(choices, &patch.choices);
                set_if(correct_answer, &patch.correct_answer);
                set_if(why, &patch.why);
            }
            ElementBody::Carousel {
                images,
                arr,
                show_dots,
            } => {
                set_if(images, &patch.images);
                set_if(arr, &patch.arr);
                set_if(show_dots, &patch.show_dots);
            }
        }

        next.validate()?;
        Ok(next)
    }
}

fn set_if<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

fn validate_options(choices: &[String], correct_answer: usize) -> ValidationResult<()> {
    let filled = choices.iter().filter(|c| !c.trim().is_empty()).count();
    if filled < MIN_CHOICES {
        return Err(ValidationError::too_few_choices(filled));
    }

    if correct_answer >= choices.len() {
        return Err(ValidationError::correct_answer_out_of_range(
            correct_answer,
            choices.len(),
        ));
    }

    Ok(())
}

/// Partial update for an element
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Width>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(deserialize_with = "clamped_spacing", skip_serializing_if = "Option::is_none")]
    pub top_space: Option<u8>,
    #[serde(deserialize_with = "clamped_spacing", skip_serializing_if = "Option::is_none")]
    pub bottom_space: Option<u8>,

    // text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<TextVariant>,

    // image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    // expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<DisplayMode>,

    // options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why: Option<Vec<ContentElement>>,

    // carousel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arr: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_dots: Option<bool>,
}

impl ElementPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn align(align: Align) -> Self {
        Self {
            align: Some(align),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
