//! The in-memory presentation model.
//!
//! A deck is an opaque byte blob to every layer except this one: callers hand
//! bytes in, this module parses and validates them, and the builder mutates
//! the parsed model. Nothing here does file or network I/O.

pub mod geometry;
pub mod style;

use serde::{Deserialize, Serialize};

pub use geometry::{Emu, Rect, SlideSize};
pub use style::{Align, Border, Color, TextStyle};

use crate::errors::PresentationError;

/// One styled line inside a text box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub style: TextStyle,
}

impl TextLine {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        TextLine { text: text.into(), style }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    TextBox {
        lines: Vec<TextLine>,
        #[serde(default)]
        align: Align,
        #[serde(default)]
        fill: Option<Color>,
        #[serde(default)]
        border: Option<Border>,
    },
    /// Opaque asset reference. The model never decodes image bytes; the
    /// renderer resolves the reference when producing viewable output.
    Picture { asset: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub frame: Rect,
    pub kind: ShapeKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Slide {
    pub fn named(name: impl Into<String>) -> Self {
        Slide { name: Some(name.into()), shapes: Vec::new() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub size: SlideSize,
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Parse serialized deck bytes. Empty input, unparseable JSON, a deck
    /// with no slides, or a non-positive page size all refuse to load.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, PresentationError> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(PresentationError::EmptyInput);
        }
        let deck: Deck = serde_json::from_slice(bytes)
            .map_err(|err| PresentationError::Malformed { reason: err.to_string() })?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn to_json_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }

    /// The checks the builder repeats before mutating a deck it was handed
    /// in memory.
    pub fn validate(&self) -> Result<(), PresentationError> {
        if !self.size.is_positive() {
            return Err(PresentationError::InvalidDimensions {
                width: self.size.width.0,
                height: self.size.height.0,
            });
        }
        if self.slides.is_empty() {
            return Err(PresentationError::NoSlides);
        }
        Ok(())
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Position-preserving insert; slides at `index` and beyond shift right.
    pub fn insert_slide(&mut self, index: usize, slide: Slide) {
        self.slides.insert(index, slide);
    }
}
