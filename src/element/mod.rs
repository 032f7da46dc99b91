use std::fmt;

use egui::{Color32, Pos2, Rect, Vec2};

mod common;
pub(crate) mod image;
pub(crate) mod shape;
pub(crate) mod text;

pub use common::MIN_ELEMENT_SIZE;
pub use image::Image;
pub use shape::{Shape, ShapeKind};
pub use text::{FixedTextMetrics, Text, TextMetrics};

use crate::error::ElementError;
use crate::widgets::Handle;

/// Unique identifier of a design element within a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Common trait that all design elements implement.
///
/// Geometry is expressed in canvas coordinates: (0, 0) is the top-left corner
/// of the printable canvas, independent of where the canvas sits on screen.
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> ElementId;

    /// Get the element type as a string
    fn element_type(&self) -> &'static str;

    /// Get the bounding rectangle for this element
    fn rect(&self) -> Rect;

    /// Test if the element contains the given position
    fn hit_test(&self, pos: Pos2) -> bool;

    /// Translate the element by the given delta
    fn translate(&mut self, delta: Vec2);

    /// Resize the element to the new rectangle
    fn resize(&mut self, new_rect: Rect) -> Result<(), ElementError>;

    /// Resize handles shown while the element is selected
    fn handles(&self) -> &'static [Handle];

    /// Top-left corner of the bounding rectangle
    fn position(&self) -> Pos2 {
        self.rect().min
    }
}

/// One placed text, shape or image item on the canvas
#[derive(Clone, Debug, PartialEq)]
pub enum DesignElement {
    Text(Text),
    Shape(Shape),
    Image(Image),
}

impl DesignElement {
    /// Fill/text colour, if the element has one
    pub fn color(&self) -> Option<Color32> {
        match self {
            DesignElement::Text(t) => Some(t.color()),
            DesignElement::Shape(s) => Some(s.color()),
            DesignElement::Image(_) => None,
        }
    }

    /// Recolour the element. Returns false for elements without a colour.
    pub fn set_color(&mut self, color: Color32) -> bool {
        match self {
            DesignElement::Text(t) => {
                t.set_color(color);
                true
            }
            DesignElement::Shape(s) => {
                s.set_color(color);
                true
            }
            DesignElement::Image(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            DesignElement::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            DesignElement::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Source key of an image element
    pub fn image_source(&self) -> Option<&str> {
        match self {
            DesignElement::Image(i) => Some(i.source_key()),
            _ => None,
        }
    }
}

impl Element for DesignElement {
    fn id(&self) -> ElementId {
        match self {
            DesignElement::Text(t) => t.id(),
            DesignElement::Shape(s) => s.id(),
            DesignElement::Image(i) => i.id(),
        }
    }

    fn element_type(&self) -> &'static str {
        match self {
            DesignElement::Text(t) => t.element_type(),
            DesignElement::Shape(s) => s.element_type(),
            DesignElement::Image(i) => i.element_type(),
        }
    }

    fn rect(&self) -> Rect {
        match self {
            DesignElement::Text(t) => t.rect(),
            DesignElement::Shape(s) => s.rect(),
            DesignElement::Image(i) => i.rect(),
        }
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        match self {
            DesignElement::Text(t) => t.hit_test(pos),
            DesignElement::Shape(s) => s.hit_test(pos),
            DesignElement::Image(i) => i.hit_test(pos),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            DesignElement::Text(t) => t.translate(delta),
            DesignElement::Shape(s) => s.translate(delta),
            DesignElement::Image(i) => i.translate(delta),
        }
    }

    fn resize(&mut self, new_rect: Rect) -> Result<(), ElementError> {
        match self {
            DesignElement::Text(t) => t.resize(new_rect),
            DesignElement::Shape(s) => s.resize(new_rect),
            DesignElement::Image(i) => i.resize(new_rect),
        }
    }

    fn handles(&self) -> &'static [Handle] {
        match self {
            DesignElement::Text(t) => t.handles(),
            DesignElement::Shape(s) => s.handles(),
            DesignElement::Image(i) => i.handles(),
        }
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;

    /// Create a new text element, measuring its box with `metrics`
    pub fn create_text(
        id: ElementId,
        content: impl Into<String>,
        color: Color32,
        font_size: f32,
        position: Pos2,
        metrics: &dyn TextMetrics,
    ) -> DesignElement {
        DesignElement::Text(Text::new(id, content.into(), color, font_size, position, metrics))
    }

    /// Create a new shape element
    pub fn create_shape(
        id: ElementId,
        kind: ShapeKind,
        color: Color32,
        position: Pos2,
        size: Vec2,
    ) -> DesignElement {
        DesignElement::Shape(Shape::new(id, kind, color, position, size))
    }

    /// Create a new image element referring to a cached source
    pub fn create_image(
        id: ElementId,
        source_key: impl Into<String>,
        position: Pos2,
        size: Vec2,
    ) -> DesignElement {
        DesignElement::Image(Image::new(id, source_key.into(), position, size))
    }
}
