use egui::{Color32, Pos2, Rect, Vec2};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{Element, ElementId};
use crate::element::common;
use crate::error::ElementError;
use crate::widgets::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl ShapeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
        }
    }
}

/// Filled rectangle or circle. A circle's diameter is its width; width and
/// height are always equal for circles.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    id: ElementId,
    kind: ShapeKind,
    color: Color32,
    position: Pos2,
    size: Vec2,
}

impl Shape {
    pub(crate) fn new(id: ElementId, kind: ShapeKind, color: Color32, position: Pos2, size: Vec2) -> Self {
        let size = match kind {
            ShapeKind::Rectangle => size,
            ShapeKind::Circle => Vec2::splat(size.x),
        };
        Self {
            id,
            kind,
            color,
            position,
            size,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn center(&self) -> Pos2 {
        self.rect().center()
    }

    /// Radius of a circle; half the shorter side for rectangles
    pub fn radius(&self) -> f32 {
        self.size.x.min(self.size.y) / 2.0
    }
}

impl Element for Shape {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "shape"
    }

    fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        match self.kind {
            ShapeKind::Rectangle => self.rect().contains(pos),
            ShapeKind::Circle => common::circle_contains(self.rect(), pos),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn resize(&mut self, new_rect: Rect) -> Result<(), ElementError> {
        let new_rect = match self.kind {
            ShapeKind::Rectangle => new_rect,
            ShapeKind::Circle => common::inscribed_square(new_rect),
        };
        common::validate_rect(&new_rect)?;

        self.position = new_rect.min;
        self.size = new_rect.size();

        debug!("{} {} resized: pos={:?}, size={:?}", self.kind.label(), self.id, self.position, self.size);
        Ok(())
    }

    fn handles(&self) -> &'static [Handle] {
        match self.kind {
            ShapeKind::Rectangle => &Handle::CORNERS,
            ShapeKind::Circle => &Handle::CARDINALS,
        }
    }
}
