use egui::{Pos2, Rect, Vec2};
use log::debug;

use super::{Element, ElementId};
use crate::element::common;
use crate::error::ElementError;
use crate::widgets::Handle;

/// Image element. The pixels live in the image cache under `source_key`;
/// the element only carries placement.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    id: ElementId,
    source_key: String,
    position: Pos2,
    size: Vec2,
}

impl Image {
    pub(crate) fn new(id: ElementId, source_key: String, position: Pos2, size: Vec2) -> Self {
        Self {
            id,
            source_key,
            position,
            size,
        }
    }

    pub fn source_key(&self) -> &str {
        &self.source_key
    }
}

impl Element for Image {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "image"
    }

    fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn resize(&mut self, new_rect: Rect) -> Result<(), ElementError> {
        common::validate_rect(&new_rect)?;

        // The texture is stretched to the new box; no re-decode needed
        self.position = new_rect.min;
        self.size = new_rect.size();

        debug!("Image {} resized: pos={:?}, size={:?}", self.id, self.position, self.size);
        Ok(())
    }

    fn handles(&self) -> &'static [Handle] {
        &Handle::CORNERS
    }
}
