use egui::{Color32, FontId, Pos2, Rect, Vec2};
use log::debug;

use super::{Element, ElementId};
use crate::error::ElementError;
use crate::widgets::Handle;

/// Measures the laid-out size of a single line of text
pub trait TextMetrics {
    fn measure(&self, content: &str, font_size: f32) -> Vec2;
}

/// Measures with the fonts loaded into the egui context.
///
/// Only valid once the first frame has started; before that egui has no fonts.
impl TextMetrics for egui::Context {
    fn measure(&self, content: &str, font_size: f32) -> Vec2 {
        self.fonts(|fonts| {
            fonts
                .layout_no_wrap(content.to_owned(), FontId::proportional(font_size), Color32::WHITE)
                .size()
        })
    }
}

/// Deterministic metrics: every glyph is `advance * font_size` wide and one
/// line is `line_height * font_size` tall. Used where no fonts are loaded.
#[derive(Debug, Clone, Copy)]
pub struct FixedTextMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for FixedTextMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMetrics for FixedTextMetrics {
    fn measure(&self, content: &str, font_size: f32) -> Vec2 {
        let glyphs = content.chars().count() as f32;
        Vec2::new(glyphs * self.advance * font_size, self.line_height * font_size)
    }
}

/// A single line of text placed on the shirt
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    id: ElementId,
    content: String,
    color: Color32,
    font_size: f32,
    position: Pos2,
    // Measured box, refreshed whenever content or font size changes
    size: Vec2,
}

impl Text {
    pub(crate) fn new(
        id: ElementId,
        content: String,
        color: Color32,
        font_size: f32,
        position: Pos2,
        metrics: &dyn TextMetrics,
    ) -> Self {
        let size = metrics.measure(&content, font_size);
        Self {
            id,
            content,
            color,
            font_size,
            position,
            size,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_id(&self) -> FontId {
        FontId::proportional(self.font_size)
    }

    pub(crate) fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    /// Change the font size and re-measure. The top-left corner stays put.
    pub fn set_font_size(&mut self, font_size: f32, metrics: &dyn TextMetrics) {
        self.font_size = font_size;
        self.size = metrics.measure(&self.content, font_size);
        debug!("Text {} font size -> {} ({:?})", self.id, font_size, self.size);
    }
}

impl Element for Text {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "text"
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

    fn resize(&mut self, _new_rect: Rect) -> Result<(), ElementError> {
        // Text is sized by its font, not by handles
        Err(ElementError::NotResizable("text"))
    }

    fn handles(&self) -> &'static [Handle] {
        &[]
    }
}
