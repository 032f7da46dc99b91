use egui::epaint::PathShape;
use egui::{Align2, Color32, Painter, Pos2, Rect, Stroke, Vec2};
use log::trace;

use crate::config::DesignerConfig;
use crate::document::Document;
use crate::element::{DesignElement, Element, ShapeKind};
use crate::geometry::GarmentOutline;
use crate::image_cache::ImageCache;
use crate::widgets::ResizeHandle;

const HANDLE_SIZE: f32 = 8.0;
const SELECTION_PADDING: f32 = 2.0;

/// Per-frame switches for [`Renderer::render`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Draw the selection stroke and handles. Off while capturing an export.
    pub show_selection: bool,
    pub garment_color: Color32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_selection: true,
            garment_color: Color32::WHITE,
        }
    }
}

/// Draws the canvas from the document each frame
#[derive(Debug, Clone)]
pub struct Renderer {
    background_color: Color32,
    outline_color: Color32,
    selection_color: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&DesignerConfig::default())
    }
}

impl Renderer {
    pub fn new(config: &DesignerConfig) -> Self {
        Self {
            background_color: config.background_color,
            outline_color: config.outline_color,
            selection_color: config.selection_color,
        }
    }

    /// Renders the whole canvas into `canvas_rect` (screen coordinates).
    ///
    /// Element geometry is canvas-local and is offset by `canvas_rect.min`.
    /// Images whose pixels are not decoded yet are skipped; the image cache
    /// requests a repaint once they are. Returns how many elements were drawn.
    pub fn render(
        &self,
        painter: &Painter,
        canvas_rect: Rect,
        document: &Document,
        images: &mut ImageCache,
        options: RenderOptions,
    ) -> usize {
        if !canvas_rect.is_positive() {
            return 0;
        }

        let painter = painter.with_clip_rect(canvas_rect);
        let offset = canvas_rect.min.to_vec2();

        painter.rect_filled(canvas_rect, 0.0, self.background_color);
        self.draw_garment(&painter, canvas_rect, options.garment_color);

        let mut drawn = 0;
        for element in document.elements() {
            if self.draw_element(&painter, element, offset, images) {
                drawn += 1;
            }
        }

        if options.show_selection {
            if let Some(selected) = document.selected_element() {
                self.draw_selection(&painter, selected, offset);
            }
        }

        trace!("Rendered {} of {} elements", drawn, document.len());
        drawn
    }

    fn draw_garment(&self, painter: &Painter, canvas_rect: Rect, garment_color: Color32) {
        let garment = GarmentOutline::new(canvas_rect);

        for part in garment.fill_parts {
            painter.add(PathShape::convex_polygon(part, garment_color, Stroke::NONE));
        }
        painter.add(PathShape::convex_polygon(garment.neck, self.background_color, Stroke::NONE));
        painter.add(PathShape::closed_line(garment.outline, Stroke::new(2.0, self.outline_color)));
    }

    fn draw_element(&self, painter: &Painter, element: &DesignElement, offset: Vec2, images: &mut ImageCache) -> bool {
        let rect = element.rect().translate(offset);

        match element {
            DesignElement::Text(text) => {
                painter.text(rect.min, Align2::LEFT_TOP, text.content(), text.font_id(), text.color());
            }
            DesignElement::Shape(shape) => match shape.kind() {
                ShapeKind::Rectangle => {
                    painter.rect_filled(rect, 0.0, shape.color());
                }
                ShapeKind::Circle => {
                    painter.circle_filled(shape.center() + offset, shape.radius(), shape.color());
                }
            },
            DesignElement::Image(image) => {
                let Some(texture_id) = images.texture_id(image.source_key(), painter.ctx()) else {
                    return false;
                };
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(texture_id, rect, uv, Color32::WHITE);
            }
        }
        true
    }

    fn draw_selection(&self, painter: &Painter, element: &DesignElement, offset: Vec2) {
        let rect = element.rect().translate(offset);
        painter.rect_stroke(
            rect.expand(SELECTION_PADDING),
            0.0,
            Stroke::new(1.5, self.selection_color),
        );

        for handle in element.handles() {
            ResizeHandle::new(*handle, handle.position_on(rect), HANDLE_SIZE).paint(painter);
        }
    }
}
