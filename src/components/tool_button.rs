use egui::{Align2, Color32, FontId, Response, Sense, Stroke, Ui, Vec2};

/// Square icon button used on the toolbar
pub struct ToolButton {
    pub icon: &'static str,
    pub tooltip: &'static str,
    pub enabled: bool,
}

impl ToolButton {
    pub fn new(icon: &'static str, tooltip: &'static str) -> Self {
        Self {
            icon,
            tooltip,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let button_size = Vec2::splat(36.0);
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(button_size, sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if !self.enabled {
                Color32::from_gray(24)
            } else if response.is_pointer_button_down_on() {
                Color32::from_rgb(100, 181, 246)
            } else if response.hovered() {
                Color32::from_gray(60)
            } else {
                Color32::from_gray(40)
            };
            let text_color = if self.enabled {
                Color32::WHITE
            } else {
                Color32::from_gray(90)
            };

            ui.painter().rect_filled(rect, 4.0, bg_color);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.icon,
                FontId::proportional(20.0),
                text_color,
            );
            if response.hovered() && self.enabled {
                ui.painter()
                    .rect_stroke(rect, 4.0, Stroke::new(1.0, Color32::from_rgb(33, 150, 243)));
            }
        }

        response.on_hover_text(self.tooltip)
    }
}
