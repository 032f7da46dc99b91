use egui::{CursorIcon, Rect, Response, Sense};

use crate::DesignerApp;
use crate::input::route_event;
use crate::renderer::RenderOptions;
use crate::tools::InteractionState;

pub fn central_panel(app: &mut DesignerApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // Fixed-size canvas, centred in whatever space the panel has
        let available = ui.available_rect_before_wrap();
        let canvas_rect = Rect::from_center_size(available.center(), app.config.canvas_size);
        let response = ui.allocate_rect(canvas_rect, Sense::click_and_drag());
        app.input.set_canvas_rect(canvas_rect);

        for event in app.input.process_input(ctx, response.hovered()) {
            if let Some(command) = route_event(&event, &mut app.selection_tool, &mut app.document) {
                // Failures are logged by execute_command
                let _ = app.execute_command(ctx, command);
            }
        }

        update_cursor(app, ctx, &response);

        let options = RenderOptions {
            show_selection: !app.export.is_capturing(),
            garment_color: app.settings.garment_color,
        };
        app.renderer
            .render(ui.painter(), canvas_rect, &app.document, &mut app.images, options);
    });
}

fn update_cursor(app: &DesignerApp, ctx: &egui::Context, response: &Response) {
    let icon = match app.selection_tool.state() {
        InteractionState::Resizing { handle, .. } => handle.cursor_icon(),
        InteractionState::Dragging { .. } => CursorIcon::Grabbing,
        InteractionState::Idle => {
            let Some(pos) = response.hover_pos().and_then(|p| app.input.to_canvas(p)) else {
                return;
            };
            if let Some(handle) = app.selection_tool.hover_handle(pos, &app.document) {
                handle.cursor_icon()
            } else if app.document.element_at(pos).is_some() {
                CursorIcon::Grab
            } else {
                return;
            }
        }
    };
    ctx.set_cursor_icon(icon);
}
