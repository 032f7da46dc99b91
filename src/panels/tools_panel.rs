use egui::color_picker::{Alpha, color_edit_button_srgba};
use egui::{Button, Key, Slider};

use crate::DesignerApp;
use crate::command::Command;
use crate::components::ToolButton;
use crate::element::{Element, ShapeKind};
use crate::export::ExportFormat;

pub fn tools_panel(app: &mut DesignerApp, ctx: &egui::Context) {
    let mut commands = Vec::new();

    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("T-Shirt Designer");
            ui.separator();

            // Text entry
            ui.label("Text");
            let field = ui.text_edit_singleline(&mut app.text_input);
            let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            let has_text = !app.text_input.trim().is_empty();
            let clicked = ui.add_enabled(has_text, Button::new("Add text")).clicked();
            if (clicked || submitted) && has_text {
                let command = Command::AddText {
                    content: app.text_input.clone(),
                };
                if app.execute_command(ctx, command).is_ok() {
                    app.text_input.clear();
                }
            }

            ui.separator();

            // Elements
            ui.horizontal(|ui| {
                if ToolButton::new("⬛", "Add rectangle").show(ui).clicked() {
                    commands.push(Command::AddShape {
                        kind: ShapeKind::Rectangle,
                    });
                }
                if ToolButton::new("⚫", "Add circle").show(ui).clicked() {
                    commands.push(Command::AddShape { kind: ShapeKind::Circle });
                }
                if ToolButton::new("🖼", "Add image…").show(ui).clicked() {
                    app.file_handler.open_image_picker(ctx);
                }
                let has_selection = app.document.selected_id().is_some();
                if ToolButton::new("🗑", "Delete selected")
                    .enabled(has_selection)
                    .show(ui)
                    .clicked()
                {
                    commands.push(Command::DeleteSelected);
                }
            });

            ui.separator();

            // Style
            egui::Grid::new("style_grid").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
                ui.label("Colour");
                let mut color = app.settings.color;
                if color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    commands.push(Command::SetColor(color));
                }
                ui.end_row();

                ui.label("Font size");
                let (min, max) = app.config.font_size_range;
                let mut font_size = app.settings.font_size;
                if ui.add(Slider::new(&mut font_size, min..=max).suffix(" px")).changed() {
                    commands.push(Command::SetFontSize(font_size));
                }
                ui.end_row();

                ui.label("Shirt");
                let mut garment_color = app.settings.garment_color;
                if color_edit_button_srgba(ui, &mut garment_color, Alpha::Opaque).changed() {
                    commands.push(Command::SetGarmentColor(garment_color));
                }
                ui.end_row();
            });

            ui.separator();

            // Export
            let idle = !app.export.is_capturing();
            ui.horizontal(|ui| {
                if ui.add_enabled(idle, Button::new("Export PNG")).clicked() {
                    app.export.request(ExportFormat::Png, ctx);
                }
                if ui.add_enabled(idle, Button::new("Export PDF")).clicked() {
                    app.export.request(ExportFormat::Pdf, ctx);
                }
            });

            ui.separator();

            // Status
            match app.document.selected_element() {
                Some(element) => ui.label(format!("Selected: {} {}", element.element_type(), element.id())),
                None => ui.label("Nothing selected"),
            };
            ui.label(format!(
                "{} elements · {}",
                app.document.len(),
                app.selection_tool.current_state_name()
            ));
        });

    for command in commands {
        // Failures are logged by execute_command
        let _ = app.execute_command(ctx, command);
    }
}
