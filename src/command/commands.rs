use egui::{Color32, Pos2, Vec2};
use log::{debug, info};

use super::{CommandContext, CommandError, CommandResult};
use crate::element::{Element, ShapeKind, factory};
use crate::id_generator::generate_id;

// Repeated inserts step diagonally so new elements don't hide each other
const CASCADE_STEP: f32 = 16.0;
const CASCADE_SLOTS: usize = 6;

/// Actions emitted by the toolbar and keyboard shortcuts
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Place a line of text in the current colour and font size
    AddText { content: String },
    /// Place a rectangle or circle in the current colour
    AddShape { kind: ShapeKind },
    /// Place an image whose pixels are (or will be) cached under `source_key`
    AddImage { source_key: String, size: Vec2 },
    /// Remove the selected element
    DeleteSelected,
    /// Drop the selection
    ClearSelection,
    /// Change the current colour, recolouring the selection
    SetColor(Color32),
    /// Change the current font size, resizing selected text
    SetFontSize(f32),
    /// Change the shirt colour
    SetGarmentColor(Color32),
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::AddText { .. } => "Add Text",
            Command::AddShape { .. } => "Add Shape",
            Command::AddImage { .. } => "Add Image",
            Command::DeleteSelected => "Delete",
            Command::ClearSelection => "Clear Selection",
            Command::SetColor(_) => "Set Color",
            Command::SetFontSize(_) => "Set Font Size",
            Command::SetGarmentColor(_) => "Set Garment Color",
        }
    }

    /// Execute the command with the given context
    pub fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        match self {
            Command::AddText { content } => {
                let content = content.trim();
                if content.is_empty() {
                    return Err(CommandError::EmptyText);
                }
                let size = ctx.metrics.measure(content, ctx.settings.font_size);
                let position = placement(ctx, size);
                let element = factory::create_text(
                    generate_id(),
                    content,
                    ctx.settings.color,
                    ctx.settings.font_size,
                    position,
                    ctx.metrics,
                );
                ctx.document.add_element(element)?;
                Ok(())
            }

            Command::AddShape { kind } => {
                let size = ctx.config.default_shape_size;
                let position = placement(ctx, size);
                let element = factory::create_shape(generate_id(), *kind, ctx.settings.color, position, size);
                ctx.document.add_element(element)?;
                Ok(())
            }

            Command::AddImage { source_key, size } => {
                if !(size.x > 0.0 && size.y > 0.0 && size.is_finite()) {
                    return Err(CommandError::InvalidImageSize(*size));
                }
                let size = fit_within(*size, ctx.canvas_size() * ctx.config.max_image_fraction);
                let position = placement(ctx, size);
                let element = factory::create_image(generate_id(), source_key.clone(), position, size);
                ctx.document.add_element(element)?;
                Ok(())
            }

            Command::DeleteSelected => {
                if ctx.document.delete_selected().is_none() {
                    debug!("Delete requested with nothing selected");
                }
                Ok(())
            }

            Command::ClearSelection => {
                ctx.document.clear_selection();
                Ok(())
            }

            Command::SetColor(color) => {
                ctx.settings.color = *color;
                if let Some(element) = ctx.document.selected_element_mut() {
                    if element.set_color(*color) {
                        info!("Recoloured {} {}", element.element_type(), element.id());
                    }
                }
                Ok(())
            }

            Command::SetFontSize(size) => {
                if !(size.is_finite() && *size > 0.0) {
                    return Err(CommandError::InvalidFontSize(*size));
                }
                let size = ctx.config.clamp_font_size(*size);
                ctx.settings.font_size = size;
                let metrics = ctx.metrics;
                if let Some(text) = ctx.document.selected_element_mut().and_then(|e| e.as_text_mut()) {
                    text.set_font_size(size, metrics);
                }
                Ok(())
            }

            Command::SetGarmentColor(color) => {
                ctx.settings.garment_color = *color;
                Ok(())
            }
        }
    }
}

/// Top-left corner for a new element of `size`: centred on the canvas,
/// stepped diagonally by how many elements already exist.
fn placement(ctx: &CommandContext<'_>, size: Vec2) -> Pos2 {
    let slot = (ctx.document.len() % CASCADE_SLOTS) as f32;
    let center = (ctx.canvas_size() / 2.0).to_pos2();
    center - size / 2.0 + Vec2::splat(slot * CASCADE_STEP)
}

/// Scale `size` down (never up) to fit inside `bounds`, keeping aspect ratio
pub(crate) fn fit_within(size: Vec2, bounds: Vec2) -> Vec2 {
    let scale = (bounds.x / size.x).min(bounds.y / size.y).min(1.0);
    size * scale
}
