use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::RESIZE_HANDLE_RADIUS;

/// Storage key for [`ToolSettings`] in eframe's persistence
pub const TOOL_SETTINGS_KEY: &str = "tshirt_designer_tool_settings";

/// Fixed page the PDF export is laid out on, in PDF points (1/72 inch)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PdfPageConfig {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

impl Default for PdfPageConfig {
    // A4 portrait with a half-inch margin
    fn default() -> Self {
        Self {
            width_pt: 595.0,
            height_pt: 842.0,
            margin_pt: 36.0,
        }
    }
}

/// Static editor configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct DesignerConfig {
    /// Size of the printable canvas in points
    pub canvas_size: Vec2,
    /// Hit radius around resize handles
    pub handle_radius: f32,
    pub background_color: Color32,
    pub outline_color: Color32,
    pub selection_color: Color32,
    pub default_shape_size: Vec2,
    pub font_size_range: (f32, f32),
    /// Images larger than this fraction of the canvas are scaled down on insert
    pub max_image_fraction: f32,
    pub max_cached_images: usize,
    pub export_file_stem: String,
    pub pdf: PdfPageConfig,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            canvas_size: Vec2::new(500.0, 560.0),
            handle_radius: RESIZE_HANDLE_RADIUS,
            background_color: Color32::from_gray(245),
            outline_color: Color32::from_gray(90),
            selection_color: Color32::from_rgb(30, 120, 255),
            default_shape_size: Vec2::new(100.0, 100.0),
            font_size_range: (8.0, 96.0),
            max_image_fraction: 0.6,
            max_cached_images: 32,
            export_file_stem: "design".to_owned(),
            pdf: PdfPageConfig::default(),
        }
    }
}

impl DesignerConfig {
    pub fn clamp_font_size(&self, size: f32) -> f32 {
        size.clamp(self.font_size_range.0, self.font_size_range.1)
    }
}

/// Toolbar state shared between the panels and the canvas. Persisted across
/// sessions; the design itself is not.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ToolSettings {
    pub color: Color32,
    pub font_size: f32,
    pub garment_color: Color32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(220, 40, 60),
            font_size: 32.0,
            garment_color: Color32::WHITE,
        }
    }
}
