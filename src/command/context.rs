use egui::Vec2;

use crate::config::{DesignerConfig, ToolSettings};
use crate::document::Document;
use crate::element::TextMetrics;

/// Everything a command may read or mutate
pub struct CommandContext<'a> {
    pub document: &'a mut Document,
    pub settings: &'a mut ToolSettings,
    pub config: &'a DesignerConfig,
    pub metrics: &'a dyn TextMetrics,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        document: &'a mut Document,
        settings: &'a mut ToolSettings,
        config: &'a DesignerConfig,
        metrics: &'a dyn TextMetrics,
    ) -> Self {
        Self {
            document,
            settings,
            config,
            metrics,
        }
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.config.canvas_size
    }
}
