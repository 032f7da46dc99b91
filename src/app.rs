use log::{debug, info, warn};

use crate::command::{Command, CommandContext, CommandResult};
use crate::config::{DesignerConfig, TOOL_SETTINGS_KEY, ToolSettings};
use crate::document::Document;
use crate::export::ExportAdapter;
use crate::file_handler::FileHandler;
use crate::image_cache::ImageCache;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::tools::SelectionTool;

/// The designer application. Only the tool settings survive a restart; the
/// design itself lives for the session.
pub struct DesignerApp {
    pub(crate) config: DesignerConfig,
    pub(crate) settings: ToolSettings,
    pub(crate) document: Document,
    pub(crate) selection_tool: SelectionTool,
    pub(crate) renderer: Renderer,
    pub(crate) images: ImageCache,
    pub(crate) file_handler: FileHandler,
    pub(crate) input: InputHandler,
    pub(crate) export: ExportAdapter,
    /// Contents of the "add text" field
    pub(crate) text_input: String,
}

impl Default for DesignerApp {
    fn default() -> Self {
        Self::with_config(DesignerConfig::default(), ToolSettings::default())
    }
}

impl DesignerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<ToolSettings>(storage, TOOL_SETTINGS_KEY))
            .unwrap_or_default();
        debug!("Restored tool settings: {:?}", settings);
        Self::with_config(DesignerConfig::default(), settings)
    }

    pub fn with_config(config: DesignerConfig, settings: ToolSettings) -> Self {
        Self {
            selection_tool: SelectionTool::new(config.handle_radius),
            renderer: Renderer::new(&config),
            images: ImageCache::new(config.max_cached_images),
            file_handler: FileHandler::new(),
            input: InputHandler::new(),
            export: ExportAdapter::new(),
            document: Document::new(),
            text_input: String::new(),
            config,
            settings,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    pub fn selection_tool(&self) -> &SelectionTool {
        &self.selection_tool
    }

    /// Run a command against the document, measuring text with `ctx`'s fonts
    pub fn execute_command(&mut self, ctx: &egui::Context, command: Command) -> CommandResult {
        let mut command_ctx = CommandContext::new(&mut self.document, &mut self.settings, &self.config, ctx);
        let result = command.execute(&mut command_ctx);

        match &result {
            Ok(()) => debug!("Executed {}", command.label()),
            Err(err) => warn!("{} failed: {}", command.label(), err),
        }

        if matches!(command, Command::DeleteSelected) {
            let document = &self.document;
            self.images.retain_sources(|key| document.references_image(key));
        }
        self.selection_tool.sync_with_document(&self.document);
        result
    }

    /// Turn newly dropped or picked files into image elements
    fn handle_incoming_files(&mut self, ctx: &egui::Context) {
        self.file_handler.check_for_dropped_files(ctx);

        for loaded in self.file_handler.take_loaded_images() {
            info!("Adding image {} ({:?})", loaded.source_key, loaded.size);
            self.images.request(&loaded.source_key, loaded.bytes, ctx);
            let command = Command::AddImage {
                source_key: loaded.source_key.clone(),
                size: loaded.size,
            };
            if self.execute_command(ctx, command).is_err() {
                self.images.forget(&loaded.source_key);
            }
        }
    }
}

impl eframe::App for DesignerApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, TOOL_SETTINGS_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.images.begin_frame();
        self.images.poll();
        self.handle_incoming_files(ctx);

        // Tools first, so an export requested this frame hides the selection
        // before the canvas is painted
        tools_panel(self, ctx);
        central_panel(self, ctx);

        if let Some(canvas_rect) = self.input.canvas_rect() {
            self.export
                .handle_screenshot(ctx, canvas_rect, &self.config.pdf, &self.config.export_file_stem);
        }

        self.file_handler.preview_files_being_dropped(ctx);
    }
}
