#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod id_generator;
pub mod image_cache;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod tools;
pub mod util;
pub mod widgets;

pub use app::DesignerApp;
pub use command::{Command, CommandContext, CommandError};
pub use config::{DesignerConfig, ToolSettings};
pub use document::Document;
pub use element::{DesignElement, Element, ElementId};
pub use error::ElementError;
pub use input::{InputEvent, InputHandler};
pub use renderer::{RenderOptions, Renderer};
pub use tools::{InteractionState, SelectionTool};
