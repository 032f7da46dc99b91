mod commands;
mod context;

use thiserror::Error;

use crate::error::ElementError;

pub use commands::Command;
pub use context::CommandContext;

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Text elements need visible content
    #[error("text is empty")]
    EmptyText,
    /// Font sizes must be positive and finite
    #[error("invalid font size {0}")]
    InvalidFontSize(f32),
    /// Images need a positive, finite size
    #[error("invalid image size {0:?}")]
    InvalidImageSize(egui::Vec2),
    /// The document rejected the change
    #[error(transparent)]
    Element(#[from] ElementError),
}
