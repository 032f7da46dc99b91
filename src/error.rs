use thiserror::Error;

use crate::element::ElementId;

/// Errors raised when the element store or an element rejects a mutation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    /// An element with this id is already in the document
    #[error("element {0} already exists")]
    DuplicateId(ElementId),
    /// No element with this id exists in the document
    #[error("element {0} not found")]
    NotFound(ElementId),
    /// The requested geometry is below the minimum element size
    #[error("element dimensions too small (min: {min}). Width: {width}, Height: {height}")]
    TooSmall { width: f32, height: f32, min: f32 },
    /// The element type has no resize handles
    #[error("{0} elements cannot be resized")]
    NotResizable(&'static str),
}
