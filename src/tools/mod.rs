mod selection_tool;

pub use selection_tool::{InteractionState, SelectionTool};
