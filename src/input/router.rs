use crate::command::Command;
use crate::document::Document;
use crate::tools::SelectionTool;

use super::InputEvent;

/// Routes a canvas event to the selection tool.
///
/// Pointer and Escape events act on the document directly; events that need
/// the full command context come back as a [`Command`] for the caller to run.
pub fn route_event(event: &InputEvent, tool: &mut SelectionTool, document: &mut Document) -> Option<Command> {
    match event {
        InputEvent::PointerDown { pos } => {
            tool.on_pointer_down(*pos, document);
            None
        }
        InputEvent::PointerMove { pos } => {
            tool.on_pointer_move(*pos, document);
            None
        }
        InputEvent::PointerUp => {
            tool.on_pointer_up();
            None
        }
        InputEvent::Escape => {
            tool.on_escape(document);
            None
        }
        InputEvent::Delete => {
            if document.selected_id().is_some() {
                Some(Command::DeleteSelected)
            } else {
                None
            }
        }
    }
}
