use egui::{Pos2, Rect, Vec2};
use log::{debug, warn};

use crate::document::Document;
use crate::element::{Element, ElementId};
use crate::geometry::hit_testing::{self, RESIZE_HANDLE_RADIUS};
use crate::widgets::Handle;

/// What the pointer is currently doing to the document.
///
/// Only one mode can be active at a time.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        element_id: ElementId,
        /// Pointer position minus element origin at grab time
        offset: Vec2,
    },
    Resizing {
        element_id: ElementId,
        handle: Handle,
        original_rect: Rect,
        start_pos: Pos2,
    },
}

/// Turns canvas-local pointer and key events into selection, drag and
/// resize operations on a [`Document`].
#[derive(Debug, Clone)]
pub struct SelectionTool {
    state: InteractionState,
    handle_radius: f32,
}

impl Default for SelectionTool {
    fn default() -> Self {
        Self::new(RESIZE_HANDLE_RADIUS)
    }
}

impl SelectionTool {
    pub fn new(handle_radius: f32) -> Self {
        Self {
            state: InteractionState::Idle,
            handle_radius,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn handle_radius(&self) -> f32 {
        self.handle_radius
    }

    pub fn current_state_name(&self) -> &'static str {
        match self.state {
            InteractionState::Idle => "Idle",
            InteractionState::Dragging { .. } => "Dragging",
            InteractionState::Resizing { .. } => "Resizing",
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, InteractionState::Resizing { .. })
    }

    /// The selected element's handle under `pos`, if any
    pub fn hover_handle(&self, pos: Pos2, doc: &Document) -> Option<Handle> {
        let selected = doc.selected_element()?;
        hit_testing::handle_at(selected, pos, self.handle_radius)
    }

    /// Press: grab a handle of the selected element, else select and start
    /// dragging the first element under the pointer, else clear selection.
    pub fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document) {
        if let Some(selected) = doc.selected_element() {
            if let Some(handle) = hit_testing::handle_at(selected, pos, self.handle_radius) {
                debug!("Resizing {} from {} handle", selected.id(), handle.as_str());
                self.state = InteractionState::Resizing {
                    element_id: selected.id(),
                    handle,
                    original_rect: selected.rect(),
                    start_pos: pos,
                };
                return;
            }
        }

        let hit = doc.element_at(pos).map(|element| (element.id(), element.position()));
        match hit {
            Some((element_id, origin)) => {
                doc.select(element_id);
                debug!("Dragging {}", element_id);
                self.state = InteractionState::Dragging {
                    element_id,
                    offset: pos - origin,
                };
            }
            None => {
                doc.clear_selection();
                self.state = InteractionState::Idle;
            }
        }
    }

    /// Move: apply the active drag or resize. Returns true if the document changed.
    pub fn on_pointer_move(&mut self, pos: Pos2, doc: &mut Document) -> bool {
        match self.state.clone() {
            InteractionState::Idle => false,
            InteractionState::Dragging { element_id, offset } => {
                let Some(element) = doc.find_element(element_id) else {
                    self.state = InteractionState::Idle;
                    return false;
                };
                let delta = (pos - offset) - element.position();
                if delta == Vec2::ZERO {
                    return false;
                }
                doc.translate_element(element_id, delta).is_ok()
            }
            InteractionState::Resizing {
                element_id,
                handle,
                original_rect,
                start_pos,
            } => {
                if !doc.contains(element_id) {
                    self.state = InteractionState::Idle;
                    return false;
                }
                let new_rect = hit_testing::resized_rect(original_rect, handle, start_pos, pos);
                match doc.resize_element(element_id, new_rect) {
                    Ok(()) => true,
                    Err(err) => {
                        warn!("Resize of {} rejected: {}", element_id, err);
                        false
                    }
                }
            }
        }
    }

    /// Release: end any drag or resize. The selection is kept.
    pub fn on_pointer_up(&mut self) {
        if self.state != InteractionState::Idle {
            debug!("{} finished", self.current_state_name());
        }
        self.state = InteractionState::Idle;
    }

    /// Escape: drop the selection whatever the tool was doing
    pub fn on_escape(&mut self, doc: &mut Document) {
        self.state = InteractionState::Idle;
        doc.clear_selection();
    }

    /// Drop interaction state that refers to elements no longer in `doc`
    pub fn sync_with_document(&mut self, doc: &Document) {
        let stale = match &self.state {
            InteractionState::Idle => false,
            InteractionState::Dragging { element_id, .. }
            | InteractionState::Resizing { element_id, .. } => !doc.contains(*element_id),
        };
        if stale {
            self.state = InteractionState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ShapeKind, factory};
    use crate::id_generator::generate_id;
    use egui::{Color32, pos2, vec2};

    fn doc_with_rect() -> (Document, ElementId) {
        let mut doc = Document::new();
        let rect = factory::create_shape(
            generate_id(),
            ShapeKind::Rectangle,
            Color32::RED,
            pos2(100.0, 100.0),
            vec2(80.0, 40.0),
        );
        let id = doc.add_element(rect).unwrap();
        (doc, id)
    }

    #[test]
    fn press_on_handle_starts_resizing() {
        let (mut doc, id) = doc_with_rect();
        let mut tool = SelectionTool::default();
        tool.on_pointer_down(pos2(181.0, 141.0), &mut doc);
        assert!(matches!(
            tool.state(),
            InteractionState::Resizing { element_id, handle: Handle::BottomRight, .. } if *element_id == id
        ));
    }

    #[test]
    fn handles_ignored_without_selection() {
        let (mut doc, _) = doc_with_rect();
        doc.clear_selection();
        let mut tool = SelectionTool::default();
        // Just outside the box, but on the corner handle's hit region
        tool.on_pointer_down(pos2(183.0, 143.0), &mut doc);
        assert_eq!(tool.state(), &InteractionState::Idle);
        assert_eq!(doc.selected_id(), None);
    }

    #[test]
    fn release_keeps_selection() {
        let (mut doc, id) = doc_with_rect();
        let mut tool = SelectionTool::default();
        tool.on_pointer_down(pos2(120.0, 120.0), &mut doc);
        assert!(tool.is_dragging());
        tool.on_pointer_up();
        assert_eq!(tool.state(), &InteractionState::Idle);
        assert_eq!(doc.selected_id(), Some(id));
    }

    #[test]
    fn drag_of_removed_element_goes_idle() {
        let (mut doc, id) = doc_with_rect();
        let mut tool = SelectionTool::default();
        tool.on_pointer_down(pos2(120.0, 120.0), &mut doc);
        doc.remove_element(id);
        assert!(!tool.on_pointer_move(pos2(130.0, 130.0), &mut doc));
        assert_eq!(tool.state(), &InteractionState::Idle);
    }
}
