use egui::{Context, Key, PointerButton, Pos2, Rect};

mod router;
pub use router::route_event;

/// Canvas input, already translated to canvas-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed inside the canvas
    PointerDown { pos: Pos2 },
    /// Pointer moved while over the window
    PointerMove { pos: Pos2 },
    /// Primary button released, wherever the pointer is
    PointerUp,
    /// Escape pressed
    Escape,
    /// Delete or Backspace pressed while no text field has focus
    Delete,
}

/// Handles converting raw egui input into canvas events
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Option<Rect>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update where the canvas sits on screen this frame
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    pub fn canvas_rect(&self) -> Option<Rect> {
        self.canvas_rect
    }

    /// Screen position to canvas coordinates
    pub fn to_canvas(&self, pos: Pos2) -> Option<Pos2> {
        self.canvas_rect.map(|rect| (pos - rect.min).to_pos2())
    }

    /// Process raw egui input and generate canvas events.
    ///
    /// `canvas_hovered` is whether the canvas is the topmost thing under the
    /// pointer (its response's `hovered()`); presses landing on a popup or
    /// window above the canvas don't reach it.
    pub fn process_input(&mut self, ctx: &Context, canvas_hovered: bool) -> Vec<InputEvent> {
        let Some(canvas_rect) = self.canvas_rect else {
            return Vec::new();
        };
        let keyboard_free = !ctx.wants_keyboard_input();
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();

            if canvas_hovered && input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = hover.filter(|p| canvas_rect.contains(*p)) {
                    events.push(InputEvent::PointerDown {
                        pos: (pos - canvas_rect.min).to_pos2(),
                    });
                }
            }

            // If position changed, this is a move
            if let Some(pos) = hover {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        pos: (pos - canvas_rect.min).to_pos2(),
                    });
                }
            }
            self.last_pointer_pos = hover;

            if input.pointer.button_released(PointerButton::Primary) {
                events.push(InputEvent::PointerUp);
            }

            if input.key_pressed(Key::Escape) {
                events.push(InputEvent::Escape);
            }
            if keyboard_free && (input.key_pressed(Key::Delete) || input.key_pressed(Key::Backspace)) {
                events.push(InputEvent::Delete);
            }
        });

        events
    }
}
