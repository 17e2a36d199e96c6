use std::collections::HashSet;

use super::types::{InputEvent, MouseButton, TouchEvent};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held buttons, pointer position, live touches).
/// `InputFrame` provides events and transitions for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Mouse buttons pressed this frame.
    pub buttons_pressed: HashSet<MouseButton>,

    /// Mouse buttons released this frame.
    pub buttons_released: HashSet<MouseButton>,

    /// Touch stream for this frame, in arrival order.
    ///
    /// Includes the left mouse button emulated as a touch with id
    /// [`MOUSE_TOUCH_ID`](crate::input::MOUSE_TOUCH_ID).
    pub touches: Vec<TouchEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.touches.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
