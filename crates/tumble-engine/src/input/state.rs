use std::collections::{HashMap, HashSet};

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
    TouchEvent,
    TouchPhase,
};

/// Touch id used when the left mouse button stands in for a finger.
pub const MOUSE_TOUCH_ID: u64 = u64::MAX;

/// Current input state for a single window.
///
/// Holds "is down" information, the pointer position and live touch points.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,

    /// Live touch points keyed by touch id, logical pixels.
    pub touches: HashMap<u64, (f32, f32)>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck buttons/touches when focus changes mid-press.
                    self.buttons_down.clear();
                    self.cancel_touches(frame);
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
                if self.buttons_down.contains(&MouseButton::Left) {
                    self.apply_touch(frame, TouchEvent {
                        id: MOUSE_TOUCH_ID,
                        phase: TouchPhase::Moved,
                        x: *x,
                        y: *y,
                    });
                }
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));

                let (changed, phase) = match state {
                    MouseButtonState::Pressed => {
                        let inserted = self.buttons_down.insert(*button);
                        if inserted {
                            frame.buttons_pressed.insert(*button);
                        }
                        (inserted, TouchPhase::Started)
                    }
                    MouseButtonState::Released => {
                        let removed = self.buttons_down.remove(button);
                        if removed {
                            frame.buttons_released.insert(*button);
                        }
                        (removed, TouchPhase::Ended)
                    }
                };

                if changed && *button == MouseButton::Left {
                    self.apply_touch(frame, TouchEvent { id: MOUSE_TOUCH_ID, phase, x: *x, y: *y });
                }
            }

            InputEvent::Touch(t) => self.apply_touch(frame, *t),
        }

        frame.push_event(ev);
    }

    fn apply_touch(&mut self, frame: &mut InputFrame, t: TouchEvent) {
        if t.phase.is_terminal() {
            if self.touches.remove(&t.id).is_none() {
                return;
            }
        } else {
            self.touches.insert(t.id, (t.x, t.y));
        }
        frame.touches.push(t);
    }

    fn cancel_touches(&mut self, frame: &mut InputFrame) {
        let mut live: Vec<_> = self.touches.drain().collect();
        live.sort_by_key(|(id, _)| *id);
        for (id, (x, y)) in live {
            frame.touches.push(TouchEvent { id, phase: TouchPhase::Cancelled, x, y });
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x,
            y,
        })
    }

    fn release(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Released,
            x,
            y,
        })
    }

    fn touch(id: u64, phase: TouchPhase) -> InputEvent {
        InputEvent::Touch(TouchEvent { id, phase, x: 1.0, y: 2.0 })
    }

    // ── touches ───────────────────────────────────────────────────────────

    #[test]
    fn touch_lifecycle_tracks_live_points() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();

        s.apply_event(&mut f, touch(7, TouchPhase::Started));
        assert_eq!(s.touch_count(), 1);

        s.apply_event(&mut f, touch(7, TouchPhase::Ended));
        assert_eq!(s.touch_count(), 0);
        assert_eq!(f.touches.len(), 2);
    }

    #[test]
    fn stray_end_is_dropped() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, touch(3, TouchPhase::Ended));
        assert!(f.touches.is_empty());
        assert_eq!(f.events.len(), 1);
    }

    #[test]
    fn focus_loss_cancels_touches() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, touch(1, TouchPhase::Started));
        s.apply_event(&mut f, touch(2, TouchPhase::Started));
        f.clear();

        s.apply_event(&mut f, InputEvent::Focused(false));
        assert_eq!(s.touch_count(), 0);
        assert_eq!(f.touches.len(), 2);
        assert!(f.touches.iter().all(|t| t.phase == TouchPhase::Cancelled));
    }

    // ── mouse emulation ───────────────────────────────────────────────────

    #[test]
    fn left_drag_is_emulated_as_touch() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();

        s.apply_event(&mut f, press(10.0, 10.0));
        s.apply_event(&mut f, InputEvent::PointerMoved(PointerMoveEvent { x: 20.0, y: 15.0 }));
        s.apply_event(&mut f, release(20.0, 15.0));

        let phases: Vec<_> = f.touches.iter().map(|t| t.phase).collect();
        assert_eq!(phases, [TouchPhase::Started, TouchPhase::Moved, TouchPhase::Ended]);
        assert!(f.touches.iter().all(|t| t.id == MOUSE_TOUCH_ID));
        assert!(f.buttons_pressed.contains(&MouseButton::Left));
        assert!(f.buttons_released.contains(&MouseButton::Left));
    }

    #[test]
    fn hover_without_button_is_not_a_touch() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, InputEvent::PointerMoved(PointerMoveEvent { x: 5.0, y: 5.0 }));
        assert!(f.touches.is_empty());
        assert_eq!(s.pointer_pos, Some((5.0, 5.0)));
    }

    #[test]
    fn right_button_is_not_a_touch() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
            x: 0.0,
            y: 0.0,
        }));
        assert!(s.button_down(MouseButton::Right));
        assert!(f.touches.is_empty());
    }
}
