//! Touch gesture recognition.
//!
//! A [`GestureRecognizer`] turns a stream of touch points into a single pan
//! gesture: it starts with the first finger down, tracks the displacement of
//! that finger, and ends when the last finger lifts. Callbacks are optional; a
//! recognizer built from `GestureConfig::default()` accepts every touch and
//! keeps [`GestureState`] current without acting on it.

use std::collections::HashMap;

use tumble_engine::input::{TouchEvent, TouchPhase};

use crate::event::EventResult;

type GestureCallback = Box<dyn FnMut(&GestureState)>;

/// Snapshot of the gesture in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    /// Number of fingers currently down.
    pub num_touches: usize,
    /// Displacement of the primary touch since the gesture started.
    pub dx: f32,
    pub dy: f32,
    /// Latest position of the primary touch.
    pub move_x: f32,
    pub move_y: f32,
}

/// Callbacks fired by [`GestureHandlers`]. All optional.
#[derive(Default)]
pub struct GestureConfig {
    on_start: Option<GestureCallback>,
    on_move: Option<GestureCallback>,
    on_end: Option<GestureCallback>,
}

impl GestureConfig {
    pub fn on_start(mut self, f: impl FnMut(&GestureState) + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_move(mut self, f: impl FnMut(&GestureState) + 'static) -> Self {
        self.on_move = Some(Box::new(f));
        self
    }

    pub fn on_end(mut self, f: impl FnMut(&GestureState) + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.on_start.is_none() && self.on_move.is_none() && self.on_end.is_none()
    }
}

/// Factory for gesture handler sets.
pub struct GestureRecognizer;

impl GestureRecognizer {
    pub fn create(config: GestureConfig) -> GestureHandlers {
        GestureHandlers {
            config,
            state: GestureState::default(),
            touches: HashMap::new(),
            primary: None,
            origin: (0.0, 0.0),
            gestures_completed: 0,
        }
    }
}

/// Handler set attached to a view; receives the view's touch stream.
pub struct GestureHandlers {
    config: GestureConfig,
    state: GestureState,
    touches: HashMap<u64, (f32, f32)>,
    primary: Option<u64>,
    origin: (f32, f32),
    gestures_completed: u64,
}

impl GestureHandlers {
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// `true` while at least one finger is down.
    pub fn is_active(&self) -> bool {
        self.primary.is_some()
    }

    /// Number of gestures that have ended since creation.
    pub fn gestures_completed(&self) -> u64 {
        self.gestures_completed
    }

    /// Feeds one touch event. Every event is accepted.
    pub fn handle(&mut self, ev: &TouchEvent) -> EventResult {
        match ev.phase {
            TouchPhase::Started => {
                self.touches.insert(ev.id, (ev.x, ev.y));
                if self.primary.is_none() {
                    self.primary = Some(ev.id);
                    self.origin = (ev.x, ev.y);
                    self.state = GestureState {
                        num_touches: self.touches.len(),
                        dx: 0.0,
                        dy: 0.0,
                        move_x: ev.x,
                        move_y: ev.y,
                    };
                    fire(&mut self.config.on_start, &self.state);
                } else {
                    self.state.num_touches = self.touches.len();
                }
            }

            TouchPhase::Moved => {
                if let Some(pos) = self.touches.get_mut(&ev.id) {
                    *pos = (ev.x, ev.y);
                }
                if self.primary == Some(ev.id) {
                    self.state.move_x = ev.x;
                    self.state.move_y = ev.y;
                    self.state.dx = ev.x - self.origin.0;
                    self.state.dy = ev.y - self.origin.1;
                    fire(&mut self.config.on_move, &self.state);
                }
            }

            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.touches.remove(&ev.id).is_none() {
                    return EventResult::Consumed;
                }
                self.state.num_touches = self.touches.len();

                if self.touches.is_empty() {
                    fire(&mut self.config.on_end, &self.state);
                    self.primary = None;
                    self.gestures_completed += 1;
                } else if self.primary == Some(ev.id) {
                    // Hand the gesture to a remaining finger, keeping dx/dy continuous.
                    if let Some((&id, &(x, y))) = self.touches.iter().min_by_key(|(id, _)| **id) {
                        self.primary = Some(id);
                        self.origin = (x - self.state.dx, y - self.state.dy);
                    }
                }
            }
        }

        EventResult::Consumed
    }

    /// Ends the gesture in progress as if every live touch were cancelled.
    ///
    /// `on_end` fires once if a gesture was active. Later events for the
    /// dropped touch ids are treated as stray.
    pub fn cancel(&mut self) {
        let mut live: Vec<_> = self.touches.iter().map(|(&id, &(x, y))| (id, x, y)).collect();
        live.sort_by_key(|(id, ..)| *id);
        for (id, x, y) in live {
            self.handle(&TouchEvent {
                id,
                phase: TouchPhase::Cancelled,
                x,
                y,
            });
        }
    }
}

fn fire(cb: &mut Option<GestureCallback>, state: &GestureState) {
    if let Some(f) = cb.as_mut() {
        f(state);
    }
}
