use std::time::{Duration, Instant};

use tumble_engine::input::TouchEvent;

use crate::event::EventResult;
use crate::gate::GestureGate;
use crate::gesture::{GestureConfig, GestureHandlers, GestureRecognizer};

/// Full-screen container at the top of the view tree.
///
/// Gesture handlers are created once, at construction. They stay attached
/// while the [`GestureGate`] is enabled; once it closes, touches pass through
/// the container unhandled.
pub struct RootView {
    handlers: GestureHandlers,
    gate: GestureGate,
    mounted: bool,
}

impl RootView {
    pub fn new(config: GestureConfig, gesture_window: Duration) -> Self {
        Self {
            handlers: GestureRecognizer::create(config),
            gate: GestureGate::new(gesture_window),
            mounted: false,
        }
    }

    /// Called on the first frame. Arms the gesture timer.
    pub fn mount(&mut self, now: Instant) {
        if !self.mounted {
            log::debug!("root view mounted");
            self.mounted = true;
        }
        self.gate.mount(now);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Advances timers. Returns `true` when gestures were detached on this call.
    ///
    /// A gesture still in progress when the handlers detach is cancelled, so
    /// `on_end` fires before the handlers stop receiving touches.
    pub fn update(&mut self, now: Instant) -> bool {
        let closed = self.gate.update(now);
        if closed && self.handlers.is_active() {
            log::debug!("cancelling gesture in progress");
            self.handlers.cancel();
        }
        closed
    }

    pub fn gestures_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Handlers currently attached to the container, if any.
    pub fn attached_handlers(&self) -> Option<&GestureHandlers> {
        self.gate.is_enabled().then_some(&self.handlers)
    }

    /// Routes a touch to the attached handlers.
    pub fn dispatch_touch(&mut self, ev: &TouchEvent) -> EventResult {
        if !self.gate.is_enabled() {
            return EventResult::Ignored;
        }
        self.handlers.handle(ev)
    }
}

impl Default for RootView {
    fn default() -> Self {
        Self::new(GestureConfig::default(), crate::gate::DEFAULT_GESTURE_WINDOW)
    }
}
