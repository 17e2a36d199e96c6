use std::time::{Duration, Instant};

use tumble_engine::time::Timeout;

/// How long gestures stay enabled after the root view mounts.
pub const DEFAULT_GESTURE_WINDOW: Duration = Duration::from_secs(3);

/// One-way switch that disables gesture handling after a fixed delay.
///
/// Enabled on construction. The first [`mount`](Self::mount) arms a one-shot
/// timer; when it fires the gate closes for good. Later mounts do not re-arm
/// and nothing re-opens the gate.
#[derive(Debug, Clone)]
pub struct GestureGate {
    enabled: bool,
    window: Duration,
    timer: Option<Timeout>,
}

impl GestureGate {
    pub fn new(window: Duration) -> Self {
        Self {
            enabled: true,
            window,
            timer: None,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Arms the timer relative to `now`. Only the first call has an effect.
    pub fn mount(&mut self, now: Instant) {
        if self.timer.is_none() {
            self.timer = Some(Timeout::after(now, self.window));
        }
    }

    /// Polls the timer. Returns `true` on the single update that closes the gate.
    pub fn update(&mut self, now: Instant) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        if !timer.poll(now) {
            return false;
        }

        self.enabled = false;
        log::info!("gesture handling disabled after {:?}", self.window);
        true
    }
}

impl Default for GestureGate {
    fn default() -> Self {
        Self::new(DEFAULT_GESTURE_WINDOW)
    }
}
