use std::time::{Duration, Instant};

/// One-shot deadline.
///
/// Armed once with a delay relative to some instant, then polled (typically once
/// per frame). `poll` reports `true` on the first call at or after the deadline
/// and `false` forever after. There is no cancel and no re-arm.
#[derive(Debug, Clone)]
pub struct Timeout {
    deadline: Instant,
    fired: bool,
}

impl Timeout {
    pub fn after(armed_at: Instant, delay: Duration) -> Self {
        Self {
            deadline: armed_at + delay,
            fired: false,
        }
    }

    #[inline]
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Returns `true` exactly once, on the first poll at or past the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired || now < self.deadline {
            return false;
        }
        self.fired = true;
        true
    }

    /// Time left until the deadline (zero once reached).
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}
