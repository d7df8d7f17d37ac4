//! Monotonic time source for the exit-confirmation window.

use core::time::Duration;

use web_time::Instant;

/// Monotonic clock, measured from an arbitrary origin.
pub trait Clock {
    fn now_mono(&self) -> Duration;
}

/// Wall-clock backed implementation (`std::time::Instant` natively,
/// `performance.now()` on wasm).
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_mono(&self) -> Duration {
        self.origin.elapsed()
    }
}
