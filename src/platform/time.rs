//! Wall-clock time source for the host loop

use std::time::Instant;

pub trait TimeSource {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> f64;
}

/// Monotonic clock anchored at construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TimeSource for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}
