//! Monotonic clock seam.
//!
//! The scheduler and the input path both stamp events through this
//! trait so tests can inject a deterministic time source.

use std::time::Instant;

use crate::analysis::TimestampMs;

/// A monotonic timestamp source.
pub trait Clock: Send + Sync {
    /// Milliseconds since an arbitrary, fixed origin.
    fn now_ms(&self) -> TimestampMs;
}

/// Wall clock backed by `std::time::Instant`.
///
/// The origin is the moment of construction, so timestamps start near
/// zero and stay monotonic regardless of system time changes.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
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
    fn now_ms(&self) -> TimestampMs {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
