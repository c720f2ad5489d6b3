#![forbid(unsafe_code)]

//! Host-driven monotonic time.
//!
//! The page runs on a single event loop and the host owns the real timer
//! APIs. Components never read the wall clock; they are handed a monotonic
//! [`Duration`] since page start and compare deadlines against it. Tests
//! advance the same clock explicitly, which keeps every timer deterministic.

use std::time::Duration;

/// Source of monotonic time.
pub trait Clock {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct HostClock {
    now: Duration,
}

impl HostClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    ///
    /// Time never moves backwards; earlier values are ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl Clock for HostClock {
    fn now(&self) -> Duration {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut clock = HostClock::new();
        clock.advance(Duration::from_millis(100));
        clock.advance(Duration::from_millis(50));
        assert_eq!(clock.now(), Duration::from_millis(150));
    }

    #[test]
    fn set_is_monotonic() {
        let mut clock = HostClock::new();
        clock.set(Duration::from_secs(2));
        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(2));
    }

    #[test]
    fn advance_saturates() {
        let mut clock = HostClock::new();
        clock.set(Duration::MAX);
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::MAX);
    }
}
