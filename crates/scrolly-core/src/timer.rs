#![forbid(unsafe_code)]

//! Deadline-based timers for a single-threaded event loop.
//!
//! Two primitives:
//!
//! - [`OneShot`]: armed at most once, then either fires or is cancelled,
//!   never both. Every transition is explicit so callers can assert which
//!   outcome happened.
//! - [`Deadline`]: a re-armable slot used for short, repeated waits such as a
//!   transition settle period.
//!
//! Neither primitive owns a callback. The owner polls with the current time
//! and performs the work itself when a poll reports the timer as due.
//!
//! # Invariants
//!
//! 1. A `OneShot` leaves `Armed` exactly once, either to `Fired` or `Cancelled`.
//! 2. `OneShot::cancel` returns `true` at most once over the timer's lifetime.
//! 3. `OneShot::poll` returns `true` at most once over the timer's lifetime.
//! 4. A `Deadline` reports due only while armed and `now >= at`.

use std::fmt;
use std::time::Duration;

/// Errors from arming timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// The one-shot was already armed, fired, or cancelled.
    AlreadyUsed(OneShotState),
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyUsed(state) => write!(f, "one-shot timer already used (state: {state:?})"),
        }
    }
}

impl std::error::Error for TimerError {}

/// Lifecycle of a [`OneShot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneShotState {
    /// Never armed.
    Unarmed,
    /// Waiting for its deadline.
    Armed {
        /// Monotonic time at which the timer becomes due.
        deadline: Duration,
    },
    /// Reported due to its owner.
    Fired,
    /// Cancelled before firing.
    Cancelled,
}

/// A timer that can be armed once and cancelled at most once.
#[derive(Debug, Clone)]
pub struct OneShot {
    state: OneShotState,
}

impl Default for OneShot {
    fn default() -> Self {
        Self::new()
    }
}

impl OneShot {
    /// Create an unarmed one-shot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: OneShotState::Unarmed,
        }
    }

    /// Arm the timer to fire `delay` after `now`.
    pub fn arm(&mut self, now: Duration, delay: Duration) -> Result<(), TimerError> {
        match self.state {
            OneShotState::Unarmed => {
                self.state = OneShotState::Armed {
                    deadline: now.saturating_add(delay),
                };
                Ok(())
            }
            state => Err(TimerError::AlreadyUsed(state)),
        }
    }

    /// Cancel a pending timer.
    ///
    /// Returns `true` only for the call that moved the timer from armed to
    /// cancelled; every other call is a no-op returning `false`.
    pub fn cancel(&mut self) -> bool {
        if self.is_armed() {
            self.state = OneShotState::Cancelled;
            true
        } else {
            false
        }
    }

    /// Report whether the timer fires at `now`.
    ///
    /// Returns `true` exactly once, the first time it is polled at or past
    /// its deadline.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.state {
            OneShotState::Armed { deadline } if now >= deadline => {
                self.state = OneShotState::Fired;
                true
            }
            _ => false,
        }
    }

    /// Deadline while armed.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        match self.state {
            OneShotState::Armed { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> OneShotState {
        self.state
    }

    /// True while waiting for the deadline.
    #[inline]
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        matches!(self.state, OneShotState::Armed { .. })
    }
}

/// A re-armable deadline slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Duration>,
}

impl Deadline {
    /// Create a cleared slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { at: None }
    }

    /// Arm (or re-arm) the slot to expire `delay` after `now`.
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.at = Some(now.saturating_add(delay));
    }

    /// Clear the slot without expiring it.
    pub fn clear(&mut self) {
        self.at = None;
    }

    /// Expiry time while armed.
    #[inline]
    #[must_use]
    pub const fn at(&self) -> Option<Duration> {
        self.at
    }

    /// True while armed and `now` is at or past the expiry time.
    #[must_use]
    pub fn is_due(&self, now: Duration) -> bool {
        self.at.is_some_and(|at| now >= at)
    }

    /// Clear the slot and return `true` if it was due at `now`.
    pub fn take_if_due(&mut self, now: Duration) -> bool {
        if self.is_due(now) {
            self.at = None;
            true
        } else {
            false
        }
    }
}
