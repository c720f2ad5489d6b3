#![forbid(unsafe_code)]

//! At-most-one-in-flight transition guard.
//!
//! Two states: **Idle** and **Transitioning**. A transition may only begin
//! from Idle; it ends when its settle deadline is polled as due. Requests made
//! while Transitioning are rejected, never queued.

use std::time::Duration;

use scrolly_core::timer::Deadline;

use crate::intent::Transition;

/// Serialises logically overlapping transitions.
#[derive(Debug, Clone, Default)]
pub struct TransitionGuard {
    in_flight: Option<Transition>,
    settle: Deadline,
}

impl TransitionGuard {
    /// Create an idle guard.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            in_flight: None,
            settle: Deadline::new(),
        }
    }

    /// Begin `transition` at `now`, settling after `settle`.
    ///
    /// Returns `false` and leaves the guard untouched if a transition is
    /// already in flight.
    pub fn try_begin(&mut self, transition: Transition, now: Duration, settle: Duration) -> bool {
        if self.is_busy() {
            return false;
        }
        self.in_flight = Some(transition);
        self.settle.arm(now, settle);
        true
    }

    /// Release the guard if the settle deadline has passed at `now`.
    ///
    /// Returns the transition that settled.
    pub fn poll_settled(&mut self, now: Duration) -> Option<Transition> {
        if self.settle.take_if_due(now) {
            self.in_flight.take()
        } else {
            None
        }
    }

    /// True while a transition is in flight.
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The in-flight transition, if any.
    #[inline]
    #[must_use]
    pub fn in_flight(&self) -> Option<&Transition> {
        self.in_flight.as_ref()
    }

    /// When the in-flight transition settles.
    #[inline]
    #[must_use]
    pub fn settle_deadline(&self) -> Option<Duration> {
        self.settle.at()
    }
}
