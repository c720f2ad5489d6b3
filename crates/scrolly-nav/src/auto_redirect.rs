#![forbid(unsafe_code)]

//! One-shot delayed jump to a preset panel.
//!
//! The page may open on one panel and, unless the visitor does something
//! first, move itself to another after a delay. The scheduler is armed once at
//! construction and then either fires or is cancelled; it never re-arms.

use std::time::Duration;

use scrolly_core::timer::{OneShot, OneShotState};

/// Delay used when an [`AutoRedirect`] does not specify one.
pub const DEFAULT_AUTO_REDIRECT_DELAY: Duration = Duration::from_millis(3000);

/// Requested auto-redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRedirect {
    /// Panel to move to.
    pub target_index: usize,
    /// Delay after construction; [`DEFAULT_AUTO_REDIRECT_DELAY`] when `None`.
    pub delay: Option<Duration>,
}

impl AutoRedirect {
    /// Redirect to `target_index` after the default delay.
    #[must_use]
    pub const fn new(target_index: usize) -> Self {
        Self {
            target_index,
            delay: None,
        }
    }

    /// Set the delay.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Build from a signed millisecond delay, clamping negatives to zero.
    #[must_use]
    pub fn from_millis(target_index: usize, delay_ms: i64) -> Self {
        Self::new(target_index).with_delay(Duration::from_millis(delay_ms.max(0).unsigned_abs()))
    }

    /// Delay actually used.
    #[must_use]
    pub fn effective_delay(&self) -> Duration {
        self.delay.unwrap_or(DEFAULT_AUTO_REDIRECT_DELAY)
    }
}

/// Holds the auto-redirect timer and its target.
#[derive(Debug, Clone)]
pub struct AutoRedirectScheduler {
    target: Option<usize>,
    timer: OneShot,
}

impl AutoRedirectScheduler {
    /// Arm the scheduler at `now` if `redirect` asks for a real move.
    ///
    /// Nothing is armed when `redirect` is `None`, when its target equals
    /// `initial_index`, or when there is only one panel.
    #[must_use]
    pub fn arm(
        redirect: Option<AutoRedirect>,
        initial_index: usize,
        panel_count: usize,
        now: Duration,
    ) -> Self {
        let mut timer = OneShot::new();
        let target = redirect.filter(|s| s.target_index != initial_index && panel_count > 1);
        if let Some(redirect) = target {
            // A fresh one-shot always accepts its first arm.
            let _ = timer.arm(now, redirect.effective_delay());
            tracing::debug!(
                target_index = redirect.target_index,
                delay_ms = redirect.effective_delay().as_millis() as u64,
                "auto-redirect armed"
            );
        }
        Self {
            target: target.map(|s| s.target_index),
            timer,
        }
    }

    /// Cancel the pending redirect. Returns `true` the one time it cancels.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.timer.cancel();
        if cancelled {
            tracing::debug!(target_index = ?self.target, "auto-redirect cancelled");
        }
        cancelled
    }

    /// Return the target if the redirect fires at `now`.
    pub fn poll(&mut self, now: Duration) -> Option<usize> {
        if self.timer.poll(now) {
            self.target
        } else {
            None
        }
    }

    /// When the redirect fires, while pending.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    /// True while the redirect is waiting to fire.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Lifecycle state of the underlying timer.
    #[inline]
    #[must_use]
    pub fn state(&self) -> OneShotState {
        self.timer.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn arms_with_default_delay() {
        let mut sched = AutoRedirectScheduler::arm(Some(AutoRedirect::new(0)), 3, 4, ms(0));
        assert!(sched.is_pending());
        assert_eq!(sched.deadline(), Some(ms(3000)));
        assert_eq!(sched.poll(ms(2999)), None);
        assert_eq!(sched.poll(ms(3000)), Some(0));
        assert_eq!(sched.poll(ms(9000)), None);
        assert_eq!(sched.state(), OneShotState::Fired);
    }

    #[test]
    fn not_armed_without_a_real_move() {
        let same = AutoRedirectScheduler::arm(Some(AutoRedirect::new(2)), 2, 4, ms(0));
        assert!(!same.is_pending());
        let single = AutoRedirectScheduler::arm(Some(AutoRedirect::new(0)), 1, 1, ms(0));
        assert!(!single.is_pending());
        let none = AutoRedirectScheduler::arm(None, 0, 4, ms(0));
        assert_eq!(none.state(), OneShotState::Unarmed);
    }

    #[test]
    fn negative_delay_clamps_to_zero() {
        let redirect = AutoRedirect::from_millis(0, -250);
        assert_eq!(redirect.effective_delay(), Duration::ZERO);
        let mut sched = AutoRedirectScheduler::arm(Some(redirect), 2, 3, ms(10));
        assert_eq!(sched.poll(ms(10)), Some(0));
    }

    #[test]
    fn cancel_is_permanent() {
        let mut sched =
            AutoRedirectScheduler::arm(Some(AutoRedirect::new(0).with_delay(ms(100))), 1, 2, ms(0));
        assert!(sched.cancel());
        assert!(!sched.cancel());
        assert_eq!(sched.poll(ms(1000)), None);
        assert_eq!(sched.state(), OneShotState::Cancelled);
    }
}
