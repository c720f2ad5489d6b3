#![forbid(unsafe_code)]

//! The navigation controller façade.
//!
//! # State machine
//!
//! ```text
//!            go_to(target) accepted
//!   ┌──────┐ ───────────────────────▶ ┌───────────────┐
//!   │ Idle │                          │ Transitioning │
//!   └──────┘ ◀─────────────────────── └───────────────┘
//!              settle deadline due
//!              (focus moves to the current panel)
//! ```
//!
//! `go_to` checks, in order: target in range, target differs from the current
//! index, guard idle. Failing any check drops the request silently. On
//! acceptance the pending auto-redirect is cancelled, the index moves, the new
//! frame is applied synchronously, and a settle deadline is armed: zero when
//! the environment asks for reduced motion, otherwise the configured settle
//! duration.
//!
//! # Time
//!
//! The host advances time with [`NavController::advance`] or
//! [`NavController::set_time`]. Due timers fire in deadline order, each at its
//! own deadline, and every entry point fires whatever is already due before
//! handling its own request. A zero-length settle therefore completes before
//! the next input is looked at, just as a zero-delay browser timer would.
//!
//! # Invariants
//!
//! 1. `0 <= index() < panel_count()` at all times.
//! 2. At most one transition is in flight.
//! 3. The auto-redirect fires or is cancelled, never both, and never re-arms.
//! 4. No request is queued; requests during a transition are dropped.

use std::fmt;
use std::time::Duration;

use scrolly_core::clock::{Clock, HostClock};
use scrolly_core::event::InputEvent;

use crate::arbiter::{ArbiterConfig, InputArbiter};
use crate::auto_redirect::{AutoRedirect, AutoRedirectScheduler};
use crate::guard::TransitionGuard;
use crate::intent::{Transition, Trigger};
use crate::panel_state::{PanelFrame, PanelSequence, PanelState, PanelSurface};

/// Settle duration used when motion is allowed.
pub const DEFAULT_SETTLE_DURATION: Duration = Duration::from_millis(450);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavConfig {
    /// Index shown first; clamped into range.
    /// Default: 0
    pub initial_index: usize,

    /// Optional one-shot redirect.
    /// Default: none
    pub auto_redirect: Option<AutoRedirect>,

    /// Settle duration when motion is allowed. `None` uses
    /// [`DEFAULT_SETTLE_DURATION`].
    pub settle_duration: Option<Duration>,

    /// Input recognition thresholds.
    pub arbiter: ArbiterConfig,
}

impl NavConfig {
    /// Set the initial index.
    #[must_use]
    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    /// Set the auto-redirect.
    #[must_use]
    pub fn with_auto_redirect(mut self, redirect: AutoRedirect) -> Self {
        self.auto_redirect = Some(redirect);
        self
    }

    /// Set the settle duration used when motion is allowed.
    #[must_use]
    pub fn with_settle_duration(mut self, settle: Duration) -> Self {
        self.settle_duration = Some(settle);
        self
    }

    /// Set the input thresholds.
    #[must_use]
    pub fn with_arbiter(mut self, arbiter: ArbiterConfig) -> Self {
        self.arbiter = arbiter;
        self
    }
}

/// Environment signal: does the visitor prefer reduced motion?
///
/// Read once per accepted transition.
pub trait MotionPreference {
    /// True when transitions should settle instantly.
    fn prefers_reduced_motion(&self) -> bool;
}

/// A fixed motion preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticMotion(pub bool);

impl MotionPreference for StaticMotion {
    fn prefers_reduced_motion(&self) -> bool {
        self.0
    }
}

impl<F: Fn() -> bool> MotionPreference for F {
    fn prefers_reduced_motion(&self) -> bool {
        self()
    }
}

/// Why a controller could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInitError {
    /// The page has no panels to navigate.
    NoPanels,
}

impl fmt::Display for NavInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPanels => f.write_str("no panels found; navigation disabled"),
        }
    }
}

impl std::error::Error for NavInitError {}

// ---------------------------------------------------------------------------
// NavController
// ---------------------------------------------------------------------------

/// Owns the navigation state of one page.
pub struct NavController<P, S, M> {
    panels: PanelSequence<P>,
    surface: S,
    motion: M,
    state: PanelState,
    guard: TransitionGuard,
    auto_redirect: AutoRedirectScheduler,
    arbiter: InputArbiter,
    clock: HostClock,
    settle_duration: Duration,
}

impl<P, S, M> NavController<P, S, M>
where
    S: PanelSurface<P>,
    M: MotionPreference,
{
    /// Build a controller at time zero.
    ///
    /// Makes every panel script-focusable, applies the first frame, focuses
    /// the initial panel, and arms the auto-redirect. Fails only when
    /// `panels` is empty, in which case navigation is disabled.
    pub fn new(
        panels: Vec<P>,
        surface: S,
        motion: M,
        config: NavConfig,
    ) -> Result<Self, NavInitError> {
        Self::with_clock(panels, surface, motion, config, HostClock::new())
    }

    /// Build a controller whose clock starts at `clock`'s current time.
    pub fn with_clock(
        panels: Vec<P>,
        mut surface: S,
        motion: M,
        config: NavConfig,
        clock: HostClock,
    ) -> Result<Self, NavInitError> {
        let Some(panels) = PanelSequence::new(panels) else {
            tracing::warn!("navigation disabled: no panels");
            return Err(NavInitError::NoPanels);
        };
        let count = panels.len();
        let state = PanelState::new(config.initial_index, count);
        let auto_redirect =
            AutoRedirectScheduler::arm(config.auto_redirect, state.current(), count, clock.now());

        for panel in panels.iter() {
            surface.make_focusable(panel);
        }
        state.apply(&panels, &mut surface);
        if let Some(panel) = panels.get(state.current()) {
            surface.focus(panel);
        }

        tracing::debug!(
            panels = count,
            initial = state.current(),
            "navigation controller ready"
        );

        Ok(Self {
            arbiter: InputArbiter::new(config.arbiter, count),
            settle_duration: config.settle_duration.unwrap_or(DEFAULT_SETTLE_DURATION),
            panels,
            surface,
            motion,
            state,
            guard: TransitionGuard::new(),
            auto_redirect,
            clock,
        })
    }

    // -----------------------------------------------------------------------
    // Requests
    // -----------------------------------------------------------------------

    /// Request a move to `index`.
    ///
    /// Dropped silently when out of range, already current, or while a
    /// transition is in flight. Tagged as a [`Trigger::Button`] request.
    pub fn go_to(&mut self, index: usize) {
        self.request(Some(index), Trigger::Button);
    }

    /// Request a move to `index`, recording `trigger` on the transition.
    pub fn go_to_with(&mut self, index: usize, trigger: Trigger) {
        self.request(Some(index), trigger);
    }

    /// Request the next panel. No-op on the last panel.
    pub fn next(&mut self) {
        self.request(self.state.current().checked_add(1), Trigger::Button);
    }

    /// Request the previous panel. No-op on the first panel.
    pub fn prev(&mut self) {
        self.request(self.state.current().checked_sub(1), Trigger::Button);
    }

    /// Feed one input event.
    ///
    /// Returns `true` when the host should suppress the event's default
    /// browser action.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.fire_due_timers();
        if let InputEvent::Visibility(visible) = event {
            self.on_visibility_change(*visible);
            return false;
        }
        let arbitration = self.arbiter.arbitrate(event, self.clock.now());
        if let Some((intent, trigger)) = arbitration.intent {
            let now = self.clock.now();
            self.try_transition(intent.target(self.state.current()), trigger, now);
        }
        arbitration.prevent_default
    }

    /// The page became visible or hidden.
    ///
    /// On becoming visible, focus returns to the current panel; the index
    /// does not change.
    pub fn on_visibility_change(&mut self, visible: bool) {
        if visible {
            self.focus_current();
        }
    }

    /// Re-apply the current frame, e.g. after a language change re-rendered
    /// the progress template.
    pub fn refresh(&mut self) {
        self.state.apply(&self.panels, &mut self.surface);
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Advance the clock by `dt` and fire due timers.
    pub fn advance(&mut self, dt: Duration) {
        self.clock.advance(dt);
        self.fire_due_timers();
    }

    /// Move the clock to `now` (never backwards) and fire due timers.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
        self.fire_due_timers();
    }

    /// Fire every timer due at the current time, in deadline order.
    pub fn fire_due_timers(&mut self) {
        let now = self.clock.now();
        loop {
            let settle = self.guard.settle_deadline().filter(|at| *at <= now);
            let redirect = self.auto_redirect.deadline().filter(|at| *at <= now);
            match (settle, redirect) {
                (Some(settle_at), Some(redirect_at)) if settle_at <= redirect_at => {
                    self.settle(settle_at);
                }
                (Some(settle_at), None) => self.settle(settle_at),
                (_, Some(redirect_at)) => {
                    let target = self.auto_redirect.poll(redirect_at);
                    tracing::debug!(target_index = ?target, "auto-redirect fired");
                    self.try_transition(target, Trigger::Auto, redirect_at);
                }
                (None, None) => break,
            }
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current panel index.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.state.current()
    }

    /// Number of panels.
    #[inline]
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// True while a transition is in flight.
    #[inline]
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.guard.is_busy()
    }

    /// The in-flight transition, if any.
    #[inline]
    #[must_use]
    pub fn in_flight(&self) -> Option<&Transition> {
        self.guard.in_flight()
    }

    /// True while the auto-redirect is waiting to fire.
    #[inline]
    #[must_use]
    pub fn auto_redirect_pending(&self) -> bool {
        self.auto_redirect.is_pending()
    }

    /// The auto-redirect scheduler.
    #[inline]
    #[must_use]
    pub fn auto_redirect(&self) -> &AutoRedirectScheduler {
        &self.auto_redirect
    }

    /// Frame for the current index.
    #[must_use]
    pub fn frame(&self) -> PanelFrame {
        self.state.frame()
    }

    /// Current monotonic time.
    #[inline]
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// The panel handles.
    #[inline]
    #[must_use]
    pub fn panels(&self) -> &PanelSequence<P> {
        &self.panels
    }

    /// The surface being driven.
    #[inline]
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface.
    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn request(&mut self, target: Option<usize>, trigger: Trigger) {
        self.fire_due_timers();
        let now = self.clock.now();
        self.try_transition(target, trigger, now);
    }

    fn try_transition(&mut self, target: Option<usize>, trigger: Trigger, at: Duration) {
        let current = self.state.current();
        let Some(target) = target.filter(|t| self.state.contains(*t)) else {
            tracing::trace!(?target, %trigger, "navigation dropped: out of range");
            return;
        };
        if target == current {
            tracing::trace!(target, %trigger, "navigation dropped: already current");
            return;
        }
        let settle = if self.motion.prefers_reduced_motion() {
            Duration::ZERO
        } else {
            self.settle_duration
        };
        let transition = Transition {
            from: current,
            to: target,
            trigger,
        };
        if !self.guard.try_begin(transition, at, settle) {
            tracing::trace!(target, %trigger, "navigation dropped: transition in flight");
            return;
        }

        self.auto_redirect.cancel();
        self.state.set(target);
        self.state.apply(&self.panels, &mut self.surface);
        tracing::debug!(
            from = current,
            to = target,
            %trigger,
            settle_ms = settle.as_millis() as u64,
            "transition accepted"
        );
    }

    fn settle(&mut self, at: Duration) {
        if let Some(transition) = self.guard.poll_settled(at) {
            tracing::debug!(to = transition.to, trigger = %transition.trigger, "transition settled");
            self.focus_current();
        }
    }

    fn focus_current(&mut self) {
        if let Some(panel) = self.panels.get(self.state.current()) {
            self.surface.focus(panel);
        }
    }
}

impl<P, S, M> fmt::Debug for NavController<P, S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavController")
            .field("index", &self.state.current())
            .field("panels", &self.panels.len())
            .field("in_flight", &self.guard.in_flight())
            .field("auto_redirect", &self.auto_redirect.state())
            .field("now", &self.clock.now())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
