#![forbid(unsafe_code)]

//! Panel navigation for a full-viewport, one-panel-at-a-time page.
//!
//! # Key Components
//!
//! - [`InputArbiter`] - turns wheel, touch, key, and button input into [`NavIntent`]s
//! - [`TransitionGuard`] - keeps at most one transition in flight
//! - [`PanelState`] - owns the current index and computes each [`PanelFrame`]
//! - [`AutoRedirectScheduler`] - one-shot delayed jump, cancelled by user input
//! - [`NavController`] - the façade composing all of the above
//!
//! # How it fits in the system
//!
//! The host page pushes [`scrolly_core::event::InputEvent`]s and advances time;
//! the controller answers by driving a [`PanelSurface`] that owns the actual
//! page elements. Requests that cannot be honoured (out of range, already
//! there, or arriving mid-transition) are dropped without error.

pub mod arbiter;
pub mod auto_redirect;
pub mod controller;
pub mod guard;
pub mod intent;
pub mod panel_state;

pub use arbiter::{ArbiterConfig, Arbitration, InputArbiter};
pub use auto_redirect::{AutoRedirect, AutoRedirectScheduler, DEFAULT_AUTO_REDIRECT_DELAY};
pub use controller::{
    DEFAULT_SETTLE_DURATION, MotionPreference, NavConfig, NavController, NavInitError,
    StaticMotion,
};
pub use guard::TransitionGuard;
pub use intent::{NavIntent, Transition, Trigger};
pub use panel_state::{
    ControlState, PanelFrame, PanelPlacement, PanelSequence, PanelState, PanelSurface, Progress,
};
