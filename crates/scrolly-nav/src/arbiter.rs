#![forbid(unsafe_code)]

//! Input arbitration: raw page input in, at most one [`NavIntent`] out.
//!
//! # Channels
//!
//! | Channel | Rule |
//! |---------|------|
//! | Wheel   | One intent per cool-down window; `|delta_y|` below the noise floor is ignored |
//! | Touch   | Single finger; intent once the vertical drag reaches the swipe threshold; gestures starting in an inner scrollable region are ignored |
//! | Key     | Ignored inside editable controls; arrows/page keys step, Home/End jump |
//! | Button  | Previous/Next step, Goto jumps |
//!
//! The arbiter keeps only two pieces of state between events: the start of
//! the in-progress touch gesture and the time the last wheel event was let
//! through. The cool-down window is consumed by every event that passes it,
//! including ones then discarded as noise.

use std::time::Duration;

use scrolly_core::event::{
    ButtonEvent, ButtonRole, InputEvent, KeyCode, KeyEvent, TouchEvent, TouchPhase, WheelEvent,
};

use crate::intent::{NavIntent, Trigger};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds used to recognise navigation input.
#[derive(Debug, Clone, PartialEq)]
pub struct ArbiterConfig {
    /// Minimum time between two wheel events that may produce intents.
    /// Default: 400ms
    pub wheel_cooldown: Duration,

    /// Wheel deltas with a smaller magnitude are noise.
    /// Default: 10.0
    pub wheel_noise_threshold: f32,

    /// Vertical drag distance, in pixels, that turns a touch into a swipe.
    /// Default: 50.0
    pub swipe_threshold: f32,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            wheel_cooldown: Duration::from_millis(400),
            wheel_noise_threshold: 10.0,
            swipe_threshold: 50.0,
        }
    }
}

impl ArbiterConfig {
    /// Set the wheel cool-down window.
    #[must_use]
    pub fn with_wheel_cooldown(mut self, cooldown: Duration) -> Self {
        self.wheel_cooldown = cooldown;
        self
    }

    /// Set the wheel noise floor.
    #[must_use]
    pub fn with_wheel_noise_threshold(mut self, threshold: f32) -> Self {
        self.wheel_noise_threshold = threshold;
        self
    }

    /// Set the swipe distance threshold.
    #[must_use]
    pub fn with_swipe_threshold(mut self, threshold: f32) -> Self {
        self.swipe_threshold = threshold;
        self
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Result of arbitrating one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Arbitration {
    /// The recognised intent and the channel it came from.
    pub intent: Option<(NavIntent, Trigger)>,
    /// The host should suppress the event's default browser action.
    pub prevent_default: bool,
}

impl Arbitration {
    const IGNORED: Self = Self {
        intent: None,
        prevent_default: false,
    };

    const SWALLOWED: Self = Self {
        intent: None,
        prevent_default: true,
    };

    const fn intent(intent: NavIntent, trigger: Trigger, prevent_default: bool) -> Self {
        Self {
            intent: Some((intent, trigger)),
            prevent_default,
        }
    }
}

// ---------------------------------------------------------------------------
// InputArbiter
// ---------------------------------------------------------------------------

/// Normalises input from every channel into navigation intents.
#[derive(Debug, Clone)]
pub struct InputArbiter {
    config: ArbiterConfig,
    panel_count: usize,
    /// Time the last wheel event passed the cool-down.
    last_wheel: Option<Duration>,
    /// Y coordinate where the current single-finger gesture started.
    touch_start_y: Option<f32>,
}

impl InputArbiter {
    /// Create an arbiter for a sequence of `panel_count` panels.
    #[must_use]
    pub fn new(config: ArbiterConfig, panel_count: usize) -> Self {
        Self {
            config,
            panel_count,
            last_wheel: None,
            touch_start_y: None,
        }
    }

    /// Arbitrate one event received at monotonic time `now`.
    pub fn arbitrate(&mut self, event: &InputEvent, now: Duration) -> Arbitration {
        match event {
            InputEvent::Wheel(wheel) => self.wheel(wheel, now),
            InputEvent::Touch(touch) => self.touch(touch),
            InputEvent::Key(key) => self.key(key),
            InputEvent::Button(button) => Self::button(button),
            InputEvent::Visibility(_) => Arbitration::IGNORED,
        }
    }

    /// True while a single-finger gesture is being tracked.
    #[inline]
    #[must_use]
    pub fn is_tracking_touch(&self) -> bool {
        self.touch_start_y.is_some()
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    fn wheel(&mut self, wheel: &WheelEvent, now: Duration) -> Arbitration {
        if let Some(last) = self.last_wheel
            && now.saturating_sub(last) < self.config.wheel_cooldown
        {
            return Arbitration::SWALLOWED;
        }
        self.last_wheel = Some(now);

        if wheel.delta_y.abs() < self.config.wheel_noise_threshold {
            return Arbitration::SWALLOWED;
        }
        let intent = if wheel.delta_y > 0.0 {
            NavIntent::Advance
        } else {
            NavIntent::Retreat
        };
        Arbitration::intent(intent, Trigger::Wheel, true)
    }

    fn touch(&mut self, touch: &TouchEvent) -> Arbitration {
        match touch.phase {
            TouchPhase::Start => {
                self.touch_start_y = (touch.touches == 1 && !touch.in_inner_scrollable)
                    .then_some(touch.y);
                Arbitration::IGNORED
            }
            TouchPhase::Move => {
                let Some(start_y) = self.touch_start_y else {
                    return Arbitration::IGNORED;
                };
                // Positive when the finger moved up, i.e. content should advance.
                let diff = start_y - touch.y;
                if diff.abs() < self.config.swipe_threshold {
                    return Arbitration::IGNORED;
                }
                self.touch_start_y = None;
                let intent = if diff > 0.0 {
                    NavIntent::Advance
                } else {
                    NavIntent::Retreat
                };
                Arbitration::intent(intent, Trigger::Touch, true)
            }
            TouchPhase::End | TouchPhase::Cancel => {
                self.touch_start_y = None;
                Arbitration::IGNORED
            }
        }
    }

    fn key(&self, key: &KeyEvent) -> Arbitration {
        if !key.is_down() || key.in_editable() {
            return Arbitration::IGNORED;
        }
        match key.code {
            KeyCode::Down | KeyCode::PageDown => {
                Arbitration::intent(NavIntent::Advance, Trigger::Key, true)
            }
            KeyCode::Up | KeyCode::PageUp => {
                Arbitration::intent(NavIntent::Retreat, Trigger::Key, true)
            }
            KeyCode::Home => Arbitration::intent(NavIntent::JumpTo(0), Trigger::Key, false),
            KeyCode::End => Arbitration::intent(
                NavIntent::JumpTo(self.panel_count.saturating_sub(1)),
                Trigger::Key,
                false,
            ),
            _ => Arbitration::IGNORED,
        }
    }

    fn button(button: &ButtonEvent) -> Arbitration {
        let intent = match button.role {
            ButtonRole::Previous => NavIntent::Retreat,
            ButtonRole::Next => NavIntent::Advance,
            ButtonRole::Goto(index) => NavIntent::JumpTo(index),
        };
        Arbitration::intent(intent, Trigger::Button, false)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
