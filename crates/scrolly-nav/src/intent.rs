#![forbid(unsafe_code)]

//! Normalized navigation requests and the transitions they produce.

use std::fmt;

/// A navigation request, independent of the input that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavIntent {
    /// Move to the next panel.
    Advance,
    /// Move to the previous panel.
    Retreat,
    /// Move to a specific panel.
    JumpTo(usize),
}

impl NavIntent {
    /// Resolve the requested index relative to `current`.
    ///
    /// `None` when the request points before the first panel. Requests past
    /// the last panel resolve to an index the controller rejects as out of
    /// range.
    #[must_use]
    pub const fn target(self, current: usize) -> Option<usize> {
        match self {
            Self::Advance => current.checked_add(1),
            Self::Retreat => current.checked_sub(1),
            Self::JumpTo(index) => Some(index),
        }
    }
}

/// Input channel that caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Pointer wheel or trackpad.
    Wheel,
    /// Touch swipe.
    Touch,
    /// Keyboard.
    Key,
    /// On-screen control or programmatic request.
    Button,
    /// Scheduled auto-redirect.
    Auto,
}

impl Trigger {
    /// True for every trigger except [`Trigger::Auto`].
    #[must_use]
    pub const fn is_user(self) -> bool {
        !matches!(self, Self::Auto)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Wheel => "wheel",
            Self::Touch => "touch",
            Self::Key => "key",
            Self::Button => "button",
            Self::Auto => "auto",
        };
        f.write_str(name)
    }
}

/// An accepted move between two panels. Lives until the settle period ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Index before the transition.
    pub from: usize,
    /// Index after the transition.
    pub to: usize,
    /// What requested it.
    pub trigger: Trigger,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_resolve_relative_to_current() {
        assert_eq!(NavIntent::Advance.target(2), Some(3));
        assert_eq!(NavIntent::Retreat.target(2), Some(1));
        assert_eq!(NavIntent::Retreat.target(0), None);
        assert_eq!(NavIntent::JumpTo(7).target(2), Some(7));
        assert_eq!(NavIntent::Advance.target(usize::MAX), None);
    }

    #[test]
    fn only_auto_is_not_user() {
        assert!(Trigger::Wheel.is_user());
        assert!(Trigger::Button.is_user());
        assert!(!Trigger::Auto.is_user());
        assert_eq!(Trigger::Touch.to_string(), "touch");
    }
}
