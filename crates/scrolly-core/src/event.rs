#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! The host page translates its raw DOM events into these values and pushes
//! them into whichever component owns the interaction. All events derive
//! `Clone` and `PartialEq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Coordinates are CSS pixels relative to the viewport.
//! - Wheel deltas keep the browser sign convention: positive `delta_y` scrolls
//!   the content down (towards later panels).
//! - Focus context travels with key events so consumers can ignore keys that
//!   belong to a text entry control without querying the page.
//! - `KeyEventKind` defaults to `Press`.

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer wheel or trackpad scroll.
    Wheel(WheelEvent),

    /// One phase of a touch gesture.
    Touch(TouchEvent),

    /// A keyboard event.
    Key(KeyEvent),

    /// A discrete on-screen control was activated.
    Button(ButtonEvent),

    /// The page visibility changed.
    ///
    /// `true` = page became visible, `false` = page was hidden.
    Visibility(bool),
}

// ---------------------------------------------------------------------------
// Wheel
// ---------------------------------------------------------------------------

/// A wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Horizontal delta.
    pub delta_x: f32,
    /// Vertical delta.
    pub delta_y: f32,
}

impl WheelEvent {
    /// Create a vertical wheel event.
    #[must_use]
    pub const fn vertical(delta_y: f32) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
        }
    }
}

// ---------------------------------------------------------------------------
// Touch
// ---------------------------------------------------------------------------

/// Phase of a touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger(s) placed on the surface.
    Start,
    /// Finger(s) moved.
    Move,
    /// Finger(s) lifted.
    End,
    /// The platform aborted the gesture.
    Cancel,
}

/// A touch event, reduced to the primary touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Gesture phase.
    pub phase: TouchPhase,
    /// Number of active touch points.
    pub touches: u8,
    /// Primary touch point x.
    pub x: f32,
    /// Primary touch point y.
    pub y: f32,
    /// True when the touch target sits inside a nested scrollable region.
    pub in_inner_scrollable: bool,
}

impl TouchEvent {
    /// Single-finger touch event at `(x, y)`.
    #[must_use]
    pub const fn new(phase: TouchPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            touches: 1,
            x,
            y,
            in_inner_scrollable: false,
        }
    }

    /// Set the number of active touch points.
    #[must_use]
    pub const fn with_touches(mut self, touches: u8) -> Self {
        self.touches = touches;
        self
    }

    /// Mark the touch target as inside an inner scrollable region.
    #[must_use]
    pub const fn inside_scrollable(mut self) -> Self {
        self.in_inner_scrollable = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,

    /// Where keyboard focus was when the key was pressed.
    pub focus: FocusContext,
}

impl KeyEvent {
    /// Create a key press with focus on the page.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            kind: KeyEventKind::Press,
            focus: FocusContext::Page,
        }
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Create a key event with a specific focus context.
    #[must_use]
    pub const fn with_focus(mut self, focus: FocusContext) -> Self {
        self.focus = focus;
        self
    }

    /// True when focus was inside a text entry control.
    #[must_use]
    pub const fn in_editable(&self) -> bool {
        matches!(self.focus, FocusContext::Editable(_))
    }

    /// True for press and repeat events.
    #[must_use]
    pub const fn is_down(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` value.
    ///
    /// Returns `None` for keys no component in this workspace reacts to.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Option<Self> {
        let code = match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,
    /// Key is being held (repeat event).
    Repeat,
    /// Key was released.
    Release,
}

/// Kind of text entry control that owns focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableKind {
    /// `<input>`.
    Input,
    /// `<textarea>`.
    TextArea,
    /// `<select>`.
    Select,
    /// An element with `contenteditable="true"`.
    ContentEditable,
}

/// Focus location at the time of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusContext {
    /// Focus on the document, a panel, or a non-editable control.
    #[default]
    Page,
    /// Focus inside a text entry control.
    Editable(EditableKind),
}

impl FocusContext {
    /// Classify a focused element by tag name and `contenteditable` state.
    #[must_use]
    pub fn from_element(tag_name: &str, content_editable: bool) -> Self {
        if content_editable {
            return Self::Editable(EditableKind::ContentEditable);
        }
        if tag_name.eq_ignore_ascii_case("input") {
            Self::Editable(EditableKind::Input)
        } else if tag_name.eq_ignore_ascii_case("textarea") {
            Self::Editable(EditableKind::TextArea)
        } else if tag_name.eq_ignore_ascii_case("select") {
            Self::Editable(EditableKind::Select)
        } else {
            Self::Page
        }
    }
}

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

/// Role of an activated on-screen control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonRole {
    /// "Previous" control.
    Previous,
    /// "Next" control.
    Next,
    /// A control bound to a specific position (e.g. a progress dot).
    Goto(usize),
}

/// A discrete control activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonEvent {
    /// What the control does.
    pub role: ButtonRole,
}

impl ButtonEvent {
    /// Create a button event.
    #[must_use]
    pub const fn new(role: ButtonRole) -> Self {
        Self { role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_keys_map_to_codes() {
        assert_eq!(KeyCode::from_dom_key("ArrowDown"), Some(KeyCode::Down));
        assert_eq!(KeyCode::from_dom_key("PageUp"), Some(KeyCode::PageUp));
        assert_eq!(KeyCode::from_dom_key("Esc"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_dom_key("a"), Some(KeyCode::Char('a')));
        assert_eq!(KeyCode::from_dom_key("F5"), None);
        assert_eq!(KeyCode::from_dom_key(""), None);
    }

    #[test]
    fn focus_context_classifies_editables() {
        assert_eq!(
            FocusContext::from_element("INPUT", false),
            FocusContext::Editable(EditableKind::Input)
        );
        assert_eq!(
            FocusContext::from_element("textarea", false),
            FocusContext::Editable(EditableKind::TextArea)
        );
        assert_eq!(
            FocusContext::from_element("div", true),
            FocusContext::Editable(EditableKind::ContentEditable)
        );
        assert_eq!(FocusContext::from_element("section", false), FocusContext::Page);
    }

    #[test]
    fn key_event_builders() {
        let event = KeyEvent::new(KeyCode::Down)
            .with_kind(KeyEventKind::Release)
            .with_focus(FocusContext::Editable(EditableKind::Select));
        assert!(KeyEvent::new(KeyCode::Down).is_down());
        assert!(!event.is_down());
        assert!(event.in_editable());
    }

    #[test]
    fn touch_builders() {
        let touch = TouchEvent::new(TouchPhase::Start, 1.0, 2.0)
            .with_touches(2)
            .inside_scrollable();
        assert_eq!(touch.touches, 2);
        assert!(touch.in_inner_scrollable);
    }
}
