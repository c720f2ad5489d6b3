#![forbid(unsafe_code)]

//! Guest-name combobox.
//!
//! Filters the invitee list (minus guests who already replied) by a
//! case-insensitive substring of the typed term and keeps the listbox state:
//! open/closed, the active option and the screen-reader status line. The
//! host owns the input element and mirrors [`Typeahead::value`] into it.

use serde::{Deserialize, Serialize};

use scrolly_core::event::{KeyCode, KeyEvent};

/// One invited guest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Invitee {
    /// Display name, also the value submitted with the RSVP.
    pub name: String,
}

impl Invitee {
    /// Guest called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Shape of the invitee data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteeList {
    /// Guests, in display order.
    #[serde(default)]
    pub invitees: Vec<Invitee>,
}

/// Tunables for [`Typeahead`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeaheadConfig {
    /// Maximum options shown.
    pub limit: usize,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self { limit: 8 }
    }
}

impl TypeaheadConfig {
    /// Set the result limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Result of a key press in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a combobox key.
    Ignored,
    /// Handled; the host should call `preventDefault` when the flag is set.
    Handled {
        /// Suppress the browser default.
        prevent_default: bool,
    },
    /// An option was chosen; the host should fire a `change` event.
    Selected(String),
}

/// Combobox state.
#[derive(Debug, Clone)]
pub struct Typeahead {
    available: Vec<Invitee>,
    filtered: Vec<usize>,
    active: Option<usize>,
    open: bool,
    value: String,
    status: String,
    config: TypeaheadConfig,
}

impl Typeahead {
    /// Build from the full invitee list and the names that already replied.
    ///
    /// Confirmed names are matched exactly.
    #[must_use]
    pub fn new(invitees: Vec<Invitee>, confirmed: &[String], config: TypeaheadConfig) -> Self {
        let available: Vec<Invitee> = invitees
            .into_iter()
            .filter(|inv| !confirmed.iter().any(|c| *c == inv.name))
            .collect();
        scrolly_core::debug!(
            available = available.len(),
            confirmed = confirmed.len(),
            "typeahead ready"
        );
        let mut typeahead = Self {
            available,
            filtered: Vec::new(),
            active: None,
            open: false,
            value: String::new(),
            status: String::new(),
            config,
        };
        typeahead.filter();
        typeahead
    }

    /// The input's text changed.
    pub fn set_input(&mut self, value: &str) {
        value.clone_into(&mut self.value);
        self.filter();
    }

    /// The input gained focus: reopen for a non-empty term.
    pub fn focus(&mut self) {
        if !self.value.trim().is_empty() {
            self.filter();
        }
    }

    /// Re-run the filter with the current value.
    pub fn refresh(&mut self) {
        self.filter();
    }

    /// A click landed outside the widget.
    pub fn click_outside(&mut self) {
        self.close();
    }

    /// Keyboard handling for the input.
    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        if !key.is_down() {
            return KeyOutcome::Ignored;
        }
        if !self.open && matches!(key.code, KeyCode::Down | KeyCode::Up) {
            self.filter();
        }
        match key.code {
            KeyCode::Down => {
                let last = self.filtered.len().checked_sub(1);
                self.active = match (self.active, last) {
                    (_, None) => None,
                    (None, Some(_)) => Some(0),
                    (Some(i), Some(last)) => Some((i + 1).min(last)),
                };
                KeyOutcome::Handled {
                    prevent_default: true,
                }
            }
            KeyCode::Up => {
                self.active = if self.filtered.is_empty() {
                    None
                } else {
                    Some(self.active.map_or(0, |i| i.saturating_sub(1)))
                };
                KeyOutcome::Handled {
                    prevent_default: true,
                }
            }
            KeyCode::Enter => match self.active {
                Some(i) if self.open => match self.select(i) {
                    Some(name) => KeyOutcome::Selected(name),
                    None => KeyOutcome::Ignored,
                },
                _ => KeyOutcome::Ignored,
            },
            KeyCode::Escape => {
                self.close();
                KeyOutcome::Handled {
                    prevent_default: false,
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Choose the option at `index` (pointer or Enter). Returns its name.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let name = self.available[*self.filtered.get(index)?].name.clone();
        self.value.clone_from(&name);
        self.close();
        scrolly_core::debug!(index, "typeahead option selected");
        Some(name)
    }

    /// Names of the options currently listed.
    pub fn results(&self) -> impl Iterator<Item = &str> {
        self.filtered.iter().map(|&i| self.available[i].name.as_str())
    }

    /// Number of listed options.
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.filtered.len()
    }

    /// Highlighted option.
    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// `aria-expanded` of the input.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current input text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Text for the polite status region.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Guests that can still reply.
    #[must_use]
    pub fn available(&self) -> &[Invitee] {
        &self.available
    }

    fn close(&mut self) {
        self.open = false;
        self.active = None;
    }

    fn filter(&mut self) {
        let term = self.value.trim().to_lowercase();
        let limit = self.config.limit;
        if term.is_empty() {
            self.filtered = (0..self.available.len().min(limit)).collect();
            self.close();
            self.status.clear();
            return;
        }
        self.filtered = self
            .available
            .iter()
            .enumerate()
            .filter(|(_, inv)| inv.name.to_lowercase().contains(&term))
            .map(|(i, _)| i)
            .take(limit)
            .collect();
        self.active = None;
        if self.filtered.is_empty() {
            self.open = false;
            self.status = "0 resultados".to_string();
        } else {
            self.open = true;
            self.status = format!("{} resultados", self.filtered.len());
        }
    }
}
