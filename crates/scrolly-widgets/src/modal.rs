#![forbid(unsafe_code)]

//! Content dialogs opened from trigger buttons.
//!
//! At most one dialog is open. Opening locks page scroll and remembers which
//! element had focus; closing undoes both. Escape and backdrop clicks close.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use scrolly_core::event::{KeyCode, KeyEvent};

/// Title and HTML body of one dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalContent {
    /// Heading text.
    #[serde(default)]
    pub title: Option<String>,
    /// Trusted HTML body.
    #[serde(default)]
    pub body: Option<String>,
}

/// Page operations the manager needs.
pub trait ModalHost {
    /// Opaque handle of a focusable element.
    type Focus;

    /// Build the dialog from the template, insert it and focus it.
    fn mount(&mut self, id: &str, content: &ModalContent);

    /// Remove the dialog.
    fn unmount(&mut self);

    /// Lock or unlock page scrolling.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Element that currently has focus.
    fn active_focus(&self) -> Option<Self::Focus>;

    /// Return focus to `target` without scrolling.
    fn restore_focus(&mut self, target: Self::Focus);
}

struct OpenModal<F> {
    id: String,
    restore: Option<F>,
}

/// Single-dialog manager.
pub struct ModalManager<H: ModalHost> {
    content: HashMap<String, ModalContent>,
    host: H,
    current: Option<OpenModal<H::Focus>>,
}

impl<H: ModalHost> ModalManager<H> {
    /// Manager over a content map keyed by trigger id.
    #[must_use]
    pub fn new(content: HashMap<String, ModalContent>, host: H) -> Self {
        Self {
            content,
            host,
            current: None,
        }
    }

    /// Open dialog `id`, closing any open one first.
    ///
    /// Unknown ids are ignored and leave the current dialog open.
    pub fn open(&mut self, id: &str) -> bool {
        let Some(content) = self.content.get(id) else {
            scrolly_core::trace!(id, "unknown modal id ignored");
            return false;
        };
        let content = content.clone();
        self.close();
        let restore = self.host.active_focus();
        self.host.mount(id, &content);
        self.host.set_scroll_locked(true);
        self.current = Some(OpenModal {
            id: id.to_string(),
            restore,
        });
        scrolly_core::debug!(id, "modal opened");
        true
    }

    /// Close the open dialog. Returns `false` when none was open.
    pub fn close(&mut self) -> bool {
        let Some(open) = self.current.take() else {
            return false;
        };
        self.host.unmount();
        self.host.set_scroll_locked(false);
        if let Some(target) = open.restore {
            self.host.restore_focus(target);
        }
        scrolly_core::debug!(id = %open.id, "modal closed");
        true
    }

    /// Window keydown. Escape closes; returns `true` to prevent default.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        key.is_down() && key.code == KeyCode::Escape && self.close()
    }

    /// A click landed on the backdrop.
    pub fn backdrop_click(&mut self) -> bool {
        self.close()
    }

    /// Id of the open dialog.
    #[must_use]
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|open| open.id.as_str())
    }

    /// True while a dialog is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Known dialog ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.content.keys().map(String::as_str)
    }
}

impl<H: ModalHost> std::fmt::Debug for ModalManager<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalManager")
            .field("dialogs", &self.content.len())
            .field("current", &self.current_id())
            .finish()
    }
}
