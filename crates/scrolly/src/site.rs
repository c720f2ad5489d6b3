#![forbid(unsafe_code)]

//! Page bootstrap.
//!
//! [`Site::bootstrap`] receives everything it needs through an explicit
//! [`SiteContext`]: no component reads global state. The page opens on the
//! last panel and, unless the visitor moves first, returns to the cover after
//! [`SITE_AUTO_REDIRECT_DELAY`].
//!
//! # Invariants
//!
//! 1. Every successful language change re-applies the navigation frame.
//! 2. Dialog Escape handling never reaches navigation.
//! 3. Guests who already replied are never offered by the name typeahead.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use scrolly_core::event::{InputEvent, KeyCode, KeyEvent};
use scrolly_core::storage::KeyValueStore;
use scrolly_i18n::I18n;
use scrolly_nav::{AutoRedirect, MotionPreference, NavConfig, NavController, PanelSurface};
use scrolly_rsvp::{
    ConfigError, EventDateText, FieldError, FlushReport, RsvpForm, RsvpService, SiteConfig,
    SubmissionTransport, SubmitResult,
};
use scrolly_widgets::{
    InviteeList, KeyOutcome, ModalContent, ModalHost, ModalManager, Typeahead, TypeaheadConfig,
};
use time::OffsetDateTime;

use crate::Error;

/// Delay before the page returns from the last panel to the cover.
pub const SITE_AUTO_REDIRECT_DELAY: Duration = Duration::from_millis(3500);

/// Shape of the site content file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    /// Dialog content keyed by trigger id.
    #[serde(default)]
    pub modals: HashMap<String, ModalContent>,
}

impl SiteContent {
    /// Parse from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Shared state handed to every component at bootstrap.
pub struct SiteContext {
    /// Persistent key/value store (`localStorage`).
    pub store: Arc<dyn KeyValueStore>,
    /// Language context; its catalog is already loaded.
    pub i18n: I18n,
    /// Deployment settings.
    pub config: SiteConfig,
    /// Dialog content, if it could be loaded.
    pub content: Option<SiteContent>,
    /// Guest list for the name typeahead (`invitees.json`).
    pub invitees: InviteeList,
    /// Names that already replied. Empty when the lookup failed.
    pub confirmed: Vec<String>,
}

impl fmt::Debug for SiteContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteContext")
            .field("store", &self.store.name())
            .field("i18n", &self.i18n)
            .field("config", &self.config)
            .field("content", &self.content.is_some())
            .field("invitees", &self.invitees.invitees.len())
            .field("confirmed", &self.confirmed.len())
            .finish()
    }
}

/// Host-side collaborators.
#[derive(Debug)]
pub struct SiteEnv<M, T, H> {
    /// Reduced-motion preference, read per transition.
    pub motion: M,
    /// RSVP delivery.
    pub transport: T,
    /// Dialog DOM operations.
    pub modal_host: H,
    /// Browser user agent, sent with RSVPs.
    pub user_agent: String,
    /// Whether the browser reports a network connection.
    pub online: bool,
}

type SharedNav<P, S, M> = Rc<RefCell<NavController<P, S, M>>>;

/// The running page.
pub struct Site<P, S, M, T, H: ModalHost> {
    i18n: I18n,
    nav: SharedNav<P, S, M>,
    modals: ModalManager<H>,
    typeahead: Typeahead,
    rsvp: RsvpService<T>,
    online: bool,
}

impl<P, S, M, T, H> Site<P, S, M, T, H>
where
    P: 'static,
    S: PanelSurface<P> + 'static,
    M: MotionPreference + 'static,
    T: SubmissionTransport,
    H: ModalHost,
{
    /// Boot the page: navigation, language, dialogs, then RSVP.
    pub fn bootstrap(
        context: SiteContext,
        panels: Vec<P>,
        surface: S,
        env: SiteEnv<M, T, H>,
    ) -> Result<Self, Error> {
        let SiteContext {
            store,
            mut i18n,
            config,
            content,
            invitees,
            confirmed,
        } = context;

        let initial = panels.len().saturating_sub(1);
        let nav_config = NavConfig::default()
            .with_initial_index(initial)
            .with_auto_redirect(AutoRedirect::new(0).with_delay(SITE_AUTO_REDIRECT_DELAY));
        let nav = Rc::new(RefCell::new(NavController::new(
            panels, surface, env.motion, nav_config,
        )?));

        let listener_nav = Rc::clone(&nav);
        i18n.on_language_change(move |lang| {
            // A listener can run while the host holds a navigation borrow.
            match listener_nav.try_borrow_mut() {
                Ok(mut nav) => nav.refresh(),
                Err(_) => tracing::warn!(lang, "navigation busy, progress not refreshed"),
            }
        });
        let initial_lang = i18n.current_lang().to_owned();
        i18n.apply_language(&initial_lang);

        let content = content.unwrap_or_else(|| {
            tracing::warn!("site content unavailable, dialogs disabled");
            SiteContent::default()
        });
        let modals = ModalManager::new(content.modals, env.modal_host);
        let typeahead = Typeahead::new(invitees.invitees, &confirmed, TypeaheadConfig::default());

        let mut rsvp = RsvpService::new(config, store, env.transport, env.user_agent);
        if env.online {
            rsvp.flush_queue();
        }

        tracing::debug!(
            lang = i18n.current_lang(),
            panels = nav.borrow().panel_count(),
            "site bootstrapped"
        );
        Ok(Self {
            i18n,
            nav,
            modals,
            typeahead,
            rsvp,
            online: env.online,
        })
    }

    /// Route a page input. Returns `true` when the host should prevent the
    /// browser default.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) if key.code == KeyCode::Escape && self.modals.is_open() => {
                self.modals.handle_key(key)
            }
            InputEvent::Visibility(visible) => {
                self.nav.borrow_mut().handle_input(event);
                self.rsvp.on_visibility_change(*visible, self.online);
                false
            }
            _ => self.nav.borrow_mut().handle_input(event),
        }
    }

    /// Advance host time.
    pub fn advance(&mut self, dt: Duration) {
        self.nav.borrow_mut().advance(dt);
    }

    /// The browser went online or offline. Coming online retries the queue.
    pub fn set_online(&mut self, online: bool) -> Option<FlushReport> {
        self.online = online;
        online.then(|| self.rsvp.flush_queue())
    }

    /// Switch language; refreshes navigation on success.
    pub fn apply_language(&mut self, lang: &str) -> bool {
        self.i18n.apply_language(lang)
    }

    /// The language toggle button.
    pub fn toggle_language(&mut self) -> bool {
        self.i18n.toggle()
    }

    /// Translate `key` in the current language.
    #[must_use]
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.i18n.t(key)
    }

    /// A `data-modal-trigger` button was clicked.
    pub fn open_modal(&mut self, id: &str) -> bool {
        self.modals.open(id)
    }

    /// A dialog close button or backdrop was clicked.
    pub fn close_modal(&mut self) -> bool {
        self.modals.close()
    }

    /// The guest-name input changed.
    pub fn name_input(&mut self, value: &str) {
        self.typeahead.set_input(value);
    }

    /// The guest-name input gained focus.
    pub fn name_focus(&mut self) {
        self.typeahead.focus();
    }

    /// Keydown inside the guest-name input.
    pub fn name_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        self.typeahead.handle_key(key)
    }

    /// A typeahead option was clicked.
    pub fn select_name(&mut self, index: usize) -> Option<String> {
        self.typeahead.select(index)
    }

    /// A click landed outside the typeahead.
    pub fn name_click_outside(&mut self) {
        self.typeahead.click_outside();
    }

    /// Submit the RSVP form at wall-clock time `now`.
    pub fn submit_rsvp(
        &mut self,
        form: &RsvpForm,
        now: OffsetDateTime,
    ) -> Result<SubmitResult, Vec<FieldError>> {
        self.rsvp.submit(form, now)
    }

    /// Event date text in the current language.
    #[must_use]
    pub fn event_date_text(&self) -> Option<EventDateText> {
        self.rsvp.event_date_text(self.i18n.current_lang())
    }

    /// Navigation controller.
    pub fn nav(&self) -> Ref<'_, NavController<P, S, M>> {
        self.nav.borrow()
    }

    /// Navigation controller, mutably.
    pub fn nav_mut(&self) -> RefMut<'_, NavController<P, S, M>> {
        self.nav.borrow_mut()
    }

    /// Language context.
    #[must_use]
    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    /// Dialog manager.
    #[must_use]
    pub fn modals(&self) -> &ModalManager<H> {
        &self.modals
    }

    /// Guest-name typeahead.
    #[must_use]
    pub fn typeahead(&self) -> &Typeahead {
        &self.typeahead
    }

    /// RSVP service.
    #[must_use]
    pub fn rsvp(&self) -> &RsvpService<T> {
        &self.rsvp
    }
}

impl<P, S, M, T, H: ModalHost> fmt::Debug for Site<P, S, M, T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Site")
            .field("i18n", &self.i18n)
            .field("modals", &self.modals)
            .field("typeahead", &self.typeahead)
            .field("online", &self.online)
            .finish_non_exhaustive()
    }
}
