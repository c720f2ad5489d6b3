#![forbid(unsafe_code)]

//! Scrolly public facade crate.
//!
//! Re-exports the types a host page needs and provides [`Site`], which wires
//! navigation, language switching, dialogs and the RSVP form together the
//! way the microsite boots.

use std::fmt;

pub mod site;

// --- Core re-exports -------------------------------------------------------

pub use scrolly_core::clock::{Clock, HostClock};
pub use scrolly_core::event::{
    ButtonEvent, ButtonRole, EditableKind, FocusContext, InputEvent, KeyCode, KeyEvent,
    KeyEventKind, TouchEvent, TouchPhase, WheelEvent,
};
pub use scrolly_core::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

#[cfg(feature = "tracing-json")]
pub use scrolly_core::logging::init_json_logging;

// --- Navigation re-exports -------------------------------------------------

pub use scrolly_nav::{
    ArbiterConfig, AutoRedirect, ControlState, MotionPreference, NavConfig, NavController,
    NavInitError, PanelPlacement, PanelSurface, Progress, StaticMotion, Transition, Trigger,
};

// --- I18n re-exports -------------------------------------------------------

pub use scrolly_i18n::{Binding, BindingTarget, Catalog, I18n, ListenerId};

// --- Widget re-exports -----------------------------------------------------

pub use scrolly_widgets::{
    Carousel, CarouselConfig, CarouselSurface, Invitee, InviteeList, KeyOutcome, MediaKind,
    ModalContent, ModalHost, ModalManager, Slide, Typeahead, TypeaheadConfig,
};

// --- RSVP re-exports -------------------------------------------------------

pub use scrolly_rsvp::{
    Attendance, ConfigError, EventDateText, FieldError, RsvpForm, RsvpPayload, RsvpRecord,
    RsvpService, RsvpStats, SiteConfig, SubmissionTransport, SubmitOutcome, SubmitResult,
    TransportError, filter_records,
};

pub use site::{SITE_AUTO_REDIRECT_DELAY, Site, SiteContent, SiteContext, SiteEnv};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for site bootstrap.
#[derive(Debug)]
pub enum Error {
    /// The page has no panels.
    Nav(NavInitError),
    /// Site configuration or content could not be read.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nav(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Nav(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<NavInitError> for Error {
    fn from(err: NavInitError) -> Self {
        Self::Nav(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for scrolly APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Catalog, Error, I18n, InputEvent, KeyCode, KeyEvent, MemoryStore, NavConfig,
        PanelPlacement, PanelSurface, Progress, Result, RsvpForm, Site, SiteConfig, SiteContent,
        SiteContext, SiteEnv,
    };
}
