#![forbid(unsafe_code)]

//! RSVP form handling.
//!
//! Validation, the submission payload, an offline queue persisted in a
//! [`KeyValueStore`](scrolly_core::storage::KeyValueStore), and the service
//! tying them to a [`SubmissionTransport`]. Also hosts the site configuration
//! and event-date formatting, both read from `site.config.json`, and the
//! reply filters and counters of the organisers' page.

pub mod admin;
pub mod config;
pub mod event_date;
pub mod form;
pub mod payload;
pub mod queue;
pub mod service;
pub mod transport;

pub use admin::{RsvpRecord, RsvpStats, filter_records};
pub use config::{ConfigError, SiteConfig};
pub use event_date::{EventDate, EventDateText};
pub use form::{ALLERGIES_MAX_LEN, Attendance, Field, FieldError, RsvpForm, ValidRsvp};
pub use payload::RsvpPayload;
pub use queue::{FlushReport, OfflineQueue, QUEUE_STORAGE_KEY, QueueError};
pub use service::{RsvpService, SubmitOutcome, SubmitResult};
pub use transport::{SubmissionTransport, TransportError};
