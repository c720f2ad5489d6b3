#![forbid(unsafe_code)]

//! Submission flow: validate, send, queue on failure.

use std::sync::Arc;

use scrolly_core::storage::KeyValueStore;
use time::OffsetDateTime;

use crate::config::SiteConfig;
use crate::event_date::EventDateText;
use crate::form::{Attendance, FieldError, RsvpForm};
use crate::payload::RsvpPayload;
use crate::queue::{FlushReport, OfflineQueue};
use crate::transport::{SubmissionTransport, TransportError};

/// Catalog key of the submit button label while a request is in flight.
pub const SUBMITTING_LABEL_KEY: &str = "submittingLabel";
/// Catalog key of the idle submit button label.
pub const SUBMIT_LABEL_KEY: &str = "submitLabel";
/// Catalog key of the success toast.
pub const TOAST_SENT_KEY: &str = "toastSuccess";
/// Catalog key of the queued-for-retry toast.
pub const TOAST_QUEUED_KEY: &str = "toastQueued";

/// Where a valid submission ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitOutcome {
    /// Accepted by the endpoint; the form should be reset.
    Sent,
    /// Stored for a later retry.
    Queued,
}

/// What the page should show after a valid submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitResult {
    /// Delivery outcome.
    pub outcome: SubmitOutcome,
    /// Reveal the scheduling link.
    pub show_scheduling_link: bool,
}

impl SubmitResult {
    /// Catalog key of the toast to show.
    #[must_use]
    pub const fn toast_key(&self) -> &'static str {
        match self.outcome {
            SubmitOutcome::Sent => TOAST_SENT_KEY,
            SubmitOutcome::Queued => TOAST_QUEUED_KEY,
        }
    }
}

/// RSVP form controller.
#[derive(Debug)]
pub struct RsvpService<T> {
    config: SiteConfig,
    queue: OfflineQueue,
    transport: T,
    user_agent: String,
}

impl<T: SubmissionTransport> RsvpService<T> {
    /// Service for `config`, queueing into `store`.
    #[must_use]
    pub fn new(
        config: SiteConfig,
        store: Arc<dyn KeyValueStore>,
        transport: T,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            config,
            queue: OfflineQueue::new(store),
            transport,
            user_agent: user_agent.into(),
        }
    }

    /// Validate and submit `form` at wall-clock time `now`.
    ///
    /// Validation failures come back as `Err` with one entry per field.
    /// Delivery failures never do: the payload is queued instead.
    pub fn submit(
        &mut self,
        form: &RsvpForm,
        now: OffsetDateTime,
    ) -> Result<SubmitResult, Vec<FieldError>> {
        let valid = form.validate()?;
        let attendance = valid.attendance;
        let payload = RsvpPayload::new(valid, now, self.user_agent.as_str(), &self.config);

        let sent = match self.config.endpoint() {
            Some(endpoint) => self.transport.send(endpoint, &payload),
            None => Err(TransportError::EndpointMissing),
        };
        let outcome = match sent {
            Ok(()) => {
                tracing::debug!(attendance = attendance.as_str(), "rsvp sent");
                SubmitOutcome::Sent
            }
            Err(err) => {
                tracing::warn!(error = %err, "rsvp send failed, queueing");
                if let Err(err) = self.queue.push(payload) {
                    tracing::warn!(error = %err, "rsvp could not be queued");
                }
                SubmitOutcome::Queued
            }
        };
        Ok(SubmitResult {
            outcome,
            show_scheduling_link: self.shows_scheduling_link(attendance),
        })
    }

    /// Retry queued submissions.
    pub fn flush_queue(&mut self) -> FlushReport {
        let endpoint = self.config.endpoint();
        match self.queue.flush(endpoint, &mut self.transport) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(error = %err, "rsvp queue flush failed");
                FlushReport {
                    sent: 0,
                    remaining: self.queue.len(),
                }
            }
        }
    }

    /// Page visibility changed; retries when visible and online.
    pub fn on_visibility_change(&mut self, visible: bool, online: bool) -> Option<FlushReport> {
        (visible && online).then(|| self.flush_queue())
    }

    /// Event date text for the page language, if configured.
    #[must_use]
    pub fn event_date_text(&self, lang: &str) -> Option<EventDateText> {
        self.config
            .event_date()
            .map(|iso| EventDateText::render(iso, lang))
    }

    /// Submit button label key.
    #[must_use]
    pub const fn submit_label_key(submitting: bool) -> &'static str {
        if submitting {
            SUBMITTING_LABEL_KEY
        } else {
            SUBMIT_LABEL_KEY
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// The offline queue.
    #[must_use]
    pub fn queue(&self) -> &OfflineQueue {
        &self.queue
    }

    /// The transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn shows_scheduling_link(&self, attendance: Attendance) -> bool {
        attendance == Attendance::Yes && self.config.scheduling_url().is_some()
    }
}
