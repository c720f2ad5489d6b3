#![forbid(unsafe_code)]

//! JSON body sent to the RSVP endpoint.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::config::SiteConfig;
use crate::form::{Attendance, ValidRsvp};

/// UTC timestamp with millisecond precision, as browsers print it.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// One RSVP as sent (and as queued while offline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpPayload {
    /// Guest name.
    pub name: String,
    /// Allergy note, possibly empty.
    pub allergies: String,
    /// Attendance answer.
    pub attendance: Attendance,
    /// UTC timestamp of the submission, with milliseconds.
    pub submitted_at: String,
    /// Browser user agent.
    pub user_agent: String,
    /// Whether the backend should email the scheduling link.
    pub should_send_calendly_email: bool,
}

impl RsvpPayload {
    /// Build the payload for a validated form.
    #[must_use]
    pub fn new(
        rsvp: ValidRsvp,
        submitted_at: OffsetDateTime,
        user_agent: impl Into<String>,
        config: &SiteConfig,
    ) -> Self {
        Self {
            should_send_calendly_email: rsvp.attendance == Attendance::Yes
                && config.send_calendly_email,
            name: rsvp.name,
            allergies: rsvp.allergies,
            attendance: rsvp.attendance,
            submitted_at: timestamp_millis(submitted_at),
            user_agent: user_agent.into(),
        }
    }
}

/// Format `at` in UTC as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
#[must_use]
pub fn timestamp_millis(at: OffsetDateTime) -> String {
    at.to_offset(time::UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| "1970-01-01T00:00:00.000Z".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid(attendance: Attendance) -> ValidRsvp {
        ValidRsvp {
            name: "Ana".to_string(),
            allergies: String::new(),
            attendance,
        }
    }

    fn at() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(1_767_225_600).unwrap()
    }

    #[test]
    fn serializes_camel_case() {
        let config = SiteConfig::default().with_scheduling_email(true);
        let payload = RsvpPayload::new(valid(Attendance::Yes), at(), "Mozilla/5.0", &config);
        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ana",
                "allergies": "",
                "attendance": "yes",
                "submittedAt": "2026-01-01T00:00:00.000Z",
                "userAgent": "Mozilla/5.0",
                "shouldSendCalendlyEmail": true
            })
        );
    }

    #[test]
    fn scheduling_email_needs_yes_and_flag() {
        let on = SiteConfig::default().with_scheduling_email(true);
        let off = SiteConfig::default();
        assert!(!RsvpPayload::new(valid(Attendance::No), at(), "", &on).should_send_calendly_email);
        assert!(!RsvpPayload::new(valid(Attendance::Yes), at(), "", &off).should_send_calendly_email);
    }

    #[test]
    fn timestamp_is_normalized_to_utc() {
        let local = at().to_offset(time::UtcOffset::from_hms(-6, 0, 0).unwrap());
        assert_eq!(timestamp_millis(local), "2026-01-01T00:00:00.000Z");
    }

    #[test]
    fn timestamp_keeps_milliseconds() {
        let at = at() + time::Duration::milliseconds(1_234) + time::Duration::microseconds(999);
        assert_eq!(timestamp_millis(at), "2026-01-01T00:00:01.234Z");
    }
}
