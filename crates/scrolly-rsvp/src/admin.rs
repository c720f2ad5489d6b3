#![forbid(unsafe_code)]

//! Reply overview for the organisers' page.
//!
//! Stored replies are filtered by a name search and an attendance choice;
//! the counters are always computed over the filtered list, so they describe
//! what the table shows.

use serde::{Deserialize, Serialize};

use crate::form::Attendance;

/// One stored reply, as the backend lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRecord {
    /// Guest name.
    pub name: String,
    /// Attendance answer.
    pub attendance: Attendance,
    /// Allergy note, possibly empty.
    #[serde(default)]
    pub allergies: String,
    /// Backend creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl RsvpRecord {
    /// Reply from `name` with no note.
    #[must_use]
    pub fn new(name: impl Into<String>, attendance: Attendance) -> Self {
        Self {
            name: name.into(),
            attendance,
            allergies: String::new(),
            created_at: None,
        }
    }
}

/// Reply counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpStats {
    /// Replies counted.
    pub total: usize,
    /// Replies answering yes.
    pub attending: usize,
    /// Replies answering no.
    pub not_attending: usize,
}

impl RsvpStats {
    /// Count `records`.
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a RsvpRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut stats, record| {
                stats.total += 1;
                match record.attendance {
                    Attendance::Yes => stats.attending += 1,
                    Attendance::No => stats.not_attending += 1,
                }
                stats
            })
    }
}

/// Replies whose name contains `term` (trimmed, case-insensitive) and whose
/// answer equals `attendance` when one is given. Order is preserved.
#[must_use]
pub fn filter_records<'a>(
    records: &'a [RsvpRecord],
    term: &str,
    attendance: Option<Attendance>,
) -> Vec<&'a RsvpRecord> {
    let needle = term.trim().to_lowercase();
    records
        .iter()
        .filter(|r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
        .filter(|r| attendance.is_none_or(|a| r.attendance == a))
        .collect()
}
