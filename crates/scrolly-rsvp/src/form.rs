#![forbid(unsafe_code)]

//! RSVP form validation.
//!
//! Lengths are counted in grapheme clusters, which is what a visitor sees
//! as characters in the textarea.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Longest allergy note accepted.
pub const ALLERGIES_MAX_LEN: usize = 200;

/// Attendance answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    /// Attending.
    Yes,
    /// Not attending.
    No,
}

impl Attendance {
    /// Parse the radio group value.
    #[must_use]
    pub fn from_form(value: &str) -> Option<Self> {
        match value.trim() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }

    /// Form/payload value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

/// Validated form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Guest name.
    Name,
    /// Attendance radio group.
    Attendance,
    /// Allergy note.
    Allergies,
}

impl Field {
    /// Value of the matching `data-error-for` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Attendance => "attendance",
            Self::Allergies => "allergies",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed check, carrying the catalog key of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldError {
    /// Field the message belongs to.
    pub field: Field,
    /// Catalog key of the message.
    pub message_key: &'static str,
}

/// Raw form values as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpForm {
    /// Guest name.
    pub name: String,
    /// Allergy note.
    pub allergies: String,
    /// Checked attendance value, if any.
    pub attendance: Option<String>,
}

impl RsvpForm {
    /// Form for `name` with the given attendance value.
    #[must_use]
    pub fn new(name: impl Into<String>, attendance: Option<&str>) -> Self {
        Self {
            name: name.into(),
            allergies: String::new(),
            attendance: attendance.map(str::to_string),
        }
    }

    /// Set the allergy note.
    #[must_use]
    pub fn with_allergies(mut self, allergies: impl Into<String>) -> Self {
        self.allergies = allergies.into();
        self
    }

    /// Trim and check every field, reporting all failures at once.
    pub fn validate(&self) -> Result<ValidRsvp, Vec<FieldError>> {
        let name = self.name.trim();
        let allergies = self.allergies.trim();
        let attendance = self.attendance.as_deref().and_then(Attendance::from_form);

        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push(FieldError {
                field: Field::Name,
                message_key: "errorNameRequired",
            });
        }
        if attendance.is_none() {
            errors.push(FieldError {
                field: Field::Attendance,
                message_key: "errorAttendanceRequired",
            });
        }
        if char_count(allergies) > ALLERGIES_MAX_LEN {
            errors.push(FieldError {
                field: Field::Allergies,
                message_key: "errorAllergiesLength",
            });
        }

        match attendance {
            Some(attendance) if errors.is_empty() => Ok(ValidRsvp {
                name: name.to_string(),
                allergies: allergies.to_string(),
                attendance,
            }),
            _ => Err(errors),
        }
    }
}

/// Form values that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRsvp {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Trimmed allergy note, at most [`ALLERGIES_MAX_LEN`] characters.
    pub allergies: String,
    /// Attendance answer.
    pub attendance: Attendance,
}

/// Visible character count.
#[must_use]
pub fn char_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Live counter text under the allergy textarea, `"count / 200"`.
#[must_use]
pub fn allergy_counter(text: &str) -> String {
    format!("{} / {}", char_count(text), ALLERGIES_MAX_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn keys(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.message_key).collect()
    }

    #[test]
    fn valid_form_is_trimmed() {
        let valid = RsvpForm::new("  Ana García ", Some("yes"))
            .with_allergies(" nueces  ")
            .validate()
            .unwrap();
        assert_eq!(valid, ValidRsvp {
            name: "Ana García".to_string(),
            allergies: "nueces".to_string(),
            attendance: Attendance::Yes,
        });
    }

    #[test]
    fn reports_every_failure() {
        let errors = RsvpForm::new("   ", None)
            .with_allergies("x".repeat(201))
            .validate()
            .unwrap_err();
        assert_eq!(
            keys(&errors),
            vec!["errorNameRequired", "errorAttendanceRequired", "errorAllergiesLength"]
        );
        assert_eq!(errors[2].field.to_string(), "allergies");
    }

    #[test]
    fn unknown_attendance_value_is_missing() {
        let errors = RsvpForm::new("Ana", Some("maybe")).validate().unwrap_err();
        assert_eq!(keys(&errors), vec!["errorAttendanceRequired"]);
    }

    #[test]
    fn allergy_limit_counts_graphemes_after_trim() {
        let exactly = format!("  {}  ", "é".repeat(ALLERGIES_MAX_LEN));
        assert!(RsvpForm::new("Ana", Some("no")).with_allergies(exactly).validate().is_ok());
        let family = "👨‍👩‍👧".repeat(ALLERGIES_MAX_LEN);
        assert!(RsvpForm::new("Ana", Some("no")).with_allergies(family).validate().is_ok());
    }

    #[test]
    fn counter_text() {
        assert_eq!(allergy_counter(""), "0 / 200");
        assert_eq!(allergy_counter("maní 🥜"), "6 / 200");
    }

    proptest! {
        #[test]
        fn blank_names_never_validate(spaces in "[ \t\n]{0,8}") {
            let result = RsvpForm::new(spaces, Some("yes")).validate();
            prop_assert!(result.is_err());
        }

        #[test]
        fn short_notes_always_fit(note in "[a-z ]{0,200}") {
            prop_assert!(RsvpForm::new("Ana", Some("yes")).with_allergies(note).validate().is_ok());
        }
    }
}
