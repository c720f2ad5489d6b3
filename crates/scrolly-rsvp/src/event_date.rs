#![forbid(unsafe_code)]

//! Long-form event date in the page language.

use time::format_description::well_known::Iso8601;
use time::{Date, Month};

use crate::config::ConfigError;

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Separator of the decorative date.
pub const DECORATIVE_SEPARATOR: &str = " · ";

/// A calendar date parsed from `eventDateIso`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDate {
    date: Date,
}

impl EventDate {
    /// Parse `YYYY-MM-DD`, ignoring anything after a `T`.
    pub fn parse(iso: &str) -> Result<Self, ConfigError> {
        let day = iso.trim().split('T').next().unwrap_or_default();
        Date::parse(day, &Iso8601::DATE)
            .map(|date| Self { date })
            .map_err(|_| ConfigError::InvalidDate(iso.to_string()))
    }

    /// The date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Day, month name and year in reading order for `lang`.
    #[must_use]
    pub fn parts(&self, lang: &str) -> [String; 3] {
        let day = self.date.day().to_string();
        let year = self.date.year().to_string();
        if is_english(lang) {
            [month_name(self.date.month(), &MONTHS_EN).to_string(), day, year]
        } else {
            [day, month_name(self.date.month(), &MONTHS_ES).to_string(), year]
        }
    }

    /// `14 de febrero de 2026` or `February 14, 2026`.
    #[must_use]
    pub fn long_form(&self, lang: &str) -> String {
        let [a, b, year] = self.parts(lang);
        if is_english(lang) {
            format!("{a} {b}, {year}")
        } else {
            format!("{a} de {b} de {year}")
        }
    }

    /// `14 · febrero · 2026` or `February · 14 · 2026`.
    #[must_use]
    pub fn decorative(&self, lang: &str) -> String {
        self.parts(lang).join(DECORATIVE_SEPARATOR)
    }
}

/// Text for the `eventDate` and `eventDateDecorative` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDateText {
    /// Long-form date.
    pub display: String,
    /// Decorative form.
    pub decorative: String,
}

impl EventDateText {
    /// Render `iso` for `lang`.
    ///
    /// An unparseable date is shown as written, with separators in the
    /// decorative form.
    #[must_use]
    pub fn render(iso: &str, lang: &str) -> Self {
        match EventDate::parse(iso) {
            Ok(date) => Self {
                display: date.long_form(lang),
                decorative: date.decorative(lang),
            },
            Err(err) => {
                tracing::warn!(error = %err, "showing event date unformatted");
                Self {
                    display: iso.to_string(),
                    decorative: iso
                        .split(|c: char| c.is_whitespace() || matches!(c, '/' | ',' | '-'))
                        .filter(|part| !part.is_empty())
                        .collect::<Vec<_>>()
                        .join(DECORATIVE_SEPARATOR),
                }
            }
        }
    }
}

fn is_english(lang: &str) -> bool {
    lang.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("en"))
}

fn month_name(month: Month, names: &[&'static str; 12]) -> &'static str {
    names[usize::from(u8::from(month)) - 1]
}
