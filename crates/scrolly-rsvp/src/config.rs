#![forbid(unsafe_code)]

//! Site configuration (`site.config.json`).

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors loading or interpreting the site configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The JSON did not match the expected shape.
    Parse(String),
    /// `eventDateIso` is not a `YYYY-MM-DD` date.
    InvalidDate(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Parse(msg) => write!(f, "invalid site config: {msg}"),
            ConfigError::InvalidDate(raw) => write!(f, "invalid event date: {raw:?}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(_) | ConfigError::InvalidDate(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Deployment settings. Every field is optional; missing ones disable the
/// feature that needs them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    /// Endpoint RSVPs are POSTed to.
    pub apps_script_endpoint: Option<String>,
    /// Scheduling link revealed to attending guests.
    pub calendly_base_url: Option<String>,
    /// Ask the backend to email the scheduling link.
    pub send_calendly_email: bool,
    /// Event date, `YYYY-MM-DD` optionally followed by a time.
    pub event_date_iso: Option<String>,
}

impl SiteConfig {
    /// Parse from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        tracing::debug!(
            path = %path.display(),
            endpoint = config.endpoint().is_some(),
            scheduling = config.scheduling_url().is_some(),
            "site config loaded"
        );
        Ok(config)
    }

    /// Set the submission endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.apps_script_endpoint = Some(url.into());
        self
    }

    /// Set the scheduling link.
    #[must_use]
    pub fn with_scheduling_url(mut self, url: impl Into<String>) -> Self {
        self.calendly_base_url = Some(url.into());
        self
    }

    /// Enable or disable the scheduling email.
    #[must_use]
    pub fn with_scheduling_email(mut self, send: bool) -> Self {
        self.send_calendly_email = send;
        self
    }

    /// Set the event date.
    #[must_use]
    pub fn with_event_date(mut self, iso: impl Into<String>) -> Self {
        self.event_date_iso = Some(iso.into());
        self
    }

    /// Submission endpoint, if configured and non-empty.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        non_empty(self.apps_script_endpoint.as_deref())
    }

    /// Scheduling link, if configured and non-empty.
    #[must_use]
    pub fn scheduling_url(&self) -> Option<&str> {
        non_empty(self.calendly_base_url.as_deref())
    }

    /// Event date, if configured and non-empty.
    #[must_use]
    pub fn event_date(&self) -> Option<&str> {
        non_empty(self.event_date_iso.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
