#![forbid(unsafe_code)]

//! Delivery of RSVPs to the remote endpoint.
//!
//! The host performs the actual request; [`interpret_response`] turns what
//! came back into success or a [`TransportError`].

use std::fmt;

use serde::Deserialize;

use crate::payload::RsvpPayload;

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No endpoint configured.
    EndpointMissing,
    /// The request never completed (offline, CORS, timeout).
    Network(String),
    /// Non-success HTTP status.
    Status(u16),
    /// The endpoint answered without `"ok": true`.
    Rejected,
    /// The response body was not the expected JSON.
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::EndpointMissing => write!(f, "submission endpoint missing"),
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Status(code) => write!(f, "network response not ok: {code}"),
            TransportError::Rejected => write!(f, "endpoint returned an error"),
            TransportError::Decode(msg) => write!(f, "invalid response body: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Sends one payload to `endpoint`.
pub trait SubmissionTransport {
    /// POST `payload` as JSON; `Ok` only when the endpoint confirmed it.
    fn send(&mut self, endpoint: &str, payload: &RsvpPayload) -> Result<(), TransportError>;
}

impl<F> SubmissionTransport for F
where
    F: FnMut(&str, &RsvpPayload) -> Result<(), TransportError>,
{
    fn send(&mut self, endpoint: &str, payload: &RsvpPayload) -> Result<(), TransportError> {
        self(endpoint, payload)
    }
}

#[derive(Deserialize)]
struct EndpointReply {
    #[serde(default)]
    ok: bool,
}

/// Request body for `payload`.
pub fn request_body(payload: &RsvpPayload) -> Result<String, TransportError> {
    serde_json::to_string(payload).map_err(|e| TransportError::Decode(e.to_string()))
}

/// Check an HTTP status and JSON body from the endpoint.
pub fn interpret_response(status: u16, body: &str) -> Result<(), TransportError> {
    if !(200..300).contains(&status) {
        return Err(TransportError::Status(status));
    }
    let reply: EndpointReply =
        serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))?;
    if reply.ok {
        Ok(())
    } else {
        Err(TransportError::Rejected)
    }
}
