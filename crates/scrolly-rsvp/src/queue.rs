#![forbid(unsafe_code)]

//! Offline RSVP queue.
//!
//! Submissions that fail to send are appended to a JSON array stored under
//! [`QUEUE_STORAGE_KEY`] and retried later.
//!
//! # Invariants
//!
//! 1. A flush sends each queued payload exactly once, in order.
//! 2. After a flush the stored queue holds exactly the payloads that failed.
//!
//! # Failure Modes
//!
//! | Scenario                     | Behavior                          |
//! |------------------------------|-----------------------------------|
//! | Stored value is not JSON     | Treated as an empty queue         |
//! | No endpoint configured       | Flush is a no-op                  |
//! | Store write fails            | [`QueueError::Storage`]           |

use std::fmt;
use std::sync::Arc;

use scrolly_core::storage::{KeyValueStore, StorageError, load_json, save_json};

use crate::payload::RsvpPayload;
use crate::transport::SubmissionTransport;

/// Storage key of the queue.
pub const QUEUE_STORAGE_KEY: &str = "rsvp:queue";

/// Queue persistence failure.
#[derive(Debug)]
pub enum QueueError {
    /// The backing store refused the write.
    Storage(StorageError),
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Storage(e) => write!(f, "failed to persist RSVP queue: {e}"),
        }
    }
}

impl std::error::Error for QueueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueueError::Storage(e) => Some(e),
        }
    }
}

impl From<StorageError> for QueueError {
    fn from(e: StorageError) -> Self {
        QueueError::Storage(e)
    }
}

/// Counts from one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Payloads delivered and removed.
    pub sent: usize,
    /// Payloads still queued.
    pub remaining: usize,
}

/// Persisted list of unsent payloads.
#[derive(Clone)]
pub struct OfflineQueue {
    store: Arc<dyn KeyValueStore>,
}

impl OfflineQueue {
    /// Queue backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Everything queued, oldest first.
    #[must_use]
    pub fn load(&self) -> Vec<RsvpPayload> {
        load_json(self.store.as_ref(), QUEUE_STORAGE_KEY).unwrap_or_default()
    }

    /// Number of queued payloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.load().len()
    }

    /// True when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }

    /// Append a payload.
    pub fn push(&self, payload: RsvpPayload) -> Result<(), QueueError> {
        let mut queue = self.load();
        queue.push(payload);
        self.save(&queue)?;
        tracing::debug!(queued = queue.len(), "rsvp queued for retry");
        Ok(())
    }

    /// Try to send every queued payload through `transport`.
    ///
    /// Does nothing when the queue is empty or `endpoint` is `None`.
    pub fn flush<T: SubmissionTransport + ?Sized>(
        &self,
        endpoint: Option<&str>,
        transport: &mut T,
    ) -> Result<FlushReport, QueueError> {
        let queue = self.load();
        let Some(endpoint) = endpoint else {
            return Ok(FlushReport {
                sent: 0,
                remaining: queue.len(),
            });
        };
        if queue.is_empty() {
            return Ok(FlushReport::default());
        }

        let total = queue.len();
        let mut remaining = Vec::new();
        for payload in queue {
            if let Err(err) = transport.send(endpoint, &payload) {
                tracing::trace!(error = %err, "queued rsvp still failing");
                remaining.push(payload);
            }
        }
        self.save(&remaining)?;
        let report = FlushReport {
            sent: total - remaining.len(),
            remaining: remaining.len(),
        };
        tracing::debug!(sent = report.sent, remaining = report.remaining, "rsvp queue flushed");
        Ok(report)
    }

    fn save(&self, queue: &[RsvpPayload]) -> Result<(), QueueError> {
        save_json(self.store.as_ref(), QUEUE_STORAGE_KEY, queue)?;
        Ok(())
    }
}

impl fmt::Debug for OfflineQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OfflineQueue")
            .field("store", &self.store.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Attendance;
    use crate::transport::TransportError;
    use pretty_assertions::assert_eq;
    use scrolly_core::storage::MemoryStore;

    fn payload(name: &str) -> RsvpPayload {
        RsvpPayload {
            name: name.to_string(),
            allergies: String::new(),
            attendance: Attendance::Yes,
            submitted_at: "2026-01-01T00:00:00.000Z".to_string(),
            user_agent: "test".to_string(),
            should_send_calendly_email: false,
        }
    }

    fn names(queue: &OfflineQueue) -> Vec<String> {
        queue.load().into_iter().map(|p| p.name).collect()
    }

    #[test]
    fn corrupt_value_reads_as_empty() {
        let store = Arc::new(MemoryStore::with_entries([(QUEUE_STORAGE_KEY, "{not json")]));
        let queue = OfflineQueue::new(store);
        assert!(queue.is_empty());
        queue.push(payload("Ana")).unwrap();
        assert_eq!(names(&queue), vec!["Ana"]);
    }

    #[test]
    fn flush_keeps_only_failures() {
        let queue = OfflineQueue::new(Arc::new(MemoryStore::new()));
        for name in ["Ana", "Luis", "Marta"] {
            queue.push(payload(name)).unwrap();
        }
        let mut attempts = Vec::new();
        let mut transport = |_: &str, p: &RsvpPayload| {
            attempts.push(p.name.clone());
            if p.name == "Luis" {
                Err(TransportError::Network("offline".to_string()))
            } else {
                Ok(())
            }
        };
        let report = queue.flush(Some("https://e"), &mut transport).unwrap();
        assert_eq!(report, FlushReport { sent: 2, remaining: 1 });
        assert_eq!(attempts, vec!["Ana", "Luis", "Marta"]);
        assert_eq!(names(&queue), vec!["Luis"]);
    }

    #[test]
    fn flush_without_endpoint_is_a_no_op() {
        let queue = OfflineQueue::new(Arc::new(MemoryStore::new()));
        queue.push(payload("Ana")).unwrap();
        let mut transport = |_: &str, _: &RsvpPayload| -> Result<(), TransportError> {
            panic!("must not send without an endpoint")
        };
        let report = queue.flush(None, &mut transport).unwrap();
        assert_eq!(report, FlushReport { sent: 0, remaining: 1 });
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn empty_flush_does_not_touch_store() {
        let store = Arc::new(MemoryStore::new());
        let queue = OfflineQueue::new(store.clone());
        let mut transport = |_: &str, _: &RsvpPayload| -> Result<(), TransportError> { Ok(()) };
        assert_eq!(queue.flush(Some("https://e"), &mut transport).unwrap(), FlushReport::default());
        assert_eq!(store.get(QUEUE_STORAGE_KEY).unwrap(), None);
    }
}
