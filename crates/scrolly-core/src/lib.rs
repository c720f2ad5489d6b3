#![forbid(unsafe_code)]

//! Core: input events, host-driven time, timers, and key/value storage.

pub mod clock;
pub mod event;
pub mod logging;
pub mod storage;
pub mod timer;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
