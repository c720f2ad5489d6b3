#![forbid(unsafe_code)]

//! Internationalization: a string catalog, key lookup with fallback, and a
//! language context that remembers the visitor's choice and tells
//! subscribers when it changes.
//!
//! Fetching the catalog is the host's job; this crate starts from a
//! [`Catalog`] that is already in memory.

pub mod catalog;
pub mod context;

pub use catalog::{Binding, BindingTarget, Catalog};
pub use context::{DEFAULT_LANG, I18n, LANG_STORAGE_KEY, ListenerId};
