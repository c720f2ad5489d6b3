#![forbid(unsafe_code)]

//! Interactive page widgets.
//!
//! Each widget is a state machine over canonical input events. Hosts own the
//! DOM; widgets tell them what to change through a small surface trait or
//! expose their state for rendering.

pub mod carousel;
pub mod modal;
pub mod typeahead;

pub use carousel::{Carousel, CarouselConfig, CarouselSurface, MediaKind, Slide};
pub use modal::{ModalContent, ModalHost, ModalManager};
pub use typeahead::{Invitee, InviteeList, KeyOutcome, Typeahead, TypeaheadConfig};
