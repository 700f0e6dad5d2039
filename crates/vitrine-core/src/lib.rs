#![forbid(unsafe_code)]

//! Core: trigger vocabulary, element addressing, geometry, easing and markup reading.
//!
//! Nothing in this crate touches a real document. Hosts translate their own
//! events into [`event::Event`] values and expose element data through
//! [`markup::MarkupSource`].

pub mod animation;
pub mod event;
pub mod geometry;
pub mod key;
pub mod logging;
pub mod markup;
pub mod number;

pub use event::Event;
pub use geometry::ScrollMetrics;
pub use key::ElementKey;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
