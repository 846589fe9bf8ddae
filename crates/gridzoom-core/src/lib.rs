#![forbid(unsafe_code)]

//! Core: layout geometry, host events, and logging glue.
//!
//! # Role in gridzoom
//! `gridzoom-core` is the input layer. It owns the normalized event types the
//! controller consumes (item clicks, key presses, viewport resizes) and the
//! rectangle type used to describe rendered item boxes.
//!
//! # How it fits in the system
//! The runtime (`gridzoom-runtime`) consumes [`event::Event`] values and
//! drives the zoom controller. The layout crate (`gridzoom-layout`) only needs
//! [`geometry::Rect`], so this crate is the shared bridge between the host
//! (browser DOM or a test double) and the deterministic controller logic.

pub mod event;
pub mod geometry;

#[cfg(feature = "tracing")]
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
