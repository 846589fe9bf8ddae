#![forbid(unsafe_code)]

//! Host-driven zoom controller for gallery grids.
//!
//! The controller is a pure state machine. It reads layout and writes
//! visual state through a [`LayoutProvider`], and defers the writes that
//! must wait for a CSS transition onto a queue drained by
//! [`GridZoom::tick`]. Nothing here touches a clock or a timer: the host
//! passes a monotonic timestamp with every call.
//!
//! # Modules
//!
//! - [`controller`]: [`GridZoom`], one instance per grid.
//! - [`sequencer`]: the Idle/Zoomed state machine and its deferred writes.
//! - [`keyboard`]: Escape / arrow navigation while zoomed.
//! - [`resize`]: resize handling with optional debounce.
//! - [`provider`]: the layout boundary and [`DomCommand`].
//! - [`recorded`]: an in-memory provider for tests and JS hosts.
//! - [`config`]: [`GridZoomConfig`] and style value parsing.

pub mod config;
pub mod controller;
pub mod deferred;
pub mod keyboard;
pub mod provider;
pub mod recorded;
pub mod resize;
pub mod sequencer;
pub mod zoom_state;

pub use config::{ConfigError, DEFAULT_KEY_NOTE, GridZoomConfig, parse_css_number};
pub use controller::{GridZoom, InitError};
pub use deferred::{Deferred, DeferredQueue, Generation};
pub use keyboard::{KeyboardAction, NavDirection, navigate, sibling};
pub use provider::{
    COLUMNS_ATTR, DomCommand, EXPANDED_ATTR, ItemTransform, LayoutProvider, WIDTH_ATTR,
    ZOOMED_CLASS,
};
pub use recorded::{ItemView, RecordedLayout};
pub use resize::{ResizeDecision, ResizeReactor, Viewport};
pub use sequencer::{
    ActivationSequencer, DeferredEffect, SequencerState, SequencerTiming, TriggerOutcome,
};
pub use zoom_state::{ActiveItem, ZoomState};
