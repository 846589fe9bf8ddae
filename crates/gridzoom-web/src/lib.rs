#![forbid(unsafe_code)]

//! `gridzoom-web` binds the zoom controller to a browser.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment pushes events and
//!   advances time; the controller never reads a clock.
//! - **Deterministic time**: [`DeterministicClock`] is moved explicitly, so
//!   the native [`host::HostGrid`] replays identically in tests.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! On `wasm32` the crate also exports, through `wasm-bindgen`:
//! - `GalleryGridZoom`, which attaches to a real `.grid-gallery` element and
//!   drives the controller from DOM listeners and `setTimeout`;
//! - `GridZoomRunner`, a JS-facing wrapper over [`host::HostGrid`] for hosts
//!   that apply the DOM writes themselves.

pub mod host;
pub mod input_parser;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::DomLayout;
#[cfg(target_arch = "wasm32")]
pub use wasm::{GalleryGridZoom, GridZoomRunner};

pub use host::{GridDescription, HostError, HostGrid, HostSnapshot, ItemBox};
pub use input_parser::{InputParseError, parse_encoded_input};

use core::time::Duration;

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// Milliseconds to hand to `setTimeout` so it fires no earlier than `delay`.
///
/// Rounds up to the next whole millisecond and saturates at `i32::MAX`.
#[must_use]
pub fn timer_delay_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_nanos().div_ceil(1_000_000)).unwrap_or(i32::MAX)
}
