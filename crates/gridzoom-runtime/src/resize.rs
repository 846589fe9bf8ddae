#![forbid(unsafe_code)]

//! Resize reaction with optional debouncing.
//!
//! A viewport resize invalidates the cached grid geometry and any active
//! zoom. Without a debounce every resize applies immediately. With one,
//! rapid resizes coalesce "latest wins": each notification pushes the
//! deadline out, and only the last viewport is applied once the window has
//! been quiet for the debounce period.

use std::time::Duration;

/// Viewport size reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// What the controller should do with a resize notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeDecision {
    /// Recompute geometry and reset zoom now.
    Apply,
    /// Held back until `due`.
    Deferred { due: Duration },
}

/// Coalesces resize notifications.
#[derive(Debug, Clone, Default)]
pub struct ResizeReactor {
    debounce: Option<Duration>,
    pending_due: Option<Duration>,
    viewport: Option<Viewport>,
}

impl ResizeReactor {
    #[must_use]
    pub fn new(debounce: Option<Duration>) -> Self {
        Self {
            debounce,
            ..Self::default()
        }
    }

    /// Record a resize at `now`.
    pub fn on_resize(&mut self, viewport: Viewport, now: Duration) -> ResizeDecision {
        self.viewport = Some(viewport);
        match self.debounce {
            None => ResizeDecision::Apply,
            Some(quiet) => {
                let due = now.saturating_add(quiet);
                self.pending_due = Some(due);
                ResizeDecision::Deferred { due }
            }
        }
    }

    /// Whether a deferred resize is due at `now`. Consumes the pending entry.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.pending_due {
            Some(due) if due <= now => {
                self.pending_due = None;
                true
            }
            _ => false,
        }
    }

    /// Deadline of the pending resize, if any.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Duration> {
        self.pending_due
    }

    /// Most recent viewport seen.
    #[must_use]
    pub const fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}
