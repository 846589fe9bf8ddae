#![forbid(unsafe_code)]

//! Platform-independent host runner.
//!
//! [`HostGrid`] wraps a [`GridZoom`] over a [`RecordedLayout`] and a
//! [`DeterministicClock`]. It suits JS hosts that own the DOM themselves:
//! they describe the rendered items once, forward JSON-encoded events,
//! advance time, and drain the resulting [`DomCommand`]s as JSON lines.
//! Native tests drive the same type. No JS/WASM types here.

use core::time::Duration;
use std::collections::BTreeMap;

use gridzoom_core::{debug, warn};
use gridzoom_layout::{GridGeometry, Rect};
use gridzoom_runtime::{
    DomCommand, GridZoom, GridZoomConfig, InitError, ItemView, LayoutProvider, RecordedLayout,
    SequencerState,
};
use serde::{Deserialize, Serialize};

use crate::DeterministicClock;
use crate::input_parser::parse_encoded_input;

/// One rendered item as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemBox {
    pub top: f64,
    pub width: f64,
}

/// Host description of a rendered grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridDescription {
    pub items: Vec<ItemBox>,
    /// Computed custom properties of the gallery element.
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
}

impl GridDescription {
    fn boxes(&self) -> Vec<Rect> {
        self.items
            .iter()
            .map(|b| Rect::new(0.0, b.top, b.width, 0.0))
            .collect()
    }
}

/// Errors from building a [`HostGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Malformed grid description or configuration.
    Json(String),
    /// The configuration failed validation.
    Config(String),
    /// The controller refused the grid.
    Init(InitError),
}

impl core::fmt::Display for HostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Init(err) => write!(f, "init failed: {err}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(_) | Self::Config(_) => None,
            Self::Init(err) => Some(err),
        }
    }
}

impl From<InitError> for HostError {
    fn from(err: InitError) -> Self {
        Self::Init(err)
    }
}

/// Observable controller state, for hosts and snapshot tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostSnapshot {
    pub now_ms: f64,
    pub zoomed_item: Option<usize>,
    pub geometry: GridGeometry,
    pub grid_zoomed: bool,
    pub items: Vec<ItemView>,
    pub next_deadline_ms: Option<f64>,
}

/// Host-driven grid zoom runner.
#[derive(Debug)]
pub struct HostGrid {
    inner: GridZoom<RecordedLayout>,
    clock: DeterministicClock,
}

impl HostGrid {
    /// Build from a grid description. The configuration is validated first.
    pub fn new(description: &GridDescription, config: GridZoomConfig) -> Result<Self, HostError> {
        let config = config
            .validated()
            .map_err(|e| HostError::Config(e.to_string()))?;
        let mut layout = RecordedLayout::new(description.boxes());
        for (name, value) in &description.styles {
            layout.set_style(name.clone(), value.clone());
        }
        Ok(Self {
            inner: GridZoom::new(layout, config)?,
            clock: DeterministicClock::new(),
        })
    }

    /// Build from a JSON grid description and optional JSON configuration.
    pub fn from_json(description: &str, config: Option<&str>) -> Result<Self, HostError> {
        let description: GridDescription =
            serde_json::from_str(description).map_err(|e| HostError::Json(e.to_string()))?;
        let config = match config {
            Some(json) => {
                GridZoomConfig::from_json_str(json).map_err(|e| HostError::Json(e.to_string()))?
            }
            None => GridZoomConfig::default(),
        };
        Self::new(&description, config)
    }

    /// Current deterministic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Parse a JSON-encoded event and handle it at the current time.
    ///
    /// Returns `true` if the event was accepted, `false` if it was
    /// unsupported or malformed.
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        match parse_encoded_input(json) {
            Ok(Some(event)) => {
                self.inner.handle_event(event, self.clock.now());
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(target: "gridzoom.web", error = %err, "rejected encoded input");
                false
            }
        }
    }

    /// Replace item positions after the host reflowed the grid. Call before
    /// forwarding the matching resize event.
    ///
    /// Returns `false` (and changes nothing) when the item count differs.
    pub fn relayout(&mut self, items: &[ItemBox]) -> bool {
        if items.len() != self.inner.provider().item_count() {
            return false;
        }
        self.inner.provider_mut().relayout(
            items
                .iter()
                .map(|b| Rect::new(0.0, b.top, b.width, 0.0))
                .collect(),
        );
        true
    }

    /// Advance the clock by `dt_ms` milliseconds and run due work.
    ///
    /// Non-finite and non-positive inputs are ignored.
    pub fn advance_time_ms(&mut self, dt_ms: f64) -> usize {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        let max_secs = Duration::MAX.as_secs_f64();
        let secs = (dt_ms / 1000.0).min(max_secs);
        let dt = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        self.clock.advance(dt);
        self.tick()
    }

    /// Set the clock to absolute nanoseconds and run due work.
    ///
    /// The clock never moves backwards; earlier or invalid timestamps leave
    /// it unchanged.
    pub fn set_time_ns(&mut self, ts_ns: f64) -> usize {
        let nanos = if !ts_ns.is_finite() || ts_ns <= 0.0 {
            0
        } else {
            ts_ns.min(u64::MAX as f64) as u64
        };
        let target = Duration::from_nanos(nanos);
        if target > self.clock.now() {
            self.clock.set(target);
        }
        self.tick()
    }

    fn tick(&mut self) -> usize {
        let applied = self.inner.tick(self.clock.now());
        if applied > 0 {
            debug!(
                target: "gridzoom.web",
                applied,
                now_ms = self.clock.now().as_millis() as u64,
                "deferred writes applied"
            );
        }
        applied
    }

    /// Milliseconds until the next deferred write, if any.
    #[must_use]
    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.inner
            .next_deadline()
            .map(|due| duration_ms(due.saturating_sub(self.clock.now())))
    }

    /// Drain recorded commands.
    pub fn take_commands(&mut self) -> Vec<DomCommand> {
        self.inner.provider_mut().take_commands()
    }

    /// Drain recorded commands as JSON lines.
    pub fn take_commands_jsonl(&mut self) -> String {
        let mut out = String::new();
        for command in self.take_commands() {
            match serde_json::to_string(&command) {
                Ok(line) => {
                    out.push_str(&line);
                    out.push('\n');
                }
                Err(err) => warn!(target: "gridzoom.web", error = %err, "command not encodable"),
            }
        }
        out
    }

    #[must_use]
    pub fn state(&self) -> SequencerState {
        self.inner.state()
    }

    #[must_use]
    pub fn snapshot(&self) -> HostSnapshot {
        let layout = self.inner.provider();
        HostSnapshot {
            now_ms: duration_ms(self.clock.now()),
            zoomed_item: self.inner.zoomed_item(),
            geometry: self.inner.geometry(),
            grid_zoomed: layout.grid_zoomed(),
            items: layout.items().to_vec(),
            next_deadline_ms: self.next_deadline_ms(),
        }
    }

    /// [`snapshot`](Self::snapshot) as JSON.
    pub fn snapshot_json(&self) -> Result<String, HostError> {
        serde_json::to_string(&self.snapshot()).map_err(|e| HostError::Json(e.to_string()))
    }

    #[must_use]
    pub const fn controller(&self) -> &GridZoom<RecordedLayout> {
        &self.inner
    }
}

fn duration_ms(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}
