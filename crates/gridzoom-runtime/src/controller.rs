#![forbid(unsafe_code)]

//! Grid zoom controller: one instance per gallery grid.
//!
//! [`GridZoom`] owns the layout provider, the cached geometry, the
//! activation sequencer and the resize reactor. The host feeds it events
//! together with a monotonic timestamp and calls [`GridZoom::tick`] whenever
//! [`GridZoom::next_deadline`] passes.
//!
//! ```
//! use std::time::Duration;
//! use gridzoom_runtime::{GridZoom, GridZoomConfig, RecordedLayout, SequencerState};
//!
//! let layout = RecordedLayout::grid(3, 6, 200.0)
//!     .with_style("--grid-gallery-duration-expand", "3");
//! let mut zoom = GridZoom::new(layout, GridZoomConfig::default()).unwrap();
//!
//! zoom.click(4, Duration::ZERO);
//! let due = zoom.next_deadline().unwrap();
//! zoom.tick(due);
//! assert_eq!(zoom.state(), SequencerState::Zoomed { item: 4 });
//! ```

use std::fmt;
use std::time::Duration;

use gridzoom_core::event::{Event, KeyEvent};
use gridzoom_layout::{GridGeometry, infer_geometry};
use tracing::{debug, info};

use crate::config::GridZoomConfig;
use crate::keyboard::{KeyboardAction, navigate};
use crate::provider::{DomCommand, LayoutProvider};
use crate::resize::{ResizeDecision, ResizeReactor, Viewport};
use crate::sequencer::{ActivationSequencer, SequencerState, SequencerTiming, TriggerOutcome};

/// Reasons a controller cannot be attached to a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The grid has no items.
    NoItems,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoItems => write!(f, "grid has no items"),
        }
    }
}

impl std::error::Error for InitError {}

/// Zoom controller for one grid.
#[derive(Debug)]
pub struct GridZoom<P: LayoutProvider> {
    provider: P,
    config: GridZoomConfig,
    geometry: GridGeometry,
    sequencer: ActivationSequencer,
    resize: ResizeReactor,
}

impl<P: LayoutProvider> GridZoom<P> {
    /// Attach to a grid.
    ///
    /// Reads the scale factor and animation duration from the provider's
    /// style properties once, infers the initial geometry and marks every
    /// trigger control not-expanded.
    pub fn new(mut provider: P, config: GridZoomConfig) -> Result<Self, InitError> {
        let item_count = provider.item_count();
        if item_count == 0 {
            return Err(InitError::NoItems);
        }

        let scale_raw = provider.style_property(&config.scale_factor_property);
        let duration_raw = provider.style_property(&config.duration_property);
        let timing = SequencerTiming {
            timeout: config.timeout_from_style(duration_raw.as_deref()),
            scale_factor: config.scale_factor_from_style(scale_raw.as_deref()),
            raised_z_index: config.raised_z_index,
            baseline_z_index: config.baseline_z_index,
        };
        let geometry = refresh_geometry(&mut provider);

        info!(
            target: "gridzoom.sequencer",
            item_count,
            columns = ?geometry.columns(),
            scale_factor = timing.scale_factor,
            timeout_ms = timing.timeout.as_millis() as u64,
            "grid zoom attached"
        );

        Ok(Self {
            provider,
            resize: ResizeReactor::new(config.resize_debounce()),
            config,
            geometry,
            sequencer: ActivationSequencer::new(timing),
        })
    }

    /// Dispatch one host event.
    pub fn handle_event(&mut self, event: Event, now: Duration) {
        match event {
            Event::Click { item } => {
                self.click(item, now);
            }
            Event::Key(key) => {
                self.key(&key, now);
            }
            Event::Resize { width, height } => {
                self.resize(Viewport { width, height }, now);
            }
        }
    }

    /// Activation of `item`'s trigger control.
    pub fn click(&mut self, item: usize, now: Duration) -> TriggerOutcome {
        self.sequencer
            .trigger(&mut self.provider, &self.geometry, item, now)
    }

    /// Key press. Returns the navigation action taken, if any.
    pub fn key(&mut self, key: &KeyEvent, now: Duration) -> Option<KeyboardAction> {
        let active = self.sequencer.zoom().current();
        let action = navigate(key, active, self.provider.item_count())?;
        debug!(target: "gridzoom.keyboard", ?action, code = ?key.code, "key navigation");
        match action {
            KeyboardAction::Collapse { item } => {
                self.sequencer
                    .trigger(&mut self.provider, &self.geometry, item, now);
            }
            KeyboardAction::MoveTo { to, .. } => {
                self.sequencer.release();
                self.provider.apply(DomCommand::Focus { item: to });
                self.sequencer
                    .trigger(&mut self.provider, &self.geometry, to, now);
            }
        }
        Some(action)
    }

    /// Viewport resize.
    pub fn resize(&mut self, viewport: Viewport, now: Duration) -> ResizeDecision {
        let decision = self.resize.on_resize(viewport, now);
        match decision {
            ResizeDecision::Apply => self.apply_resize(now),
            ResizeDecision::Deferred { due } => debug!(
                target: "gridzoom.resize",
                width = viewport.width,
                height = viewport.height,
                due_ms = due.as_millis() as u64,
                "resize deferred"
            ),
        }
        decision
    }

    /// Run everything due at `now`. Returns the number of deferred writes
    /// applied by the sequencer.
    pub fn tick(&mut self, now: Duration) -> usize {
        if self.resize.poll(now) {
            self.apply_resize(now);
        }
        self.sequencer.tick(&mut self.provider, now)
    }

    /// Earliest time [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.resize.next_deadline(), self.sequencer.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    #[must_use]
    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Currently zoomed item.
    #[must_use]
    pub fn zoomed_item(&self) -> Option<usize> {
        self.sequencer.zoom().current()
    }

    #[must_use]
    pub const fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    #[must_use]
    pub const fn timing(&self) -> SequencerTiming {
        self.sequencer.timing()
    }

    #[must_use]
    pub const fn config(&self) -> &GridZoomConfig {
        &self.config
    }

    #[must_use]
    pub const fn sequencer(&self) -> &ActivationSequencer {
        &self.sequencer
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    #[must_use]
    pub fn into_provider(self) -> P {
        self.provider
    }

    fn apply_resize(&mut self, now: Duration) {
        self.geometry = refresh_geometry(&mut self.provider);
        self.sequencer.reset(&mut self.provider, now);
        let viewport = self.resize.viewport();
        debug!(
            target: "gridzoom.resize",
            viewport_width = viewport.map(|v| v.width),
            viewport_height = viewport.map(|v| v.height),
            columns = ?self.geometry.columns(),
            item_width = self.geometry.item_width(),
            "resize applied"
        );
    }
}

/// Re-derive geometry, mirror it onto the container and mark every control
/// not-expanded.
fn refresh_geometry<P: LayoutProvider + ?Sized>(provider: &mut P) -> GridGeometry {
    let count = provider.item_count();
    let tops: Vec<f64> = (0..count).map(|i| provider.item_top(i)).collect();
    let width = if count == 0 { 0.0 } else { provider.item_width(0) };
    let geometry = infer_geometry(&tops, width);

    provider.apply(DomCommand::SetGridMetrics {
        columns: geometry.columns(),
        item_width: geometry.item_width(),
    });
    for item in 0..count {
        provider.apply(DomCommand::SetExpanded {
            item,
            expanded: false,
        });
    }
    debug!(
        target: "gridzoom.geometry",
        count,
        columns = ?geometry.columns(),
        item_width = geometry.item_width(),
        "geometry inferred"
    );
    geometry
}
