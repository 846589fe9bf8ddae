#![forbid(unsafe_code)]

//! gridzoom public facade crate.
//!
//! Re-exports the controller, its layout math, and the event types from the
//! internal crates, and offers a lightweight prelude for day-to-day usage.
//!
//! ```
//! use gridzoom::prelude::*;
//! use std::time::Duration;
//!
//! let layout = RecordedLayout::grid(3, 6, 200.0);
//! let mut zoom = gridzoom::attach(layout, GridZoomConfig::default()).unwrap();
//! zoom.click(4, Duration::ZERO);
//! zoom.tick(Duration::from_secs(1));
//! assert_eq!(zoom.zoomed_item(), Some(4));
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use gridzoom_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use gridzoom_core::geometry::Rect;

// --- Layout re-exports -----------------------------------------------------

pub use gridzoom_layout::{
    GridGeometry, HorizontalOrigin, TransformOrigin, VerticalOrigin, ZoomTransform,
    compute_transform, infer_columns, infer_geometry,
};

// --- Runtime re-exports ----------------------------------------------------

pub use gridzoom_runtime::{
    ConfigError, DomCommand, GridZoom, GridZoomConfig, InitError, ItemTransform, KeyboardAction,
    LayoutProvider, RecordedLayout, ResizeDecision, SequencerState, TriggerOutcome, Viewport,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for attaching a grid zoom controller.
#[derive(Debug)]
pub enum Error {
    /// The configuration could not be loaded or failed validation.
    Config(ConfigError),
    /// The grid could not be initialized.
    Init(InitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Init(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Init(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<InitError> for Error {
    fn from(err: InitError) -> Self {
        Self::Init(err)
    }
}

/// Standard result type for gridzoom APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Validate `config` and attach a controller to `provider`.
pub fn attach<P: LayoutProvider>(provider: P, config: GridZoomConfig) -> Result<GridZoom<P>> {
    let config = config.validated()?;
    Ok(GridZoom::new(provider, config)?)
}

/// Load a TOML configuration file and attach a controller to `provider`.
#[cfg(feature = "config-loading")]
pub fn attach_with_config_file<P: LayoutProvider>(
    provider: P,
    path: impl AsRef<std::path::Path>,
) -> Result<GridZoom<P>> {
    attach(provider, GridZoomConfig::from_toml_file(path)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DomCommand, Error, Event, GridZoom, GridZoomConfig, KeyCode, KeyEvent, LayoutProvider,
        Modifiers, RecordedLayout, Result, SequencerState, Viewport,
    };

    pub use crate::{core, layout, runtime};
}

pub use gridzoom_core as core;
pub use gridzoom_layout as layout;
pub use gridzoom_runtime as runtime;
#[cfg(feature = "web")]
pub use gridzoom_web as web;
