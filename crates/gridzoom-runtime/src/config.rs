#![forbid(unsafe_code)]

//! Controller configuration.
//!
//! [`GridZoomConfig`] gathers every tunable of the zoom controller. It can be
//! built in code or loaded from TOML/JSON (feature `config-loading`):
//!
//! ```toml
//! # gridzoom.toml
//! timeout_multiplier = 100.0
//! fallback_scale_factor = 1.5
//! resize_debounce_ms = 120
//! ```
//!
//! ```rust,ignore
//! let config = GridZoomConfig::from_toml_file("gridzoom.toml")?.validated()?;
//! ```
//!
//! # Style-derived values
//!
//! The scale factor and the animation timeout are read once, at controller
//! construction, from computed style custom properties on the gallery. Both
//! are parsed the way a browser's `parseFloat` does: leading whitespace is
//! skipped and the longest numeric prefix is used, so `"0.3s"` reads as
//! `0.3`. The timeout is that number times `timeout_multiplier`, in
//! milliseconds.

#[cfg(feature = "config-loading")]
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default note shown above the grid by browser hosts.
pub const DEFAULT_KEY_NOTE: &str =
    "Press <kbd>Return</kbd> to zoom images and <kbd>Esc</kbd> to exit zoomed images.";

/// Tunables for one grid zoom controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridZoomConfig {
    /// Custom property holding the zoom scale factor.
    pub scale_factor_property: String,

    /// Custom property holding the expand transition duration.
    pub duration_property: String,

    /// Scale factor used when the style value is missing or unusable.
    pub fallback_scale_factor: f64,

    /// Milliseconds per unit of the duration style value.
    pub timeout_multiplier: f64,

    /// `z-index` of the zoomed item.
    pub raised_z_index: i32,

    /// `z-index` items settle back to after zooming out.
    pub baseline_z_index: i32,

    /// Quiet period before a resize is handled. `None` handles every resize
    /// immediately.
    pub resize_debounce_ms: Option<u64>,

    /// HTML of the keyboard hint inserted before the grid by browser hosts.
    pub key_note: Option<String>,
}

impl Default for GridZoomConfig {
    fn default() -> Self {
        Self {
            scale_factor_property: "--grid-gallery-scale-factor".to_owned(),
            duration_property: "--grid-gallery-duration-expand".to_owned(),
            fallback_scale_factor: 1.5,
            timeout_multiplier: 100.0,
            raised_z_index: 100,
            baseline_z_index: 0,
            resize_debounce_ms: None,
            key_note: Some(DEFAULT_KEY_NOTE.to_owned()),
        }
    }
}

impl GridZoomConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-loading")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-loading")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-loading")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-loading")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.scale_factor_property.trim().is_empty() {
            errors.push("scale_factor_property must not be empty".into());
        }
        if self.duration_property.trim().is_empty() {
            errors.push("duration_property must not be empty".into());
        }
        if !self.fallback_scale_factor.is_finite() || self.fallback_scale_factor <= 0.0 {
            errors.push(format!(
                "fallback_scale_factor must be finite and > 0, got {}",
                self.fallback_scale_factor
            ));
        }
        if !self.timeout_multiplier.is_finite() || self.timeout_multiplier < 0.0 {
            errors.push(format!(
                "timeout_multiplier must be finite and >= 0, got {}",
                self.timeout_multiplier
            ));
        }
        if self.raised_z_index <= self.baseline_z_index {
            errors.push(format!(
                "raised_z_index ({}) must be above baseline_z_index ({})",
                self.raised_z_index, self.baseline_z_index
            ));
        }

        errors
    }

    /// Consume the config, returning it only if [`validate`](Self::validate)
    /// reports nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Scale factor from the raw style value, falling back when the value is
    /// missing, unparsable, or not positive.
    #[must_use]
    pub fn scale_factor_from_style(&self, raw: Option<&str>) -> f64 {
        raw.and_then(parse_css_number)
            .filter(|factor| factor.is_finite() && *factor > 0.0)
            .unwrap_or(self.fallback_scale_factor)
    }

    /// Animation timeout from the raw duration style value.
    ///
    /// A missing or unparsable value yields a zero timeout, so deferred
    /// writes run on the next host tick.
    #[must_use]
    pub fn timeout_from_style(&self, raw: Option<&str>) -> Duration {
        raw.and_then(parse_css_number)
            .map(|value| value * self.timeout_multiplier)
            .filter(|ms| ms.is_finite() && *ms > 0.0)
            // Float-to-int casts saturate, so absurd values cap at u64::MAX ns.
            .map_or(Duration::ZERO, |ms| {
                Duration::from_nanos((ms * 1_000_000.0).round() as u64)
            })
    }

    /// Resize quiet period, if debouncing is enabled.
    #[must_use]
    pub fn resize_debounce(&self) -> Option<Duration> {
        self.resize_debounce_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }
}

/// Parse the leading number of a CSS value (`"0.3s"` -> `0.3`).
///
/// Returns `None` when the value does not start with a number.
#[must_use]
pub fn parse_css_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Errors from loading or validating a [`GridZoomConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-loading")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-loading")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-loading")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-loading")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-loading")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-loading")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
