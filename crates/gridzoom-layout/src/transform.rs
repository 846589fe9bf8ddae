#![forbid(unsafe_code)]

//! Zoom transform policy.
//!
//! Picks a `transform-origin` so that a zoomed item grows toward the inside
//! of the grid: items in the first row grow downward, items in the last row
//! grow upward, first-column items grow rightward, last-column items grow
//! leftward, and everything else grows from its center.
//!
//! # Partial last rows
//!
//! When the last row is incomplete (`item_count % columns != 0`), its
//! first-column item is anchored `center` horizontally instead of `left`.
//! Items in that row do not line up with the full rows above, so the
//! gallery centers the orphan's growth.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GridGeometry;

/// Vertical component of a `transform-origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalOrigin {
    Top,
    Center,
    Bottom,
}

impl VerticalOrigin {
    /// CSS keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

/// Horizontal component of a `transform-origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalOrigin {
    Left,
    Center,
    Right,
}

impl HorizontalOrigin {
    /// CSS keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// A two-keyword CSS `transform-origin`, vertical first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransformOrigin {
    pub vertical: VerticalOrigin,
    pub horizontal: HorizontalOrigin,
}

impl TransformOrigin {
    #[must_use]
    pub const fn new(vertical: VerticalOrigin, horizontal: HorizontalOrigin) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

impl fmt::Display for TransformOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.vertical.as_str(), self.horizontal.as_str())
    }
}

/// Scale and origin for one zoomed item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub origin: TransformOrigin,
    pub scale: f64,
}

impl ZoomTransform {
    /// CSS `transform` value, e.g. `scale(1.5)`.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("scale({})", self.scale)
    }
}

/// Compute the zoom transform for the item at `index`.
///
/// Returns `None` when zoom is disabled for this grid: unknown or single
/// column count, or a single row of items.
#[must_use]
pub fn compute_transform(
    index: usize,
    geometry: &GridGeometry,
    item_count: usize,
    scale_factor: f64,
) -> Option<ZoomTransform> {
    if !geometry.zoom_enabled(item_count) {
        return None;
    }
    let columns = geometry.columns()?;
    let rows = geometry.last_row(item_count)?;

    let is_first_row = index < columns;
    let is_last_row = index + 1 > rows * columns;
    let vertical = if is_last_row {
        VerticalOrigin::Bottom
    } else if is_first_row {
        VerticalOrigin::Top
    } else {
        VerticalOrigin::Center
    };

    let column = index % columns + 1;
    let is_remainder = is_last_row && item_count % columns != 0;
    let horizontal = if column == 1 {
        if is_remainder {
            HorizontalOrigin::Center
        } else {
            HorizontalOrigin::Left
        }
    } else if column == columns {
        HorizontalOrigin::Right
    } else {
        HorizontalOrigin::Center
    };

    Some(ZoomTransform {
        origin: TransformOrigin::new(vertical, horizontal),
        scale: scale_for_width(geometry.item_width(), scale_factor),
    })
}

/// Zoomed width over rendered width.
fn scale_for_width(item_width: f64, scale_factor: f64) -> f64 {
    if item_width.is_finite() && item_width != 0.0 {
        item_width * scale_factor / item_width
    } else {
        scale_factor
    }
}
