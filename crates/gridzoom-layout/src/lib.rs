#![forbid(unsafe_code)]

//! Grid geometry inference and zoom transform policy.
//!
//! The gallery grid is laid out by CSS; nothing in this crate decides where
//! items go. [`infer_geometry`] reads back where the host put them and
//! derives the column count from the first row break, and
//! [`compute_transform`] turns an item index plus that geometry into a scale
//! and a `transform-origin` that keeps the zoomed item inside the grid.
//!
//! # Invariants
//!
//! 1. The column count is the index of the first item whose top edge differs
//!    from the first item's top edge. It is therefore always `>= 1`.
//! 2. When every item shares one top edge the column count is unknown
//!    (`None`) and zoom is disabled for the grid.
//! 3. Geometry is a plain value: recomputing it is the only way it changes.

pub mod transform;

pub use gridzoom_core::geometry::Rect;
pub use transform::{
    HorizontalOrigin, TransformOrigin, VerticalOrigin, ZoomTransform, compute_transform,
};

use serde::{Deserialize, Serialize};

/// Column count and shared item width of a rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridGeometry {
    columns: Option<usize>,
    item_width: f64,
}

impl GridGeometry {
    /// Create a geometry value directly.
    #[must_use]
    pub const fn new(columns: Option<usize>, item_width: f64) -> Self {
        Self {
            columns,
            item_width,
        }
    }

    /// Inferred column count, `None` for a single-row grid.
    #[must_use]
    pub const fn columns(&self) -> Option<usize> {
        self.columns
    }

    /// Computed width of the first item.
    #[must_use]
    pub const fn item_width(&self) -> f64 {
        self.item_width
    }

    /// 0-based index of the last row for `item_count` items.
    ///
    /// `None` when the column count is unknown.
    #[must_use]
    pub fn last_row(&self, item_count: usize) -> Option<usize> {
        let columns = self.columns.filter(|&c| c > 0)?;
        Some(item_count.div_ceil(columns).saturating_sub(1))
    }

    /// Whether zooming is possible at all for `item_count` items.
    ///
    /// Single-column and single-row grids have no room to grow into.
    #[must_use]
    pub fn zoom_enabled(&self, item_count: usize) -> bool {
        matches!(self.columns, Some(c) if c > 1) && self.last_row(item_count).is_some_and(|r| r > 0)
    }
}

/// Infer the column count from item top edges in sibling order.
///
/// Returns the index of the first top that differs from the first one, or
/// `None` if there is no row break (including the empty case).
#[must_use]
pub fn infer_columns<I>(tops: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut tops = tops.into_iter();
    let first = tops.next()?;
    tops.position(|top| top != first).map(|offset| offset + 1)
}

/// Infer the grid geometry from item top edges and the first item's width.
#[must_use]
pub fn infer_geometry(tops: &[f64], item_width: f64) -> GridGeometry {
    GridGeometry::new(infer_columns(tops.iter().copied()), item_width)
}

/// Infer the grid geometry from rendered item boxes.
///
/// The width comes from the first box; hosts whose computed width differs
/// from the border box should call [`infer_geometry`] instead.
#[must_use]
pub fn infer_geometry_from_rects(rects: &[Rect]) -> GridGeometry {
    let width = rects.first().map_or(0.0, |r| r.width);
    GridGeometry::new(infer_columns(rects.iter().map(Rect::top)), width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_rows_of_three() {
        let geometry = infer_geometry(&[0.0, 0.0, 0.0, 10.0, 10.0, 10.0], 200.0);
        assert_eq!(geometry.columns(), Some(3));
        assert_eq!(geometry.item_width(), 200.0);
        assert_eq!(geometry.last_row(6), Some(1));
        assert!(geometry.zoom_enabled(6));
    }

    #[test]
    fn single_row_has_no_columns() {
        let geometry = infer_geometry(&[4.0, 4.0, 4.0, 4.0], 120.0);
        assert_eq!(geometry.columns(), None);
        assert_eq!(geometry.last_row(4), None);
        assert!(!geometry.zoom_enabled(4));
    }

    #[test]
    fn single_column_breaks_at_one() {
        let geometry = infer_geometry(&[0.0, 100.0, 200.0], 300.0);
        assert_eq!(geometry.columns(), Some(1));
        assert!(!geometry.zoom_enabled(3));
    }

    #[test]
    fn empty_and_singleton_inputs() {
        assert_eq!(infer_columns(std::iter::empty()), None);
        assert_eq!(infer_columns([7.0]), None);
    }

    #[test]
    fn only_the_first_break_counts() {
        // A later, wider row does not change the inferred column count.
        assert_eq!(infer_columns([0.0, 0.0, 50.0, 50.0, 50.0, 90.0]), Some(2));
    }

    #[test]
    fn partial_last_row_counts_as_a_row() {
        let geometry = GridGeometry::new(Some(3), 100.0);
        assert_eq!(geometry.last_row(4), Some(1));
        assert_eq!(geometry.last_row(3), Some(0));
        assert!(geometry.zoom_enabled(4));
        assert!(!geometry.zoom_enabled(3));
    }

    #[test]
    fn from_rects_uses_first_width() {
        let rects = [
            Rect::new(0.0, 0.0, 180.0, 120.0),
            Rect::new(190.0, 0.0, 180.0, 120.0),
            Rect::new(0.0, 130.0, 180.0, 120.0),
        ];
        let geometry = infer_geometry_from_rects(&rects);
        assert_eq!(geometry, GridGeometry::new(Some(2), 180.0));
        assert_eq!(infer_geometry_from_rects(&[]), GridGeometry::default());
    }
}
