//! Property tests for geometry inference and the zoom transform policy.

use gridzoom_layout::{
    GridGeometry, HorizontalOrigin, VerticalOrigin, compute_transform, infer_geometry,
};
use proptest::prelude::*;

/// Tops for `count` items laid out `columns` per row, `row_height` apart.
fn grid_tops(columns: usize, count: usize, row_height: f64) -> Vec<f64> {
    (0..count)
        .map(|i| (i / columns) as f64 * row_height)
        .collect()
}

proptest! {
    #[test]
    fn inference_recovers_column_count(
        columns in 1usize..12,
        extra in 1usize..40,
        row_height in 1.0f64..500.0,
    ) {
        let count = columns + extra;
        let geometry = infer_geometry(&grid_tops(columns, count, row_height), 120.0);
        prop_assert_eq!(geometry.columns(), Some(columns));
    }

    #[test]
    fn single_row_is_never_zoomable(count in 1usize..30, top in -100.0f64..100.0) {
        let tops = vec![top; count];
        let geometry = infer_geometry(&tops, 100.0);
        prop_assert_eq!(geometry.columns(), None);
        for index in 0..count {
            prop_assert!(compute_transform(index, &geometry, count, 1.5).is_none());
        }
    }

    #[test]
    fn transform_exists_exactly_when_zoom_is_enabled(
        columns in proptest::option::of(1usize..8),
        count in 0usize..30,
    ) {
        let geometry = GridGeometry::new(columns, 180.0);
        let enabled = geometry.zoom_enabled(count);
        for index in 0..count.max(1) {
            prop_assert_eq!(
                compute_transform(index, &geometry, count, 1.5).is_some(),
                enabled,
                "columns {:?}, count {}", columns, count
            );
        }
    }

    #[test]
    fn enabled_grids_transform_every_item(
        columns in 2usize..10,
        extra in 1usize..40,
        factor in 1.01f64..4.0,
    ) {
        let count = columns + extra;
        let geometry = GridGeometry::new(Some(columns), 240.0);
        for index in 0..count {
            let t = compute_transform(index, &geometry, count, factor);
            prop_assert!(t.is_some(), "index {} of {} should zoom", index, count);
            let t = t.unwrap();
            prop_assert!((t.scale - factor).abs() < 1e-9);
        }
    }

    #[test]
    fn first_row_is_top_unless_last(columns in 2usize..10, extra in 1usize..40) {
        let count = columns + extra;
        let geometry = GridGeometry::new(Some(columns), 240.0);
        let rows = count.div_ceil(columns) - 1;
        for index in 0..columns {
            let t = compute_transform(index, &geometry, count, 1.5).unwrap();
            if index + 1 > rows * columns {
                prop_assert_eq!(t.origin.vertical, VerticalOrigin::Bottom);
            } else {
                prop_assert_eq!(t.origin.vertical, VerticalOrigin::Top);
            }
        }
    }

    #[test]
    fn last_column_always_grows_left(columns in 2usize..10, extra in 1usize..40) {
        let count = columns + extra;
        let geometry = GridGeometry::new(Some(columns), 240.0);
        for index in (columns - 1..count).step_by(columns) {
            let t = compute_transform(index, &geometry, count, 1.5).unwrap();
            prop_assert_eq!(t.origin.horizontal, HorizontalOrigin::Right);
        }
    }

    #[test]
    fn complete_grids_anchor_first_column_left(columns in 2usize..10, rows in 2usize..8) {
        let count = columns * rows;
        let geometry = GridGeometry::new(Some(columns), 240.0);
        for index in (0..count).step_by(columns) {
            let t = compute_transform(index, &geometry, count, 1.5).unwrap();
            prop_assert_eq!(t.origin.horizontal, HorizontalOrigin::Left);
        }
    }
}

#[test]
fn geometry_serializes_with_named_fields() {
    let json = serde_json::to_value(GridGeometry::new(Some(3), 200.0)).unwrap();
    assert_eq!(json["columns"], 3);
    assert_eq!(json["item_width"], 200.0);

    let single_row = serde_json::to_value(GridGeometry::new(None, 80.0)).unwrap();
    assert!(single_row["columns"].is_null());
}
