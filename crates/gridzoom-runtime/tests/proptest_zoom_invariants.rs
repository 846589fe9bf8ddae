//! Property-based invariant tests for the zoom controller.
//!
//! ## Invariants
//!
//! 1. At most one item carries the zoomed class after any operation.
//! 2. The controller state and the written DOM state agree: `Zoomed { i }`
//!    exactly when item `i` is the only zoomed item, and the grid container
//!    is zoomed exactly when an item is.
//! 3. The zoomed item is raised, scaled and expanded.
//! 4. Every command addresses an item inside the grid.
//! 5. Single-column and single-row grids never leave Idle.

use std::time::Duration;

use gridzoom_core::event::{KeyCode, KeyEvent};
use gridzoom_runtime::{
    GridZoom, GridZoomConfig, ItemTransform, RecordedLayout, SequencerState, Viewport,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Click(usize),
    Key(KeyCode),
    Resize(usize),
    Advance(u64),
}

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_op(count: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..count + 1).prop_map(Op::Click),
        2 => prop_oneof![
            Just(KeyCode::Left),
            Just(KeyCode::Right),
            Just(KeyCode::Escape),
            Just(KeyCode::Enter),
        ]
        .prop_map(Op::Key),
        1 => (1usize..6).prop_map(Op::Resize),
        4 => (0u64..400).prop_map(Op::Advance),
    ]
}

fn arb_script() -> impl Strategy<Value = (usize, usize, Vec<Op>)> {
    (2usize..5, 3usize..14).prop_flat_map(|(columns, count)| {
        (
            Just(columns),
            Just(count),
            prop::collection::vec(arb_op(count), 1..60),
        )
    })
}

fn check(zoom: &GridZoom<RecordedLayout>) -> Result<(), TestCaseError> {
    let layout = zoom.provider();
    let zoomed = layout.zoomed_items();
    prop_assert!(zoomed.len() <= 1, "zoomed items: {:?}", zoomed);
    prop_assert_eq!(layout.grid_zoomed(), !zoomed.is_empty());
    match zoom.state() {
        SequencerState::Idle => prop_assert!(zoomed.is_empty()),
        SequencerState::Zoomed { item } => {
            prop_assert_eq!(&zoomed, &vec![item]);
            let view = layout.item(item).unwrap();
            prop_assert_eq!(view.z_index, Some(100));
            prop_assert_eq!(view.expanded, Some(true));
            prop_assert!(matches!(view.transform, Some(ItemTransform::Scale(_))));
        }
    }
    Ok(())
}

fn run(columns: usize, count: usize, ops: &[Op]) -> Result<GridZoom<RecordedLayout>, TestCaseError> {
    let layout =
        RecordedLayout::grid(columns, count, 120.0).with_style("--grid-gallery-duration-expand", "3");
    let mut zoom = GridZoom::new(layout, GridZoomConfig::default()).unwrap();
    let mut now = Duration::ZERO;

    for op in ops {
        match *op {
            Op::Click(item) => {
                zoom.click(item, now);
            }
            Op::Key(code) => {
                zoom.key(&KeyEvent::new(code), now);
            }
            Op::Resize(new_columns) => {
                zoom.provider_mut().set_columns(new_columns, 120.0);
                zoom.resize(
                    Viewport {
                        width: new_columns as f64 * 120.0,
                        height: 600.0,
                    },
                    now,
                );
            }
            Op::Advance(ms) => {
                now += Duration::from_millis(ms);
                zoom.tick(now);
            }
        }
        check(&zoom)?;
    }
    Ok(zoom)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn state_and_dom_agree((columns, count, ops) in arb_script()) {
        run(columns, count, &ops)?;
    }

    #[test]
    fn commands_stay_in_range((columns, count, ops) in arb_script()) {
        let zoom = run(columns, count, &ops)?;
        for command in zoom.provider().commands() {
            if let Some(item) = command.item() {
                prop_assert!(item < count, "{:?} out of range", command);
            }
        }
    }

    #[test]
    fn draining_deadlines_settles((columns, count, ops) in arb_script()) {
        let mut zoom = run(columns, count, &ops)?;
        let mut guard = 0;
        while let Some(due) = zoom.next_deadline() {
            zoom.tick(due);
            guard += 1;
            prop_assert!(guard < 1000, "deadlines never drained");
        }
        check(&zoom)?;
        prop_assert_eq!(zoom.sequencer().pending(), 0);
    }

    #[test]
    fn degenerate_grids_stay_idle(
        count in 1usize..12,
        single_column in any::<bool>(),
        clicks in prop::collection::vec(0usize..12, 1..20),
    ) {
        let columns = if single_column { 1 } else { count };
        let layout = RecordedLayout::grid(columns, count, 120.0);
        let mut zoom = GridZoom::new(layout, GridZoomConfig::default()).unwrap();
        let mut now = Duration::ZERO;
        for item in clicks {
            zoom.click(item, now);
            now += Duration::from_millis(50);
            zoom.tick(now);
            prop_assert_eq!(zoom.state(), SequencerState::Idle);
        }
        prop_assert!(zoom.provider().zoomed_items().is_empty());
    }
}
