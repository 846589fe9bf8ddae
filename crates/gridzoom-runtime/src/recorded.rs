#![forbid(unsafe_code)]

//! In-memory layout provider.
//!
//! [`RecordedLayout`] answers layout queries from a list of item boxes and a
//! style map, applies every [`DomCommand`] to a per-item [`ItemView`], and
//! records the command stream. Tests assert against the views; JS hosts that
//! perform DOM writes themselves drain the stream with
//! [`RecordedLayout::take_commands`].

use std::collections::BTreeMap;

use gridzoom_layout::{GridGeometry, Rect, TransformOrigin};
use serde::Serialize;

use crate::provider::{DomCommand, ItemTransform, LayoutProvider};

/// Last written visual state of one item. `None` means never written.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ItemView {
    pub zoomed: bool,
    pub z_index: Option<i32>,
    pub transform: Option<ItemTransform>,
    pub origin: Option<TransformOrigin>,
    pub expanded: Option<bool>,
}

/// Recording [`LayoutProvider`].
#[derive(Debug, Clone, Default)]
pub struct RecordedLayout {
    boxes: Vec<Rect>,
    styles: BTreeMap<String, String>,
    items: Vec<ItemView>,
    grid_zoomed: bool,
    metrics: Option<GridGeometry>,
    focused: Option<usize>,
    commands: Vec<DomCommand>,
}

impl RecordedLayout {
    /// Layout over explicit item boxes.
    #[must_use]
    pub fn new(boxes: Vec<Rect>) -> Self {
        let items = vec![ItemView::default(); boxes.len()];
        Self {
            boxes,
            items,
            ..Self::default()
        }
    }

    /// `count` square items of side `width`, `columns` per row.
    #[must_use]
    pub fn grid(columns: usize, count: usize, width: f64) -> Self {
        Self::new(grid_boxes(columns, count, width))
    }

    /// Builder-style style property.
    #[must_use]
    pub fn with_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_style(name, value);
        self
    }

    pub fn set_style(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.styles.insert(name.into(), value.into());
    }

    /// Replace item boxes, as after a reflow. The item count must not change.
    pub fn relayout(&mut self, boxes: Vec<Rect>) {
        debug_assert_eq!(boxes.len(), self.boxes.len(), "item count is fixed");
        self.boxes = boxes;
    }

    /// Reflow the current items into `columns` per row of side `width`.
    pub fn set_columns(&mut self, columns: usize, width: f64) {
        self.boxes = grid_boxes(columns, self.boxes.len(), width);
    }

    /// Every command applied so far.
    #[must_use]
    pub fn commands(&self) -> &[DomCommand] {
        &self.commands
    }

    /// Drain the recorded command stream. Views are kept.
    pub fn take_commands(&mut self) -> Vec<DomCommand> {
        std::mem::take(&mut self.commands)
    }

    #[must_use]
    pub fn item(&self, item: usize) -> Option<&ItemView> {
        self.items.get(item)
    }

    #[must_use]
    pub fn items(&self) -> &[ItemView] {
        &self.items
    }

    /// Indices of items carrying the zoomed class.
    #[must_use]
    pub fn zoomed_items(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, view)| view.zoomed.then_some(i))
            .collect()
    }

    /// Whether the grid container carries the zoomed class.
    #[must_use]
    pub const fn grid_zoomed(&self) -> bool {
        self.grid_zoomed
    }

    /// Geometry last mirrored onto the container.
    #[must_use]
    pub const fn metrics(&self) -> Option<GridGeometry> {
        self.metrics
    }

    /// Item whose control last received focus.
    #[must_use]
    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }
}

fn grid_boxes(columns: usize, count: usize, width: f64) -> Vec<Rect> {
    let columns = columns.max(1);
    (0..count)
        .map(|i| {
            let (row, col) = (i / columns, i % columns);
            Rect::new(col as f64 * width, row as f64 * width, width, width)
        })
        .collect()
}

impl LayoutProvider for RecordedLayout {
    fn item_count(&self) -> usize {
        self.boxes.len()
    }

    fn item_top(&self, item: usize) -> f64 {
        self.boxes.get(item).map_or(0.0, Rect::top)
    }

    fn item_width(&self, item: usize) -> f64 {
        self.boxes.get(item).map_or(0.0, |r| r.width)
    }

    fn style_property(&self, name: &str) -> Option<String> {
        self.styles.get(name).cloned()
    }

    fn apply(&mut self, command: DomCommand) {
        self.commands.push(command);
        match command {
            DomCommand::SetGridZoomed { zoomed } => self.grid_zoomed = zoomed,
            DomCommand::SetGridMetrics {
                columns,
                item_width,
            } => self.metrics = Some(GridGeometry::new(columns, item_width)),
            DomCommand::Focus { item } => self.focused = Some(item),
            DomCommand::SetItemZoomed { item, zoomed } => {
                if let Some(view) = self.items.get_mut(item) {
                    view.zoomed = zoomed;
                }
            }
            DomCommand::SetZIndex { item, z_index } => {
                if let Some(view) = self.items.get_mut(item) {
                    view.z_index = Some(z_index);
                }
            }
            DomCommand::SetTransform { item, transform } => {
                if let Some(view) = self.items.get_mut(item) {
                    view.transform = Some(transform);
                }
            }
            DomCommand::SetTransformOrigin { item, origin } => {
                if let Some(view) = self.items.get_mut(item) {
                    view.origin = Some(origin);
                }
            }
            DomCommand::SetExpanded { item, expanded } => {
                if let Some(view) = self.items.get_mut(item) {
                    view.expanded = Some(expanded);
                }
            }
        }
    }
}
