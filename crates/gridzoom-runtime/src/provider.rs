#![forbid(unsafe_code)]

//! Layout provider boundary.
//!
//! The controller never touches a rendering surface directly. It reads
//! layout through [`LayoutProvider`] queries and writes back through typed
//! [`DomCommand`] values. A browser host maps each command to one DOM write;
//! tests and JS hosts that apply writes themselves use
//! [`RecordedLayout`](crate::recorded::RecordedLayout).

use gridzoom_layout::TransformOrigin;
use serde::{Deserialize, Serialize};

/// Class toggled on the grid container and on the zoomed item.
pub const ZOOMED_CLASS: &str = "is-zoomed";
/// Boolean accessibility attribute on each item's trigger control.
pub const EXPANDED_ATTR: &str = "aria-expanded";
/// Container attribute mirroring the inferred column count.
pub const COLUMNS_ATTR: &str = "data-cols";
/// Container attribute mirroring the inferred item width.
pub const WIDTH_ATTR: &str = "data-width";

/// Inline `transform` value for an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemTransform {
    /// `transform: none`.
    None,
    /// `transform: scale(<factor>)`.
    Scale(f64),
}

impl ItemTransform {
    /// CSS value for the inline `transform` property.
    #[must_use]
    pub fn css(&self) -> String {
        match self {
            Self::None => "none".to_owned(),
            Self::Scale(factor) => format!("scale({factor})"),
        }
    }
}

/// One style or attribute write issued by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomCommand {
    /// Toggle [`ZOOMED_CLASS`] on the grid container.
    SetGridZoomed { zoomed: bool },
    /// Toggle [`ZOOMED_CLASS`] on an item.
    SetItemZoomed { item: usize, zoomed: bool },
    /// Set an item's inline `z-index`.
    SetZIndex { item: usize, z_index: i32 },
    /// Set an item's inline `transform`.
    SetTransform { item: usize, transform: ItemTransform },
    /// Set an item's inline `transform-origin`.
    SetTransformOrigin { item: usize, origin: TransformOrigin },
    /// Set [`EXPANDED_ATTR`] on an item's trigger control.
    SetExpanded { item: usize, expanded: bool },
    /// Mirror the inferred geometry onto the container
    /// ([`COLUMNS_ATTR`] is removed when `columns` is `None`).
    SetGridMetrics {
        columns: Option<usize>,
        item_width: f64,
    },
    /// Move input focus to an item's trigger control.
    Focus { item: usize },
}

impl DomCommand {
    /// The item this command targets, if it targets one.
    #[must_use]
    pub const fn item(&self) -> Option<usize> {
        match *self {
            Self::SetItemZoomed { item, .. }
            | Self::SetZIndex { item, .. }
            | Self::SetTransform { item, .. }
            | Self::SetTransformOrigin { item, .. }
            | Self::SetExpanded { item, .. }
            | Self::Focus { item } => Some(item),
            Self::SetGridZoomed { .. } | Self::SetGridMetrics { .. } => None,
        }
    }
}

/// Narrow query/mutate interface onto the rendered grid.
///
/// Items are addressed by 0-based sibling index and are fixed for the
/// lifetime of the provider. Queries are best-effort: a host that cannot
/// answer returns a neutral value (`0.0`, `None`) rather than failing.
pub trait LayoutProvider {
    /// Number of grid items.
    fn item_count(&self) -> usize;

    /// Top edge of the item's bounding box.
    fn item_top(&self, item: usize) -> f64;

    /// Computed width of the item.
    fn item_width(&self, item: usize) -> f64;

    /// Raw computed style value on the gallery element (custom properties
    /// such as `--grid-gallery-scale-factor`).
    fn style_property(&self, name: &str) -> Option<String>;

    /// Apply one write.
    fn apply(&mut self, command: DomCommand);
}

impl<P: LayoutProvider + ?Sized> LayoutProvider for &mut P {
    fn item_count(&self) -> usize {
        (**self).item_count()
    }

    fn item_top(&self, item: usize) -> f64 {
        (**self).item_top(item)
    }

    fn item_width(&self, item: usize) -> f64 {
        (**self).item_width(item)
    }

    fn style_property(&self, name: &str) -> Option<String> {
        (**self).style_property(name)
    }

    fn apply(&mut self, command: DomCommand) {
        (**self).apply(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridzoom_layout::{HorizontalOrigin, VerticalOrigin};

    #[test]
    fn transform_css_values() {
        assert_eq!(ItemTransform::None.css(), "none");
        assert_eq!(ItemTransform::Scale(1.5).css(), "scale(1.5)");
    }

    #[test]
    fn command_item_targets() {
        assert_eq!(DomCommand::Focus { item: 4 }.item(), Some(4));
        assert_eq!(DomCommand::SetGridZoomed { zoomed: true }.item(), None);
        assert_eq!(
            DomCommand::SetGridMetrics {
                columns: Some(3),
                item_width: 10.0
            }
            .item(),
            None
        );
    }

    #[test]
    fn commands_serialize_with_op_tag() {
        let json = serde_json::to_value(DomCommand::SetTransformOrigin {
            item: 2,
            origin: TransformOrigin::new(VerticalOrigin::Top, HorizontalOrigin::Right),
        })
        .unwrap();
        assert_eq!(json["op"], "set_transform_origin");
        assert_eq!(json["item"], 2);
        assert_eq!(json["origin"]["vertical"], "top");
        assert_eq!(json["origin"]["horizontal"], "right");

        let json = serde_json::to_value(DomCommand::SetTransform {
            item: 0,
            transform: ItemTransform::Scale(2.0),
        })
        .unwrap();
        assert_eq!(json["transform"]["scale"], 2.0);
    }
}
