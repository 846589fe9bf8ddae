#![forbid(unsafe_code)]

//! [`LayoutProvider`] over the live DOM.
//!
//! Items are the `li` children of the gallery's `ul`; each item's trigger
//! control is its first `button`. Only compiled on `wasm32` targets.

use gridzoom_core::debug;
use gridzoom_runtime::{
    COLUMNS_ATTR, DomCommand, EXPANDED_ATTR, LayoutProvider, WIDTH_ATTR, ZOOMED_CLASS,
    parse_css_number,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Window};

/// Live DOM view of one gallery grid.
#[derive(Debug, Clone)]
pub struct DomLayout {
    window: Window,
    gallery: Element,
    grid: Element,
    items: Vec<HtmlElement>,
    controls: Vec<Option<HtmlElement>>,
}

impl DomLayout {
    /// Locate the gallery matching `selector` and its `ul` grid.
    ///
    /// Returns `None` when either element is missing; the caller skips
    /// initialization in that case.
    pub fn locate(selector: &str) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let gallery = document.query_selector(selector).ok()??;
        let grid = gallery.query_selector("ul").ok()??;

        let nodes = grid.query_selector_all("li").ok()?;
        let mut items = Vec::with_capacity(nodes.length() as usize);
        let mut controls = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            let Some(item) = nodes
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let control = item
                .query_selector("button")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            items.push(item);
            controls.push(control);
        }
        debug!(target: "gridzoom.web", selector, items = items.len(), "gallery located");

        Some(Self {
            window,
            gallery,
            grid,
            items,
            controls,
        })
    }

    /// The grid container (`ul`).
    #[must_use]
    pub fn grid(&self) -> &Element {
        &self.grid
    }

    /// Trigger control of `item`, if it has one.
    #[must_use]
    pub fn control(&self, item: usize) -> Option<&HtmlElement> {
        self.controls.get(item).and_then(Option::as_ref)
    }

    /// Insert the keyboard hint before the grid as a focusable note.
    pub fn insert_key_note(&self, html: &str) {
        let Some(document) = self.window.document() else {
            return;
        };
        let Ok(note) = document.create_element("p") else {
            return;
        };
        note.set_inner_html(html);
        let _ = note.class_list().add_1("key-note");
        let _ = note.set_attribute("tabindex", "0");
        if let Some(parent) = self.grid.parent_node() {
            let _ = parent.insert_before(&note, Some(&*self.grid));
        }
    }

    fn item_style(&self, item: usize, property: &str, value: &str) {
        if let Some(el) = self.items.get(item) {
            let _ = el.style().set_property(property, value);
        }
    }

    fn set_expanded(&self, item: usize, expanded: bool) {
        if let Some(control) = self.control(item) {
            let _ = control.set_attribute(EXPANDED_ATTR, if expanded { "true" } else { "false" });
        }
    }
}

impl LayoutProvider for DomLayout {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_top(&self, item: usize) -> f64 {
        self.items
            .get(item)
            .map_or(0.0, |el| el.get_bounding_client_rect().top())
    }

    fn item_width(&self, item: usize) -> f64 {
        let Some(el) = self.items.get(item) else {
            return 0.0;
        };
        self.window
            .get_computed_style(el)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("width").ok())
            .and_then(|width| parse_css_number(&width))
            .unwrap_or_else(|| el.get_bounding_client_rect().width())
    }

    fn style_property(&self, name: &str) -> Option<String> {
        let value = self
            .window
            .get_computed_style(&self.gallery)
            .ok()??
            .get_property_value(name)
            .ok()?;
        (!value.trim().is_empty()).then_some(value)
    }

    fn apply(&mut self, command: DomCommand) {
        match command {
            DomCommand::SetGridZoomed { zoomed } => {
                let _ = self
                    .grid
                    .class_list()
                    .toggle_with_force(ZOOMED_CLASS, zoomed);
            }
            DomCommand::SetItemZoomed { item, zoomed } => {
                if let Some(el) = self.items.get(item) {
                    let _ = el.class_list().toggle_with_force(ZOOMED_CLASS, zoomed);
                }
            }
            DomCommand::SetZIndex { item, z_index } => {
                self.item_style(item, "z-index", &z_index.to_string());
            }
            DomCommand::SetTransform { item, transform } => {
                self.item_style(item, "transform", &transform.css());
            }
            DomCommand::SetTransformOrigin { item, origin } => {
                self.item_style(item, "transform-origin", &origin.to_string());
            }
            DomCommand::SetExpanded { item, expanded } => self.set_expanded(item, expanded),
            DomCommand::SetGridMetrics {
                columns,
                item_width,
            } => {
                match columns {
                    Some(columns) => {
                        let _ = self.grid.set_attribute(COLUMNS_ATTR, &columns.to_string());
                    }
                    None => {
                        let _ = self.grid.remove_attribute(COLUMNS_ATTR);
                    }
                }
                let _ = self
                    .grid
                    .set_attribute(WIDTH_ATTR, &format!("{item_width}px"));
            }
            DomCommand::Focus { item } => {
                if let Some(control) = self.control(item) {
                    let _ = control.focus();
                }
            }
        }
    }
}
