#![forbid(unsafe_code)]

//! `wasm-bindgen` exports.
//!
//! - [`GalleryGridZoom`] attaches the controller to a live gallery: click
//!   listeners on every item control, a document `keydown` listener and a
//!   window `resize` listener. Deferred writes run from a single
//!   `setTimeout` armed for the controller's next deadline.
//! - [`GridZoomRunner`] wraps [`HostGrid`] with JS-friendly types.
//!
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gridzoom_core::debug;
use gridzoom_core::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
use gridzoom_runtime::{GridZoom, GridZoomConfig, LayoutProvider, Viewport};
use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, KeyboardEvent};
use web_time::Instant;

use crate::dom::DomLayout;
use crate::timer_delay_ms;
use crate::host::{HostGrid, ItemBox};

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

struct Session {
    zoom: GridZoom<DomLayout>,
    origin: Instant,
    timer: Option<i32>,
}

impl Session {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

type Shared = Rc<RefCell<Session>>;

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

/// Arm one `setTimeout` for the controller's next deadline, replacing any
/// pending one.
fn schedule_tick(session: &Shared) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(mut s) = session.try_borrow_mut() else {
        return;
    };
    if let Some(handle) = s.timer.take() {
        window.clear_timeout_with_handle(handle);
    }
    let Some(due) = s.zoom.next_deadline() else {
        return;
    };
    let delay = due.saturating_sub(s.now());
    let delay_ms = timer_delay_ms(delay);

    let weak = Rc::downgrade(session);
    let callback = Closure::once_into_js(move || {
        let Some(session) = weak.upgrade() else {
            return;
        };
        if let Ok(mut s) = session.try_borrow_mut() {
            s.timer = None;
            let now = s.now();
            s.zoom.tick(now);
        }
        schedule_tick(&session);
    });
    if let Ok(handle) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms)
    {
        s.timer = Some(handle);
    }
}

/// Run `f` against the controller at the current time, then re-arm the timer.
fn dispatch(weak: &Weak<RefCell<Session>>, f: impl FnOnce(&mut GridZoom<DomLayout>, Duration)) {
    let Some(session) = weak.upgrade() else {
        return;
    };
    {
        let Ok(mut s) = session.try_borrow_mut() else {
            return;
        };
        let now = s.now();
        f(&mut s.zoom, now);
    }
    schedule_tick(&session);
}

fn key_event_from_dom(event: &KeyboardEvent) -> KeyEvent {
    let kind = if event.repeat() {
        KeyEventKind::Repeat
    } else {
        KeyEventKind::Press
    };
    KeyEvent::new(KeyCode::from_dom_code(&event.code()))
        .with_modifiers(Modifiers::from_dom(
            event.shift_key(),
            event.alt_key(),
            event.ctrl_key(),
            event.meta_key(),
        ))
        .with_kind(kind)
}

/// Grid zoom attached to a live gallery element.
///
/// Listeners and the pending timer are removed when the value is freed.
#[wasm_bindgen]
pub struct GalleryGridZoom {
    session: Shared,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl GalleryGridZoom {
    /// Attach to the gallery matching `selector` (e.g. `".grid-gallery"`)
    /// with the default configuration.
    ///
    /// Returns `undefined` when the gallery, its grid, or its items are
    /// missing.
    pub fn attach(selector: &str) -> Option<GalleryGridZoom> {
        Self::attach_with(selector, GridZoomConfig::default())
    }

    /// Attach with a JSON configuration. An invalid configuration is
    /// reported on the console and nothing is attached.
    #[wasm_bindgen(js_name = attachWithConfig)]
    pub fn attach_with_config(selector: &str, config_json: &str) -> Option<GalleryGridZoom> {
        match GridZoomConfig::from_json_str(config_json).and_then(GridZoomConfig::validated) {
            Ok(config) => Self::attach_with(selector, config),
            Err(err) => {
                console_error(&format!("gridzoom: {err}"));
                None
            }
        }
    }

    fn attach_with(selector: &str, config: GridZoomConfig) -> Option<GalleryGridZoom> {
        install_panic_hook();
        let layout = DomLayout::locate(selector)?;
        if let Some(note) = config.key_note.as_deref() {
            layout.insert_key_note(note);
        }
        let controls: Vec<_> = (0..layout.item_count())
            .map(|item| layout.control(item).cloned())
            .collect();

        let zoom = match GridZoom::new(layout, config) {
            Ok(zoom) => zoom,
            Err(err) => {
                debug!(target: "gridzoom.web", selector, error = %err, "gallery skipped");
                return None;
            }
        };
        let session = Rc::new(RefCell::new(Session {
            zoom,
            origin: Instant::now(),
            timer: None,
        }));

        let mut attached = Self {
            session,
            listeners: Vec::new(),
        };
        for (item, control) in controls.into_iter().enumerate() {
            let Some(control) = control else {
                continue;
            };
            let weak = Rc::downgrade(&attached.session);
            attached.listen(
                control.into(),
                "click",
                Box::new(move |_event: web_sys::Event| {
                    dispatch(&weak, |zoom, now| {
                        zoom.click(item, now);
                    });
                }),
            );
        }

        let window = web_sys::window()?;
        if let Some(document) = window.document() {
            let weak = Rc::downgrade(&attached.session);
            attached.listen(
                document.into(),
                "keydown",
                Box::new(move |event: web_sys::Event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    let key = key_event_from_dom(event);
                    dispatch(&weak, |zoom, now| {
                        zoom.key(&key, now);
                    });
                }),
            );
        }

        let weak = Rc::downgrade(&attached.session);
        let resize_window = window.clone();
        attached.listen(
            window.into(),
            "resize",
            Box::new(move |_event: web_sys::Event| {
                let viewport = Viewport {
                    width: resize_window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(0.0),
                    height: resize_window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(0.0),
                };
                dispatch(&weak, |zoom, now| {
                    zoom.resize(viewport, now);
                });
            }),
        );

        debug!(
            target: "gridzoom.web",
            selector,
            listeners = attached.listeners.len(),
            "gallery attached"
        );
        Some(attached)
    }

    fn listen(
        &mut self,
        target: EventTarget,
        kind: &'static str,
        handler: Box<dyn FnMut(web_sys::Event)>,
    ) {
        let callback = Closure::wrap(handler);
        if target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .is_ok()
        {
            self.listeners.push(Listener {
                target,
                kind,
                callback,
            });
        }
    }

    /// Index of the zoomed item, if any.
    #[wasm_bindgen(js_name = zoomedItem)]
    pub fn zoomed_item(&self) -> Option<u32> {
        self.session
            .borrow()
            .zoom
            .zoomed_item()
            .and_then(|item| u32::try_from(item).ok())
    }

    /// Inferred column count, if the grid has more than one row.
    pub fn columns(&self) -> Option<u32> {
        self.session
            .borrow()
            .zoom
            .geometry()
            .columns()
            .and_then(|columns| u32::try_from(columns).ok())
    }
}

impl Drop for GalleryGridZoom {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        let Ok(mut s) = self.session.try_borrow_mut() else {
            return;
        };
        if let (Some(window), Some(handle)) = (web_sys::window(), s.timer.take()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

/// Host-driven runner for JS hosts that apply DOM writes themselves.
///
/// The host describes the rendered items once, forwards JSON-encoded
/// events, advances time and drains commands as JSON lines.
#[wasm_bindgen]
pub struct GridZoomRunner {
    inner: HostGrid,
}

#[wasm_bindgen]
impl GridZoomRunner {
    /// Create a runner from a JSON grid description
    /// (`{"items":[{"top":0,"width":200},...],"styles":{...}}`) and an
    /// optional JSON configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(description_json: &str, config_json: Option<String>) -> Result<GridZoomRunner, JsValue> {
        install_panic_hook();
        HostGrid::from_json(description_json, config_json.as_deref())
            .map(|inner| Self { inner })
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Parse a JSON-encoded input and handle it.
    /// Returns `true` if accepted, `false` if unsupported/malformed.
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        self.inner.push_encoded_input(json)
    }

    /// Advance the deterministic clock by `dt_ms` milliseconds. Returns the
    /// number of deferred writes applied.
    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) -> u32 {
        u32::try_from(self.inner.advance_time_ms(dt_ms)).unwrap_or(u32::MAX)
    }

    /// Set the deterministic clock to absolute nanoseconds.
    #[wasm_bindgen(js_name = setTime)]
    pub fn set_time(&mut self, ts_ns: f64) -> u32 {
        u32::try_from(self.inner.set_time_ns(ts_ns)).unwrap_or(u32::MAX)
    }

    /// Replace item boxes (JSON array of `{"top","width"}`) after a reflow.
    pub fn relayout(&mut self, items_json: &str) -> bool {
        serde_json::from_str::<Vec<ItemBox>>(items_json)
            .is_ok_and(|items| self.inner.relayout(&items))
    }

    /// Milliseconds until the next deferred write.
    #[wasm_bindgen(js_name = nextDeadlineMs)]
    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.inner.next_deadline_ms()
    }

    /// Drain pending DOM commands as JSON lines.
    #[wasm_bindgen(js_name = takeCommands)]
    pub fn take_commands(&mut self) -> String {
        self.inner.take_commands_jsonl()
    }

    /// Controller state as JSON.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.inner
            .snapshot_json()
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }
}
