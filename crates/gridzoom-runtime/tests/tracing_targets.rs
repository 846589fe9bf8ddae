#![forbid(unsafe_code)]

//! Logging policy: every controller log event goes to a `gridzoom.*` target
//! and carries structured fields.
//!
//! Run:
//!   cargo test -p gridzoom-runtime --test tracing_targets

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gridzoom_core::event::{KeyCode, KeyEvent};
use gridzoom_runtime::{GridZoom, GridZoomConfig, RecordedLayout, Viewport};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: events.clone(),
    });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn session() {
    let layout = RecordedLayout::grid(3, 6, 200.0).with_style("--grid-gallery-duration-expand", "2");
    let mut zoom = GridZoom::new(layout, GridZoomConfig::default()).unwrap();
    let ms = Duration::from_millis;

    zoom.click(0, ms(0));
    zoom.click(1, ms(50));
    zoom.tick(ms(250));
    zoom.key(&KeyEvent::new(KeyCode::Right), ms(300));
    zoom.tick(ms(500));
    zoom.resize(
        Viewport {
            width: 900.0,
            height: 700.0,
        },
        ms(600),
    );
    zoom.tick(ms(800));
}

#[test]
fn all_events_use_gridzoom_targets() {
    let events = capture(session);
    assert!(!events.is_empty());
    for event in &events {
        assert!(
            event.target.starts_with("gridzoom."),
            "unexpected target {:?}",
            event.target
        );
        assert!(
            event.fields.keys().any(|k| k != "message"),
            "event without structured fields: {event:?}"
        );
    }
}

#[test]
fn lifecycle_is_logged_per_component() {
    let events = capture(session);
    let targets: Vec<&str> = events.iter().map(|e| e.target.as_str()).collect();
    for expected in [
        "gridzoom.geometry",
        "gridzoom.sequencer",
        "gridzoom.keyboard",
        "gridzoom.resize",
    ] {
        assert!(targets.contains(&expected), "no events for {expected}");
    }

    let attached = events
        .iter()
        .find(|e| e.message() == Some("grid zoom attached"))
        .expect("attach event");
    assert_eq!(attached.level, tracing::Level::INFO);
    assert_eq!(attached.fields.get("item_count").map(String::as_str), Some("6"));
}

#[test]
fn stale_activation_is_traced() {
    let events = capture(session);
    let stale: Vec<_> = events
        .iter()
        .filter(|e| e.message() == Some("stale activation dropped"))
        .collect();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].level, tracing::Level::TRACE);
    assert_eq!(stale[0].fields.get("item").map(String::as_str), Some("0"));
}

#[test]
fn disabled_grids_log_at_debug() {
    let events = capture(|| {
        let layout = RecordedLayout::grid(1, 4, 200.0);
        let mut zoom = GridZoom::new(layout, GridZoomConfig::default()).unwrap();
        zoom.click(2, Duration::ZERO);
    });
    let disabled = events
        .iter()
        .find(|e| e.message() == Some("zoom disabled for grid geometry"))
        .expect("disabled event");
    assert_eq!(disabled.level, tracing::Level::DEBUG);
    assert_eq!(disabled.target, "gridzoom.sequencer");
}

#[test]
fn resize_records_the_applied_viewport() {
    let events = capture(session);
    let applied = events
        .iter()
        .find(|e| e.message() == Some("resize applied"))
        .expect("resize event");
    assert_eq!(applied.target, "gridzoom.resize");
    assert_eq!(
        applied.fields.get("viewport_width").map(String::as_str),
        Some("900.0")
    );
    assert_eq!(
        applied.fields.get("viewport_height").map(String::as_str),
        Some("700.0")
    );
}
