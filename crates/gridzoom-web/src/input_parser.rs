#![forbid(unsafe_code)]

//! JSON input parser for host-encoded grid events.
//!
//! JS hosts that own the DOM forward events to [`crate::host::HostGrid`] as
//! small JSON objects:
//!
//! ```json
//! {"kind":"click","item":3}
//! {"kind":"key","phase":"down","code":"ArrowLeft","mods":0,"repeat":false}
//! {"kind":"resize","width":1280,"height":720}
//! ```
//!
//! `code` is the DOM `KeyboardEvent.code`. `mods` is a bitmask
//! (`1=shift`, `2=alt`, `4=ctrl`, `8=meta`). Kinds without a grid mapping
//! (focus, wheel, ...) parse to `Ok(None)`.

use gridzoom_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use serde::Deserialize;

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown key phase value.
    UnknownPhase(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownPhase(phase) => write!(f, "unknown phase: {phase}"),
        }
    }
}

impl std::error::Error for InputParseError {}

#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    item: Option<usize>,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    mods: Option<i32>,
    #[serde(default)]
    repeat: Option<bool>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
}

/// Parse one JSON-encoded input into an [`Event`].
///
/// Returns `Ok(None)` for kinds the grid does not react to and `Err` for
/// malformed JSON or missing required fields.
pub fn parse_encoded_input(json: &str) -> Result<Option<Event>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "click" => {
            let item = raw.item.ok_or(InputParseError::MissingField("item"))?;
            Ok(Some(Event::Click { item }))
        }
        "key" => parse_key_event(&raw).map(Some),
        "resize" => {
            let width = raw.width.ok_or(InputParseError::MissingField("width"))?;
            let height = raw.height.ok_or(InputParseError::MissingField("height"))?;
            Ok(Some(Event::Resize { width, height }))
        }
        _ => Ok(None),
    }
}

fn parse_modifiers(mods: Option<i32>) -> Modifiers {
    let bits = mods.unwrap_or(0).clamp(0, i32::from(u8::MAX)) as u8;
    Modifiers::from_bits_truncate(bits)
}

fn parse_key_event(raw: &RawInput) -> Result<Event, InputParseError> {
    let code = raw
        .code
        .as_deref()
        .ok_or(InputParseError::MissingField("code"))?;
    let kind = match raw.phase.as_deref().unwrap_or("down") {
        "down" if raw.repeat.unwrap_or(false) => KeyEventKind::Repeat,
        "down" => KeyEventKind::Press,
        "up" => KeyEventKind::Release,
        other => return Err(InputParseError::UnknownPhase(other.to_owned())),
    };
    Ok(Event::Key(
        KeyEvent::new(KeyCode::from_dom_code(code))
            .with_modifiers(parse_modifiers(raw.mods))
            .with_kind(kind),
    ))
}
