#![forbid(unsafe_code)]

//! Canonical host event types.
//!
//! The zoom controller reacts to three kinds of host notifications: a click
//! on an item's trigger control, a document-level key press, and a viewport
//! resize. Hosts translate their native events (DOM `click`, `keydown`,
//! `resize`) into these values before handing them to the runtime.
//!
//! # Design Notes
//!
//! - Items are addressed by their 0-based position in sibling order.
//! - Key codes follow the DOM `KeyboardEvent.code` vocabulary, see
//!   [`KeyCode::from_dom_code`].
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

/// Canonical host event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The trigger control of the item at `item` was activated.
    Click {
        /// 0-based index of the item in sibling order.
        item: usize,
    },

    /// A keyboard event delivered at document level.
    Key(KeyEvent),

    /// The viewport was resized.
    Resize {
        /// New viewport width in layout units.
        width: f64,
        /// New viewport height in layout units.
        height: f64,
    },
}

impl Event {
    /// Shorthand for a click on item `item`.
    #[must_use]
    pub const fn click(item: usize) -> Self {
        Self::Click { item }
    }

    /// Shorthand for a plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this event is a press or auto-repeat (not a release).
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Anything the controller has no use for.
    Unidentified,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.code` string to a key code.
    ///
    /// `code` is layout-independent (`"KeyA"` regardless of keyboard layout),
    /// which is what the gallery listens to.
    #[must_use]
    pub fn from_dom_code(code: &str) -> Self {
        match code {
            "Escape" => Self::Escape,
            "Enter" | "NumpadEnter" => Self::Enter,
            "Tab" => Self::Tab,
            "Home" => Self::Home,
            "End" => Self::End,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "Space" => Self::Char(' '),
            other => {
                let letter = other
                    .strip_prefix("Key")
                    .or_else(|| other.strip_prefix("Digit"));
                match letter.map(|rest| {
                    let mut chars = rest.chars();
                    (chars.next(), chars.next())
                }) {
                    Some((Some(c), None)) if c.is_ascii_alphanumeric() => {
                        Self::Char(c.to_ascii_lowercase())
                    }
                    _ => Self::Unidentified,
                }
            }
        }
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguished).
    #[default]
    Press,

    /// Key is being held (auto-repeat).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Modifiers {
    /// Build from the four DOM `KeyboardEvent` modifier booleans.
    #[must_use]
    pub fn from_dom(shift: bool, alt: bool, ctrl: bool, meta: bool) -> Self {
        let mut mods = Self::NONE;
        mods.set(Self::SHIFT, shift);
        mods.set(Self::ALT, alt);
        mods.set(Self::CTRL, ctrl);
        mods.set(Self::SUPER, meta);
        mods
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_codes_for_navigation_keys() {
        assert_eq!(KeyCode::from_dom_code("Escape"), KeyCode::Escape);
        assert_eq!(KeyCode::from_dom_code("ArrowLeft"), KeyCode::Left);
        assert_eq!(KeyCode::from_dom_code("ArrowRight"), KeyCode::Right);
        assert_eq!(KeyCode::from_dom_code("ArrowUp"), KeyCode::Up);
        assert_eq!(KeyCode::from_dom_code("ArrowDown"), KeyCode::Down);
        assert_eq!(KeyCode::from_dom_code("NumpadEnter"), KeyCode::Enter);
    }

    #[test]
    fn dom_codes_for_characters() {
        assert_eq!(KeyCode::from_dom_code("KeyQ"), KeyCode::Char('q'));
        assert_eq!(KeyCode::from_dom_code("Digit7"), KeyCode::Char('7'));
        assert_eq!(KeyCode::from_dom_code("Space"), KeyCode::Char(' '));
    }

    #[test]
    fn unknown_dom_codes() {
        assert_eq!(KeyCode::from_dom_code(""), KeyCode::Unidentified);
        assert_eq!(KeyCode::from_dom_code("F5"), KeyCode::Unidentified);
        assert_eq!(KeyCode::from_dom_code("KeyAB"), KeyCode::Unidentified);
        assert_eq!(KeyCode::from_dom_code("Key"), KeyCode::Unidentified);
    }

    #[test]
    fn key_event_defaults() {
        let ev = KeyEvent::new(KeyCode::Escape);
        assert_eq!(ev.modifiers, Modifiers::NONE);
        assert_eq!(ev.kind, KeyEventKind::Press);
        assert!(ev.is_press());
        assert!(!ev.with_kind(KeyEventKind::Release).is_press());
        assert!(ev.with_kind(KeyEventKind::Repeat).is_press());
    }

    #[test]
    fn modifiers_from_dom_flags() {
        let mods = Modifiers::from_dom(true, false, true, false);
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::SUPER));
        assert_eq!(Modifiers::from_dom(false, false, false, false), Modifiers::NONE);
    }

    #[test]
    fn event_shorthands() {
        assert_eq!(Event::click(3), Event::Click { item: 3 });
        assert_eq!(
            Event::key(KeyCode::Left),
            Event::Key(KeyEvent::new(KeyCode::Left))
        );
    }
}
