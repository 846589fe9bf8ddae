#![forbid(unsafe_code)]

//! Keyboard navigation while an item is zoomed.
//!
//! `Escape` collapses the zoomed item. `ArrowLeft` / `ArrowRight` move the
//! zoom to the previous / next sibling in document order. There is no
//! wrap-around: at either end the key is a no-op. Nothing happens while the
//! grid is idle, and key releases are ignored.
//!
//! Navigation only decides *what* should happen; the controller feeds the
//! resulting [`KeyboardAction`] straight into the activation sequencer.

use gridzoom_core::event::{KeyCode, KeyEvent};

/// Sibling direction in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Previous,
    Next,
}

/// What a key press asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    /// Collapse the zoomed `item`.
    Collapse { item: usize },
    /// Release `from` without restoring focus, focus `to`, then zoom `to`.
    MoveTo { from: usize, to: usize },
}

/// Sibling of `item` in `direction`, if one exists.
#[must_use]
pub fn sibling(item: usize, direction: NavDirection, item_count: usize) -> Option<usize> {
    match direction {
        NavDirection::Previous => item.checked_sub(1),
        NavDirection::Next => item.checked_add(1).filter(|&next| next < item_count),
    }
}

/// Map a key event to a navigation action.
///
/// `active` is the currently zoomed item, if any.
#[must_use]
pub fn navigate(key: &KeyEvent, active: Option<usize>, item_count: usize) -> Option<KeyboardAction> {
    if !key.is_press() {
        return None;
    }
    let item = active?;
    let direction = match key.code {
        KeyCode::Escape => return Some(KeyboardAction::Collapse { item }),
        KeyCode::Left => NavDirection::Previous,
        KeyCode::Right => NavDirection::Next,
        _ => return None,
    };
    sibling(item, direction, item_count).map(|to| KeyboardAction::MoveTo { from: item, to })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridzoom_core::event::{KeyEventKind, Modifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    #[test]
    fn idle_grid_ignores_keys() {
        assert_eq!(navigate(&press(KeyCode::Escape), None, 6), None);
        assert_eq!(navigate(&press(KeyCode::Right), None, 6), None);
    }

    #[test]
    fn escape_collapses_active() {
        assert_eq!(
            navigate(&press(KeyCode::Escape), Some(3), 6),
            Some(KeyboardAction::Collapse { item: 3 })
        );
    }

    #[test]
    fn arrows_move_between_siblings() {
        assert_eq!(
            navigate(&press(KeyCode::Right), Some(1), 6),
            Some(KeyboardAction::MoveTo { from: 1, to: 2 })
        );
        assert_eq!(
            navigate(&press(KeyCode::Left), Some(1), 6),
            Some(KeyboardAction::MoveTo { from: 1, to: 0 })
        );
    }

    #[test]
    fn no_wrap_around() {
        assert_eq!(navigate(&press(KeyCode::Left), Some(0), 6), None);
        assert_eq!(navigate(&press(KeyCode::Right), Some(5), 6), None);
    }

    #[test]
    fn other_keys_and_releases_are_ignored() {
        assert_eq!(navigate(&press(KeyCode::Up), Some(2), 6), None);
        assert_eq!(navigate(&press(KeyCode::Char('a')), Some(2), 6), None);
        let release = press(KeyCode::Escape).with_kind(KeyEventKind::Release);
        assert_eq!(navigate(&release, Some(2), 6), None);
    }

    #[test]
    fn modifiers_do_not_block_navigation() {
        let key = press(KeyCode::Right).with_modifiers(Modifiers::SHIFT);
        assert_eq!(
            navigate(&key, Some(0), 2),
            Some(KeyboardAction::MoveTo { from: 0, to: 1 })
        );
    }

    #[test]
    fn sibling_bounds() {
        assert_eq!(sibling(0, NavDirection::Previous, 3), None);
        assert_eq!(sibling(2, NavDirection::Next, 3), None);
        assert_eq!(sibling(usize::MAX, NavDirection::Next, usize::MAX), None);
    }
}
