#![forbid(unsafe_code)]

//! Zoom state: the single active item of one grid.
//!
//! Holds at most one active item. It does no validation beyond identity;
//! the activation sequencer keeps the at-most-one-zoomed invariant by
//! clearing every item before it activates one.

use crate::deferred::Generation;

/// The active item and the transition generation that activated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveItem {
    pub item: usize,
    pub generation: Generation,
}

/// At-most-one active item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoomState {
    active: Option<ActiveItem>,
}

impl ZoomState {
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Mark `item` active, replacing any previous entry.
    pub fn activate(&mut self, item: usize, generation: Generation) {
        self.active = Some(ActiveItem { item, generation });
    }

    /// Clear the active item, returning it.
    pub fn clear(&mut self) -> Option<ActiveItem> {
        self.active.take()
    }

    /// Index of the active item.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.active.map(|active| active.item)
    }

    /// Full active entry.
    #[must_use]
    pub const fn active(&self) -> Option<ActiveItem> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let state = ZoomState::new();
        assert_eq!(state.current(), None);
        assert_eq!(state.active(), None);
    }

    #[test]
    fn activate_replaces_previous() {
        let mut state = ZoomState::new();
        state.activate(1, Generation::ZERO.next());
        state.activate(4, Generation::ZERO.next().next());
        assert_eq!(state.current(), Some(4));
        assert_eq!(state.active().map(|a| a.generation.get()), Some(2));
    }

    #[test]
    fn clear_returns_entry() {
        let mut state = ZoomState::new();
        state.activate(2, Generation::ZERO);
        assert_eq!(state.clear().map(|a| a.item), Some(2));
        assert_eq!(state.clear(), None);
        assert_eq!(state.active(), None);
    }
}
