#![forbid(unsafe_code)]

//! Deferred effects on a host-driven clock.
//!
//! Visual writes that must wait for a CSS transition are queued here with a
//! due time instead of being handed to a platform timer. The host advances
//! time and drains due entries, so sequencing is deterministic and testable
//! without a browser.
//!
//! # Invariants
//!
//! 1. Entries are ordered by due time; entries with equal due times keep
//!    insertion order (FIFO).
//! 2. Every entry carries the [`Generation`] of the transition that queued
//!    it. The queue itself never drops entries; consumers compare the
//!    generation against their current one and skip stale work.

use std::collections::VecDeque;
use std::time::Duration;

/// Monotonic transition counter.
///
/// Bumped on every state transition that can invalidate queued work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The following generation.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// One queued effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred<T> {
    pub due: Duration,
    pub generation: Generation,
    pub effect: T,
}

/// Due-time ordered effect queue.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    entries: VecDeque<Deferred<T>>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Queue `effect` to run at `due`.
    pub fn schedule(&mut self, due: Duration, generation: Generation, effect: T) {
        let pos = self.entries.partition_point(|entry| entry.due <= due);
        self.entries.insert(
            pos,
            Deferred {
                due,
                generation,
                effect,
            },
        );
    }

    /// Earliest due time, if anything is queued.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.front().map(|entry| entry.due)
    }

    /// Pop the earliest entry if it is due at `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Deferred<T>> {
        if self.entries.front()?.due <= now {
            self.entries.pop_front()
        } else {
            None
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn pops_in_due_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule(30 * MS, Generation::ZERO, "c");
        queue.schedule(10 * MS, Generation::ZERO, "a");
        queue.schedule(20 * MS, Generation::ZERO, "b");
        assert_eq!(queue.next_deadline(), Some(10 * MS));

        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(100 * MS))
            .map(|d| d.effect)
            .collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_due_times_are_fifo() {
        let mut queue = DeferredQueue::new();
        for label in ["first", "second", "third"] {
            queue.schedule(5 * MS, Generation::ZERO, label);
        }
        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(5 * MS))
            .map(|d| d.effect)
            .collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn nothing_pops_before_due() {
        let mut queue = DeferredQueue::new();
        queue.schedule(10 * MS, Generation::ZERO.next(), 7);
        assert!(queue.pop_due(9 * MS).is_none());
        let entry = queue.pop_due(10 * MS).expect("due at 10ms");
        assert_eq!(entry.effect, 7);
        assert_eq!(entry.generation.get(), 1);
    }

    #[test]
    fn generations_are_ordered() {
        let g0 = Generation::ZERO;
        let g1 = g0.next();
        assert!(g1 > g0);
        assert_eq!(g1.get(), 1);
    }
}
