#![forbid(unsafe_code)]

//! Activation sequencer: the zoom state machine.
//!
//! # States
//!
//! - **Idle**: no item is zoomed.
//! - **Zoomed**: exactly one item is zoomed.
//!
//! # Transitions
//!
//! `trigger(item)`:
//! 1. If the grid geometry disables zoom, nothing happens.
//! 2. Every item is deactivated synchronously (zoom classes removed,
//!    transform reset). Items other than the target get their trigger
//!    control marked not-expanded and a deferred `z-index` reset.
//! 3. If the target is the zoomed item, the zoom collapses: state returns to
//!    Idle and focus goes back to the target's control.
//! 4. Otherwise the target's `transform-origin` is written now, and the rest
//!    of the zoom (raise, classes, scale, expanded) is deferred by the
//!    animation timeout. The state becomes Zoomed when that effect runs.
//!
//! `resize()`: every item is deactivated, pending activations are abandoned,
//! and the state returns to Idle without moving focus.
//!
//! # Invariants
//!
//! 1. At most one item carries the zoomed flag at any observable time.
//! 2. Within one transition all synchronous writes precede any deferred
//!    write.
//! 3. A deferred activation applies only if no transition happened since it
//!    was queued (generation check).
//! 4. A deferred `z-index` reset never lowers an item that a newer
//!    transition has zoomed.

use std::time::Duration;

use gridzoom_layout::{GridGeometry, ZoomTransform, compute_transform};
use tracing::{debug, trace};

use crate::deferred::{DeferredQueue, Generation};
use crate::provider::{DomCommand, ItemTransform, LayoutProvider};
use crate::zoom_state::ZoomState;

/// Timing and stacking parameters resolved at controller construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerTiming {
    /// Delay before deferred visual writes (the animation timeout).
    pub timeout: Duration,
    /// Zoom scale factor.
    pub scale_factor: f64,
    /// `z-index` of the zoomed item.
    pub raised_z_index: i32,
    /// `z-index` items settle back to.
    pub baseline_z_index: i32,
}

impl Default for SequencerTiming {
    fn default() -> Self {
        Self {
            timeout: Duration::ZERO,
            scale_factor: 1.5,
            raised_z_index: 100,
            baseline_z_index: 0,
        }
    }
}

/// Observable sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Zoomed { item: usize },
}

/// Visual write waiting for the animation timeout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredEffect {
    /// Lower a deactivated item back to the baseline stacking order.
    ResetZIndex { item: usize },
    /// Finish zooming `item`.
    Activate { item: usize, transform: ZoomTransform },
}

/// Result of one [`ActivationSequencer::trigger`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerOutcome {
    /// The item index is outside the grid.
    OutOfRange,
    /// The grid geometry disables zoom (single column or single row).
    Disabled,
    /// The zoomed item was triggered again and collapsed.
    Collapsed { item: usize },
    /// Activation of `item` is queued for `due`.
    Scheduled {
        item: usize,
        transform: ZoomTransform,
        due: Duration,
    },
}

/// Zoom state machine for one grid.
#[derive(Debug, Clone)]
pub struct ActivationSequencer {
    timing: SequencerTiming,
    zoom: ZoomState,
    generation: Generation,
    deferred: DeferredQueue<DeferredEffect>,
}

impl ActivationSequencer {
    #[must_use]
    pub fn new(timing: SequencerTiming) -> Self {
        Self {
            timing,
            zoom: ZoomState::new(),
            generation: Generation::ZERO,
            deferred: DeferredQueue::new(),
        }
    }

    #[must_use]
    pub const fn timing(&self) -> SequencerTiming {
        self.timing
    }

    #[must_use]
    pub fn state(&self) -> SequencerState {
        match self.zoom.current() {
            Some(item) => SequencerState::Zoomed { item },
            None => SequencerState::Idle,
        }
    }

    #[must_use]
    pub const fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    /// Generation of the latest transition.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Earliest pending deferred write.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.deferred.next_deadline()
    }

    /// Number of queued deferred writes (stale ones included).
    #[must_use]
    pub fn pending(&self) -> usize {
        self.deferred.len()
    }

    /// Handle activation of `item`'s trigger control.
    pub fn trigger<P>(
        &mut self,
        provider: &mut P,
        geometry: &GridGeometry,
        item: usize,
        now: Duration,
    ) -> TriggerOutcome
    where
        P: LayoutProvider + ?Sized,
    {
        let item_count = provider.item_count();
        if item >= item_count {
            return TriggerOutcome::OutOfRange;
        }
        let Some(transform) =
            compute_transform(item, geometry, item_count, self.timing.scale_factor)
        else {
            debug!(
                target: "gridzoom.sequencer",
                item,
                columns = ?geometry.columns(),
                item_count,
                "zoom disabled for grid geometry"
            );
            return TriggerOutcome::Disabled;
        };

        self.generation = self.generation.next();
        self.deactivate_all(provider, Some(item), now);

        if self.zoom.current() == Some(item) {
            self.zoom.clear();
            provider.apply(DomCommand::SetExpanded {
                item,
                expanded: false,
            });
            provider.apply(DomCommand::Focus { item });
            debug!(
                target: "gridzoom.sequencer",
                item,
                generation = self.generation.get(),
                "zoom collapsed"
            );
            return TriggerOutcome::Collapsed { item };
        }

        // The previous item is already visually deactivated.
        self.zoom.clear();
        provider.apply(DomCommand::SetTransformOrigin {
            item,
            origin: transform.origin,
        });
        let due = now.saturating_add(self.timing.timeout);
        self.deferred.schedule(
            due,
            self.generation,
            DeferredEffect::Activate { item, transform },
        );
        debug!(
            target: "gridzoom.sequencer",
            item,
            origin = %transform.origin,
            scale = transform.scale,
            generation = self.generation.get(),
            due_ms = due.as_millis() as u64,
            "zoom scheduled"
        );
        TriggerOutcome::Scheduled {
            item,
            transform,
            due,
        }
    }

    /// Clear the active item without restoring focus.
    ///
    /// Used by keyboard navigation right before activating a sibling.
    pub fn release(&mut self) -> Option<usize> {
        self.zoom.clear().map(|active| active.item)
    }

    /// Abandon any zoom: deactivate every item and return to Idle.
    pub fn reset<P>(&mut self, provider: &mut P, now: Duration)
    where
        P: LayoutProvider + ?Sized,
    {
        self.generation = self.generation.next();
        let released = self.zoom.clear();
        self.deactivate_all(provider, None, now);
        debug!(
            target: "gridzoom.sequencer",
            released = ?released.map(|active| active.item),
            generation = self.generation.get(),
            "zoom reset"
        );
    }

    /// Run every deferred write due at `now`. Returns how many were applied.
    pub fn tick<P>(&mut self, provider: &mut P, now: Duration) -> usize
    where
        P: LayoutProvider + ?Sized,
    {
        let mut applied = 0;
        while let Some(entry) = self.deferred.pop_due(now) {
            match entry.effect {
                DeferredEffect::ResetZIndex { item } => {
                    let rezoomed = self
                        .zoom
                        .active()
                        .is_some_and(|a| a.item == item && a.generation > entry.generation);
                    if rezoomed {
                        trace!(target: "gridzoom.sequencer", item, "z-index reset skipped");
                        continue;
                    }
                    provider.apply(DomCommand::SetZIndex {
                        item,
                        z_index: self.timing.baseline_z_index,
                    });
                }
                DeferredEffect::Activate { item, transform } => {
                    if entry.generation != self.generation {
                        trace!(
                            target: "gridzoom.sequencer",
                            item,
                            queued = entry.generation.get(),
                            current = self.generation.get(),
                            "stale activation dropped"
                        );
                        continue;
                    }
                    provider.apply(DomCommand::SetZIndex {
                        item,
                        z_index: self.timing.raised_z_index,
                    });
                    provider.apply(DomCommand::SetGridZoomed { zoomed: true });
                    provider.apply(DomCommand::SetItemZoomed { item, zoomed: true });
                    provider.apply(DomCommand::SetTransform {
                        item,
                        transform: ItemTransform::Scale(transform.scale),
                    });
                    provider.apply(DomCommand::SetExpanded {
                        item,
                        expanded: true,
                    });
                    self.zoom.activate(item, entry.generation);
                    debug!(target: "gridzoom.sequencer", item, "zoom applied");
                }
            }
            applied += 1;
        }
        applied
    }

    fn deactivate_all<P>(&mut self, provider: &mut P, target: Option<usize>, now: Duration)
    where
        P: LayoutProvider + ?Sized,
    {
        provider.apply(DomCommand::SetGridZoomed { zoomed: false });
        let due = now.saturating_add(self.timing.timeout);
        for item in 0..provider.item_count() {
            provider.apply(DomCommand::SetItemZoomed {
                item,
                zoomed: false,
            });
            provider.apply(DomCommand::SetTransform {
                item,
                transform: ItemTransform::None,
            });
            if Some(item) == target {
                continue;
            }
            if target.is_some() {
                provider.apply(DomCommand::SetExpanded {
                    item,
                    expanded: false,
                });
            }
            self.deferred
                .schedule(due, self.generation, DeferredEffect::ResetZIndex { item });
        }
    }
}
