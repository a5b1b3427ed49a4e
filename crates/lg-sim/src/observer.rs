//! World observer trait for progress reporting and actor notifications.

use lg_core::{SegmentId, Tick};
use lg_router::{PathfindReport, TransitInterruption};

use crate::TickSummary;

/// Callbacks invoked by [`World::tick`][crate::World::tick] after each
/// tick's phases have run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: interruption forwarder
///
/// ```rust,ignore
/// struct Forward<'a> { actors: &'a mut ActorPool }
///
/// impl WorldObserver for Forward<'_> {
///     fn on_transit_interrupted(&mut self, _tick: Tick, i: &TransitInterruption) {
///         self.actors.forget(i.actor, i.resource);
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called at the very start of each tick, before any edit is applied.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when the tick's edits changed the live segments.
    fn on_segments_changed(&mut self, _tick: Tick, _added: &[SegmentId], _deleted: &[SegmentId]) {}

    /// Called once per resource whose route was cut while an actor held or
    /// was heading for it.
    fn on_transit_interrupted(&mut self, _tick: Tick, _interruption: &TransitInterruption) {}

    /// Called after the pathfinding pass.
    fn on_pathfind(&mut self, _tick: Tick, _report: &PathfindReport) {}

    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called once after the final tick of [`World::run`][crate::World::run].
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
