//! The `World` struct and its tick.

use tracing::{debug, info, warn};

use lg_core::{ActorId, LogisticsConfig, ResourceId, ResourceKind, SegmentId, Tick, TilePos};
use lg_map::{TileEdit, TileMap};
use lg_router::{PathfindReport, Placement, ResourceRouter, TransitInterruption};
use lg_segment::{Segment, SegmentError, SegmentStore, Segmenter};

use crate::{MapEdit, SimResult, WorldObserver};

// ── TickSummary ───────────────────────────────────────────────────────────────

/// What one tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:             Tick,
    pub edits_applied:    usize,
    pub edits_rejected:   usize,
    pub segments_added:   usize,
    pub segments_deleted: usize,
    /// Actors that must drop or forget a resource.
    pub interruptions:    Vec<TransitInterruption>,
    pub booked:           usize,
    pub unmatched:        usize,
    pub live_segments:    usize,
    pub pending_requests: usize,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// The tile map, its segments and the router, advanced one tick at a time.
///
/// Edits are queued with [`submit`][World::submit] and take effect on the
/// next tick.  Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World {
    /// Run configuration (map size, construction priority, run length, …).
    pub config: LogisticsConfig,

    /// The tick the next call to `tick` will process.
    pub(crate) clock: Tick,

    pub(crate) map: TileMap,

    /// Owns the segment id allocator; ids stay unique across ticks.
    pub(crate) segmenter: Segmenter,

    /// Live segments.  Only the segmentation phase adds or removes them.
    pub(crate) segments: SegmentStore,

    pub(crate) router: ResourceRouter,

    /// Edits waiting for the next tick, in submission order.
    pub(crate) edits: Vec<MapEdit>,
}

impl World {
    // ── Public API ────────────────────────────────────────────────────────

    pub fn now(&self) -> Tick {
        self.clock
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn segments(&self) -> &SegmentStore {
        &self.segments
    }

    pub fn router(&self) -> &ResourceRouter {
        &self.router
    }

    /// Queue an edit for the next tick.
    pub fn submit(&mut self, edit: MapEdit) {
        self.edits.push(edit);
    }

    pub fn pending_edits(&self) -> &[MapEdit] {
        &self.edits
    }

    /// Run from the current tick to `config.total_ticks`.
    pub fn run<O: WorldObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = Tick(self.config.total_ticks);
        while self.clock < end {
            self.tick(observer)?;
        }
        observer.on_run_end(self.clock);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).
    pub fn run_ticks<O: WorldObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    /// Process one tick.
    pub fn tick<O: WorldObserver>(&mut self, observer: &mut O) -> SimResult<TickSummary> {
        let now = self.clock;
        observer.on_tick_start(now);
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };

        // ── Phase 1: edits ────────────────────────────────────────────────
        let tile_edits = self.apply_edits(now, &mut summary);

        // ── Phase 2 + 3: segmentation and recovery ────────────────────────
        let mut added: Vec<SegmentId> = Vec::new();
        let mut deleted: Vec<SegmentId> = Vec::new();
        if !tile_edits.is_empty() {
            let diff = self
                .segmenter
                .on_tiles_updated(&self.map, &tile_edits, &self.segments)?;
            added = diff.added.iter().map(Segment::id).collect();
            deleted = diff.deleted.clone();

            let removed = self.segments.apply_diff(diff)?;
            #[cfg(debug_assertions)]
            self.segments.check_disjoint_edges()?;

            for mut segment in removed {
                let released = self.router.on_segment_deleted(
                    &mut segment,
                    &mut self.map,
                    &mut self.segments,
                )?;
                summary.interruptions.extend(released);
            }
        }

        // ── Phase 4: routing ──────────────────────────────────────────────
        let report = self
            .router
            .pathfind_requests_in_queue(&mut self.map, &mut self.segments)?;

        // ── Phase 5: observer ─────────────────────────────────────────────
        if !added.is_empty() || !deleted.is_empty() {
            observer.on_segments_changed(now, &added, &deleted);
        }
        for interruption in &summary.interruptions {
            observer.on_transit_interrupted(now, interruption);
        }
        observer.on_pathfind(now, &report);

        self.fill_summary(&mut summary, &added, &deleted, &report);
        self.log_summary(&summary);
        observer.on_tick_end(now, &summary);

        self.clock = now + 1;
        Ok(summary)
    }

    // ── Actor events ──────────────────────────────────────────────────────

    /// Put a new resource on the map.
    pub fn spawn_resource(&mut self, pos: TilePos, kind: ResourceKind) -> SimResult<ResourceId> {
        Ok(self.router.spawn_resource(&mut self.map, pos, kind)?)
    }

    pub fn claim_next_resource(
        &mut self,
        segment: SegmentId,
        actor: ActorId,
    ) -> SimResult<Option<ResourceId>> {
        Ok(self.router.claim_next_resource(&mut self.segments, segment, actor)?)
    }

    pub fn on_actor_started_picking_up(
        &mut self,
        resource: ResourceId,
        actor: ActorId,
    ) -> SimResult<()> {
        Ok(self.router.on_actor_started_picking_up(&mut self.map, resource, actor)?)
    }

    pub fn on_actor_placed_resource(
        &mut self,
        pos: TilePos,
        segment: Option<SegmentId>,
        resource: ResourceId,
    ) -> SimResult<Placement> {
        Ok(self.router.on_actor_placed_resource(
            &mut self.map,
            &mut self.segments,
            pos,
            segment,
            resource,
        )?)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn segment(&self, id: SegmentId) -> SimResult<&Segment> {
        Ok(self.segments.get(id).ok_or(SegmentError::UnknownSegment(id))?)
    }

    /// Shortest tile path from `from` to `to` inside one segment.
    pub fn shortest_path(
        &self,
        segment: SegmentId,
        from: TilePos,
        to: TilePos,
    ) -> SimResult<Vec<TilePos>> {
        Ok(self.segment(segment)?.graph().shortest_path(from, to)?)
    }

    /// Tiles of minimum eccentricity in a segment, where an idle
    /// transporter waits.
    pub fn segment_centers(&self, segment: SegmentId) -> SimResult<Vec<TilePos>> {
        Ok(self.segment(segment)?.graph().centers()?.to_vec())
    }

    /// Segments whose movement tiles include `pos`.
    pub fn segments_at(&self, pos: TilePos) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.has_movement_tile(pos))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn apply_edits(&mut self, now: Tick, summary: &mut TickSummary) -> Vec<TileEdit> {
        let priority = self.config.construction_priority;
        let mut tile_edits = Vec::with_capacity(self.edits.len());
        for edit in std::mem::take(&mut self.edits) {
            match edit.apply(&mut self.map, priority) {
                Ok(applied) => {
                    if let Some(building) = applied.removed {
                        let dropped = self.router.remove_requests_for(building);
                        debug!(%now, %building, dropped, "building removed, requests dropped");
                    }
                    debug!(%now, %edit, "edit applied");
                    tile_edits.push(applied.tile);
                }
                Err(err) => {
                    warn!(%now, %edit, %err, "edit rejected");
                    summary.edits_rejected += 1;
                }
            }
        }
        summary.edits_applied = tile_edits.len();
        tile_edits
    }

    fn fill_summary(
        &self,
        summary: &mut TickSummary,
        added: &[SegmentId],
        deleted: &[SegmentId],
        report: &PathfindReport,
    ) {
        summary.segments_added = added.len();
        summary.segments_deleted = deleted.len();
        summary.booked = report.booked.len();
        summary.unmatched = report.unmatched;
        summary.live_segments = self.segments.len();
        summary.pending_requests = self.router.pending_count();
    }

    fn log_summary(&self, s: &TickSummary) {
        let every = self.config.log_every_ticks;
        if every > 0 && s.tick.0.is_multiple_of(every) {
            info!(
                tick = %s.tick,
                segments = s.live_segments,
                booked = s.booked,
                pending = s.pending_requests,
                resources = self.router.resources().len(),
                "tick summary"
            );
        } else {
            debug!(
                tick = %s.tick,
                edits = s.edits_applied,
                added = s.segments_added,
                deleted = s.segments_deleted,
                booked = s.booked,
                "tick done"
            );
        }
    }
}
