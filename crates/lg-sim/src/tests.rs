//! Integration tests for lg-sim.

use lg_core::{LogisticsConfig, ResourceKind, SegmentId, Tick, TilePos};
use lg_map::TileMap;
use lg_router::{PathfindReport, TransitInterruption};

use crate::{TickSummary, World, WorldBuilder, WorldObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

const PLANK: ResourceKind = ResourceKind(1);

fn p(x: i32, y: i32) -> TilePos {
    TilePos::new(x, y)
}

fn config_for(map: &TileMap) -> LogisticsConfig {
    LogisticsConfig {
        width: map.size().width,
        height: map.size().height,
        total_ticks: 5,
        log_every_ticks: 0,
        ..LogisticsConfig::default()
    }
}

fn world(rows: &[&str]) -> World {
    let map = TileMap::from_ascii(rows).expect("valid map fixture");
    WorldBuilder::new(config_for(&map)).map(map).build().expect("world builds")
}

/// Records every callback for later inspection.
#[derive(Default)]
struct Recorder {
    starts:        Vec<Tick>,
    changes:       Vec<(Vec<SegmentId>, Vec<SegmentId>)>,
    interruptions: Vec<TransitInterruption>,
    reports:       Vec<PathfindReport>,
    summaries:     Vec<TickSummary>,
    ended:         Option<Tick>,
}

impl WorldObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_segments_changed(&mut self, _tick: Tick, added: &[SegmentId], deleted: &[SegmentId]) {
        self.changes.push((added.to_vec(), deleted.to_vec()));
    }

    fn on_transit_interrupted(&mut self, _tick: Tick, interruption: &TransitInterruption) {
        self.interruptions.push(*interruption);
    }

    fn on_pathfind(&mut self, _tick: Tick, report: &PathfindReport) {
        self.reports.push(report.clone());
    }

    fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
        self.summaries.push(summary.clone());
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── WorldBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn empty_world_has_no_segments() {
        let config = LogisticsConfig { width: 4, height: 3, ..LogisticsConfig::default() };
        let w = WorldBuilder::new(config).build().unwrap();
        assert_eq!(w.map().size().area(), 12);
        assert!(w.segments().is_empty());
        assert_eq!(w.now(), Tick::ZERO);
    }

    #[test]
    fn initial_map_is_segmented() {
        let w = world(&["CrFrB"]);
        assert_eq!(w.segments().len(), 2);
    }

    #[test]
    fn map_size_must_match_config() {
        let map = TileMap::from_ascii(&["CrrB"]).unwrap();
        let config = LogisticsConfig { width: 5, height: 1, ..LogisticsConfig::default() };
        let err = WorldBuilder::new(config).map(map).build().err().unwrap();
        assert!(matches!(err, SimError::SizeMismatch { .. }));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = LogisticsConfig { width: 0, ..LogisticsConfig::default() };
        let err = WorldBuilder::new(config).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }
}

// ── Tick phases ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use lg_core::ActorId;
    use lg_map::BuildingKind;
    use lg_router::{ActorRole, Placement};

    use super::*;
    use crate::{MapEdit, NoopObserver};

    const ACTOR: ActorId = ActorId(1);

    /// Road and construction site built by edits on a map holding only the
    /// city hall.
    fn straight_road_world() -> World {
        let mut w = world(&["C....."]);
        for x in 1..=4 {
            w.submit(MapEdit::PlaceRoad(p(x, 0)));
        }
        w.submit(MapEdit::PlaceBuilding {
            pos:      p(5, 0),
            kind:     BuildingKind::Produce,
            required: vec![(PLANK, 1)],
        });
        w
    }

    #[test]
    fn straight_road_end_to_end() {
        let mut w = straight_road_world();
        let res = w.spawn_resource(p(0, 0), PLANK).unwrap();
        let mut rec = Recorder::default();

        let summary = w.tick(&mut rec).unwrap();
        assert_eq!(summary.edits_applied, 5);
        assert_eq!(summary.segments_added, 1);
        assert_eq!(summary.booked, 1);
        assert_eq!(summary.pending_requests, 0);
        assert_eq!(rec.changes.len(), 1);
        assert_eq!(w.now(), Tick(1));

        let seg = w.segments().ids().next().unwrap();
        assert_eq!(w.segment_centers(seg).unwrap(), vec![p(2, 0), p(3, 0)]);
        let path = w.shortest_path(seg, p(0, 0), p(5, 0)).unwrap();
        assert_eq!(path.len(), 6);

        assert_eq!(w.claim_next_resource(seg, ACTOR).unwrap(), Some(res));
        w.on_actor_started_picking_up(res, ACTOR).unwrap();
        let placed = w.on_actor_placed_resource(p(5, 0), Some(seg), res).unwrap();

        let site = w.map().building_at(p(5, 0)).unwrap();
        assert_eq!(placed, Placement::Delivered { building: site.id });
        assert!(site.is_construction_complete());
        assert!(w.router().resources().is_empty());

        // Nothing left to do.
        let summary = w.tick(&mut NoopObserver).unwrap();
        assert_eq!((summary.edits_applied, summary.booked), (0, 0));
    }

    #[test]
    fn flag_on_the_route_reroutes_the_claimed_resource() {
        let mut w = straight_road_world();
        let res = w.spawn_resource(p(0, 0), PLANK).unwrap();
        w.tick(&mut NoopObserver).unwrap();
        let seg = w.segments().ids().next().unwrap();
        w.claim_next_resource(seg, ACTOR).unwrap();

        w.submit(MapEdit::PlaceFlag(p(2, 0)));
        let mut rec = Recorder::default();
        let summary = w.tick(&mut rec).unwrap();

        assert_eq!(summary.segments_deleted, 1);
        assert_eq!(summary.segments_added, 2);
        assert_eq!(rec.interruptions.len(), 1);
        assert_eq!(rec.interruptions[0].role, ActorRole::Targeter);
        assert_eq!(rec.interruptions[0].actor, ACTOR);
        assert_eq!(summary.interruptions, rec.interruptions);

        // Rebooked in the same tick over the two new segments.
        assert_eq!(summary.booked, 1);
        let legs = &w.router().resource(res).unwrap().legs;
        assert_eq!(legs.iter().map(|l| l.waypoint).collect::<Vec<_>>(), vec![p(2, 0), p(5, 0)]);
        assert!(w.segments().get(seg).is_none());
    }

    #[test]
    fn rejected_edits_are_counted_and_skipped() {
        let mut w = world(&["CrrB"]);
        w.submit(MapEdit::PlaceFlag(p(0, 0)));
        w.submit(MapEdit::RemoveRoad(p(3, 0)));
        w.submit(MapEdit::PlaceFlag(p(1, 0)));
        let summary = w.tick(&mut NoopObserver).unwrap();
        assert_eq!(summary.edits_rejected, 2);
        assert_eq!(summary.edits_applied, 1);
        assert_eq!(w.segments().len(), 2);
        assert!(w.pending_edits().is_empty());
    }

    #[test]
    fn removing_a_site_drops_its_requests() {
        let mut w = world(&["Crr."]);
        w.submit(MapEdit::PlaceBuilding {
            pos:      p(3, 0),
            kind:     BuildingKind::Produce,
            required: vec![(PLANK, 2)],
        });
        let summary = w.tick(&mut NoopObserver).unwrap();
        assert_eq!(summary.unmatched, 2);
        assert_eq!(summary.pending_requests, 2);

        w.submit(MapEdit::RemoveBuilding(p(3, 0)));
        let summary = w.tick(&mut NoopObserver).unwrap();
        assert_eq!(summary.pending_requests, 0);
        assert!(w.segments().is_empty());
    }

    #[test]
    fn segments_at_a_tile() {
        let w = world(&["CrFrB"]);
        assert_eq!(w.segments_at(p(2, 0)).count(), 2);
        assert_eq!(w.segments_at(p(1, 0)).count(), 1);
        assert_eq!(w.segments_at(p(9, 9)).count(), 0);
    }

    #[test]
    fn unknown_segment_queries_fail() {
        let w = world(&["CrrB"]);
        assert!(w.segment_centers(SegmentId(77)).is_err());
        assert!(w.shortest_path(SegmentId(77), p(0, 0), p(3, 0)).is_err());
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_stops_at_total_ticks() {
        let mut w = world(&["CrrB"]);
        let mut rec = Recorder::default();
        w.run(&mut rec).unwrap();
        assert_eq!(rec.starts, (0..5).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.summaries.len(), 5);
        assert_eq!(rec.reports.len(), 5);
        assert_eq!(rec.ended, Some(Tick(5)));
        assert!(rec.changes.is_empty());
    }

    #[test]
    fn run_ticks_ignores_total_ticks() {
        let mut w = world(&["CrrB"]);
        let mut rec = Recorder::default();
        w.run_ticks(8, &mut rec).unwrap();
        assert_eq!(w.now(), Tick(8));
        assert_eq!(rec.ended, None);
    }
}
