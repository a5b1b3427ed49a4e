//! straight_road: smallest example for the logistics network.
//!
//! A city hall on the left edge of the map, a construction site on the
//! right edge and one road between them.  Planks stacked at the city hall
//! are carried to the site by one transporter per segment.  Halfway through
//! a flag is placed on the road, splitting it into two segments, so the
//! in-flight booking is interrupted and routed again.
//!
//! Pass a JSON config path as the first argument to override the defaults:
//!
//! ```text
//! cargo run -p straight_road -- config.json
//! RUST_LOG=debug cargo run -p straight_road
//! ```

mod crew;

use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lg_core::{LogisticsConfig, ResourceKind, SegmentId, Tick, TilePos};
use lg_map::BuildingKind;
use lg_router::{Placement, TransitInterruption};
use lg_sim::{MapEdit, TickSummary, WorldBuilder, WorldObserver};

use crew::Crew;

// ── Constants ─────────────────────────────────────────────────────────────────

const PLANK:       ResourceKind = ResourceKind(1);
const PLANKS:      u32          = 3;
const FLAG_TICK:   u64          = 6;  // tick at which the road is split
const MAP_WIDTH:   u32          = 12;
const MAP_HEIGHT:  u32          = 3;
const TOTAL_TICKS: u64          = 200;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct DemoObserver {
    segment_changes: usize,
    interruptions:   usize,
    booked:          usize,
}

impl WorldObserver for DemoObserver {
    fn on_segments_changed(&mut self, tick: Tick, added: &[SegmentId], deleted: &[SegmentId]) {
        self.segment_changes += 1;
        info!(%tick, added = added.len(), deleted = deleted.len(), "segments changed");
    }

    fn on_transit_interrupted(&mut self, tick: Tick, interruption: &TransitInterruption) {
        self.interruptions += 1;
        info!(
            %tick,
            resource = %interruption.resource,
            actor = %interruption.actor,
            role = ?interruption.role,
            "transit interrupted"
        );
    }

    fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
        self.booked += summary.booked;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config()?;
    if config.width < 3 {
        bail!("map must be at least 3 tiles wide, got {}", config.width);
    }
    let size = config.map_size();
    let row = (size.height / 2) as i32;
    let hall = TilePos::new(0, row);
    let site = TilePos::new(size.width as i32 - 1, row);

    println!("=== straight_road ===");
    println!("  map   : {size}");
    println!("  road  : {hall} -> {site}");
    println!("  cargo : {PLANKS} planks");

    let mut world = WorldBuilder::new(config.clone()).build()?;
    world.submit(MapEdit::PlaceBuilding { pos: hall, kind: BuildingKind::CityHall, required: vec![] });
    for x in 1..site.x {
        world.submit(MapEdit::PlaceRoad(TilePos::new(x, row)));
    }
    world.submit(MapEdit::PlaceBuilding {
        pos:      site,
        kind:     BuildingKind::Produce,
        required: vec![(PLANK, PLANKS)],
    });
    for _ in 0..PLANKS {
        world.spawn_resource(hall, PLANK)?;
    }

    let mut observer = DemoObserver::default();
    let mut crew = Crew::default();
    let mut delivered = 0u32;
    let t0 = Instant::now();

    while world.now() < Tick(config.total_ticks) {
        if world.now() == Tick(FLAG_TICK) {
            world.submit(MapEdit::PlaceFlag(TilePos::new(site.x / 2, row)));
        }
        let summary = world.tick(&mut observer)?;
        crew.sync(&mut world, &summary)?;
        for placed in crew.step(&mut world)? {
            if let Placement::Delivered { building } = placed {
                delivered += 1;
                info!(tick = %summary.tick, %building, delivered, "plank delivered");
            }
        }

        let done = world
            .map()
            .building_at(site)
            .context("construction site is on the map")?
            .is_construction_complete();
        if done {
            break;
        }
    }

    println!();
    println!("=== done in {:.2?} ===", t0.elapsed());
    println!("  ticks           : {}", world.now());
    println!("  delivered       : {delivered}/{PLANKS}");
    println!("  segment changes : {}", observer.segment_changes);
    println!("  bookings        : {}", observer.booked);
    println!("  interruptions   : {}", observer.interruptions);
    println!("  transporters    : {}", crew.headcount());
    Ok(())
}

/// Defaults, optionally overridden by a JSON file named on the command line.
fn load_config() -> Result<LogisticsConfig> {
    let defaults = LogisticsConfig {
        width:           MAP_WIDTH,
        height:          MAP_HEIGHT,
        total_ticks:     TOTAL_TICKS,
        log_every_ticks: 0,
        ..LogisticsConfig::default()
    };
    let Some(path) = std::env::args().nth(1) else {
        return Ok(defaults);
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: LogisticsConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}
