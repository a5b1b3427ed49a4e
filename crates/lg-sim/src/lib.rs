//! `lg-sim`: tick orchestrator for the tile logistics network.
//!
//! # Tick phases
//!
//! ```text
//! World::tick:
//!   ① Edits       : apply queued MapEdits to the TileMap; rejected edits
//!                    are logged and counted.
//!   ② Segmentation: Segmenter::on_tiles_updated → SegmentsDiff, applied to
//!                    the SegmentStore (unlink deleted, link added).
//!   ③ Recovery    : ResourceRouter::on_segment_deleted for every removed
//!                    segment; bookings go back to building backlogs.
//!   ④ Routing     : ResourceRouter::pathfind_requests_in_queue.
//!   ⑤ Observer    : segment diff, transit interruptions, pathfind report,
//!                    tick summary.
//! ```
//!
//! Actor logic lives outside the world.  It calls the forwarding methods
//! (`claim_next_resource`, `on_actor_started_picking_up`,
//! `on_actor_placed_resource`) between ticks and reacts to the
//! `TransitInterruption`s reported in each `TickSummary`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lg_core::LogisticsConfig;
//! use lg_map::TileMap;
//! use lg_sim::{NoopObserver, WorldBuilder};
//!
//! let map = TileMap::from_ascii(&["CrrrrB"])?;
//! let config = LogisticsConfig { width: 6, height: 1, ..Default::default() };
//! let mut world = WorldBuilder::new(config).map(map).build()?;
//! world.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod edit;
pub mod error;
pub mod observer;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use edit::{AppliedEdit, MapEdit};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, WorldObserver};
pub use world::{TickSummary, World};
