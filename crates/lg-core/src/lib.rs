//! `lg-core`: foundational types for the tile logistics network.
//!
//! This crate is a dependency of every other `lg-*` crate.  It has no `lg-*`
//! dependencies and minimal external ones (`rustc-hash` and `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `SegmentId`, `ResourceId`, `BuildingId`, `RequestId`, …   |
//! | [`pos`]     | `TilePos`, `Direction`, `DirectionMask`, `MapSize`        |
//! | [`time`]    | `Tick`                                                    |
//! | [`config`]  | `LogisticsConfig`                                         |
//! | [`queue`]   | `PriorityQueue<T>`: ordered queue with removal            |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to public value types.      |

pub mod config;
pub mod error;
pub mod ids;
pub mod pos;
pub mod queue;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::LogisticsConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{ActorId, BuildingId, RequestId, ResourceId, ResourceKind, SegmentId};
pub use pos::{Direction, DirectionMask, MapSize, TilePos};
pub use queue::PriorityQueue;
pub use time::Tick;
