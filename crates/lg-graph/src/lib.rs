//! `lg-graph`: tile connectivity graph of a single segment.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`graph`]  | `Graph` (growable mask grid), `GraphExtent`                   |
//! | [`paths`]  | `PathIndex`: Floyd–Warshall distances, predecessors, centers  |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                                |
//!
//! A `Graph` stores one `DirectionMask` per tile: bit `d` set at `p` means
//! the directed edge `p → p.step(d)` exists.  Segmentation always sets both
//! directions of an edge, so segment graphs are undirected.
//!
//! The path index is derived data.  It is computed on first query (or
//! eagerly via [`Graph::path_index`]) and dropped whenever a bit changes.

pub mod error;
pub mod graph;
pub mod paths;


pub use error::{GraphError, GraphResult};
pub use graph::{Graph, GraphExtent};
pub use paths::PathIndex;
