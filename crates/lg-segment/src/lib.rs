//! `lg-segment`: partitioning the road network into segments.
//!
//! A segment is a maximal connected run of walkable tiles bounded by vertex
//! tiles (flags and buildings).  Each one owns a `Graph`, its vertices and
//! movement tiles, and the bookkeeping the router needs to hand resources
//! across segment boundaries.
//!
//! # Crate layout
//!
//! | Module           | Contents                                             |
//! |------------------|------------------------------------------------------|
//! | [`segment`]      | `Segment`, `SegmentIdAllocator`                      |
//! | [`segmentation`] | `Segmenter`: full rebuild and incremental update     |
//! | [`store`]        | `SegmentStore`: live segments, linking, diffs        |
//! | [`error`]        | `SegmentError`, `SegmentResult<T>`                   |
//!
//! # Update flow
//!
//! ```text
//! edits ──► Segmenter::on_tiles_updated ──► SegmentsDiff { added, deleted }
//!                                                   │
//!                                                   ▼
//!                                      SegmentStore::apply_diff
//! ```
//!
//! Segmentation only reads the store; applying the diff is the caller's
//! decision, so the router can be told about deletions in the same phase.

pub mod error;
pub mod segment;
pub mod segmentation;
pub mod store;


pub use error::{SegmentError, SegmentResult};
pub use segment::{Segment, SegmentIdAllocator};
pub use segmentation::{Segmenter, SegmentsDiff, should_segment_be_deleted};
pub use store::SegmentStore;
