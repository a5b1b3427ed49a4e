//! Segment error type.

use thiserror::Error;

use lg_core::{Direction, SegmentId, TilePos};
use lg_graph::GraphError;

/// Errors produced by `lg-segment`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("vertex {0} listed twice")]
    DuplicateVertex(TilePos),

    #[error("movement tile {0} listed twice")]
    DuplicateMovementTile(TilePos),

    #[error("a segment needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("the map has no city hall to seed segmentation from")]
    MissingCityHall,

    #[error("segment {0} not found")]
    UnknownSegment(SegmentId),

    #[error("edge {pos} → {dir} is owned by both {first} and {second}")]
    SharedEdge {
        pos:    TilePos,
        dir:    Direction,
        first:  SegmentId,
        second: SegmentId,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type SegmentResult<T> = Result<T, SegmentError>;
