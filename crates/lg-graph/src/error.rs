//! Graph error type.

use thiserror::Error;

use lg_core::TilePos;

/// Errors produced by `lg-graph`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph has no nodes")]
    Empty,

    #[error("{0} is not a node of this graph")]
    NotANode(TilePos),

    #[error("no path from {from} to {to}")]
    Unreachable { from: TilePos, to: TilePos },

    /// The predecessor chain did not reach the origin within `steps`
    /// steps; the graph's path data is inconsistent.
    #[error("path walk from {from} to {to} exhausted after {steps} steps")]
    SearchExhausted { from: TilePos, to: TilePos, steps: usize },

    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    InvalidGlyph { glyph: char, row: usize, col: usize },

    #[error("rows have unequal widths in graph fixture")]
    RaggedRows,
}

pub type GraphResult<T> = Result<T, GraphError>;
