//! Foundation error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::{MapSize, TilePos};

/// The error type for `lg-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("position {pos} is outside the {size} map")]
    OutOfBounds { pos: TilePos, size: MapSize },

    #[error("tiles {a} and {b} are not adjacent")]
    NotAdjacent { a: TilePos, b: TilePos },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `lg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
