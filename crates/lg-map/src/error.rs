//! Map error type.

use thiserror::Error;

use lg_core::{BuildingId, CoreError, TilePos};

use crate::PlaceItem;

/// Errors produced by `lg-map`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("{0} is outside the map")]
    OutOfBounds(TilePos),

    #[error("cannot place {item} at {pos}")]
    CannotPlace { pos: TilePos, item: PlaceItem },

    #[error("no {item} to remove at {pos}")]
    CannotRemove { pos: TilePos, item: PlaceItem },

    #[error("building {0} not found")]
    UnknownBuilding(BuildingId),

    #[error("map parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("a city hall is already placed at {0}")]
    CityHallAlreadyPlaced(TilePos),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type MapResult<T> = Result<T, MapError>;
