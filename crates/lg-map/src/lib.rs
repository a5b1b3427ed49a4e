//! `lg-map`: the tile map the logistics core reads and the edits it reacts to.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`tile`]     | `Tile`, `TileEdit`, `TileEditKind`, `PlaceItem`           |
//! | [`building`] | `Building`, `BuildingKind`, `ResourceRequest`, `Booking`  |
//! | [`map`]      | `TileMap`: tiles, resident resources, buildings           |
//! | [`ascii`]    | `TileMap::from_ascii` and the matching `Display`          |
//! | [`error`]    | `MapError`, `MapResult<T>`                                |
//!
//! Every edit operation on `TileMap` validates placement and returns the
//! `TileEdit` that segmentation consumes.  The map itself never touches
//! segments.

pub mod ascii;
pub mod building;
pub mod error;
pub mod map;
pub mod tile;

#[cfg(test)]
mod tests;

pub use building::{Booking, BookingKind, Building, BuildingKind, ConstructionItem, ResourceRequest};
pub use error::{MapError, MapResult};
pub use map::TileMap;
pub use tile::{PlaceItem, Tile, TileEdit, TileEditKind};
