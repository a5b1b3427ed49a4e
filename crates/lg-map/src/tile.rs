//! Tile contents and the edit events produced when they change.

use std::fmt;

use lg_core::{BuildingId, TilePos};

/// What occupies one map tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    None,
    Road,
    /// A router tile: always terminates a segment and seeds its neighbours.
    Flag,
    Building(BuildingId),
}

impl Tile {
    /// Tiles that terminate a segment: flags and buildings.
    #[inline]
    pub fn is_vertex(self) -> bool {
        matches!(self, Tile::Flag | Tile::Building(_))
    }

    #[inline]
    pub fn is_walkable(self) -> bool {
        !matches!(self, Tile::None)
    }

    #[inline]
    pub fn is_building(self) -> bool {
        matches!(self, Tile::Building(_))
    }

    pub fn building(self) -> Option<BuildingId> {
        match self {
            Tile::Building(id) => Some(id),
            _ => None,
        }
    }
}

/// The kind of thing being placed or removed, for validation errors.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaceItem {
    Road,
    Flag,
    Building,
}

impl fmt::Display for PlaceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaceItem::Road     => "road",
            PlaceItem::Flag     => "flag",
            PlaceItem::Building => "building",
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileEditKind {
    RoadPlaced,
    FlagPlaced,
    FlagRemoved,
    RoadRemoved,
    BuildingPlaced,
    BuildingRemoved,
}

impl TileEditKind {
    /// Edits that make a previously empty tile walkable.  Segments adjacent
    /// to such a tile may gain a connection and must be rebuilt.
    #[inline]
    pub fn connects_neighbours(self) -> bool {
        matches!(self, TileEditKind::RoadPlaced | TileEditKind::BuildingPlaced)
    }
}

/// One change to the map, reported to segmentation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileEdit {
    pub kind: TileEditKind,
    pub pos:  TilePos,
}

impl TileEdit {
    pub const fn new(kind: TileEditKind, pos: TilePos) -> Self {
        Self { kind, pos }
    }
}

impl fmt::Display for TileEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {}", self.kind, self.pos)
    }
}
