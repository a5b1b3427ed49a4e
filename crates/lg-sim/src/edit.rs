//! Map edits queued on the world and applied at the start of a tick.

use std::fmt;

use lg_core::{BuildingId, ResourceKind, TilePos};
use lg_map::{BuildingKind, MapResult, TileEdit, TileMap};

/// A player-level change to the map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapEdit {
    PlaceRoad(TilePos),
    PlaceFlag(TilePos),
    RemoveFlag(TilePos),
    RemoveRoad(TilePos),
    /// Place a building that needs `required` resources to be constructed.
    PlaceBuilding {
        pos:      TilePos,
        kind:     BuildingKind,
        required: Vec<(ResourceKind, u32)>,
    },
    RemoveBuilding(TilePos),
}

/// What applying a `MapEdit` did to the map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedEdit {
    pub tile:    TileEdit,
    /// Set by `PlaceBuilding`.
    pub placed:  Option<BuildingId>,
    /// Set by `RemoveBuilding`.
    pub removed: Option<BuildingId>,
}

impl AppliedEdit {
    fn from_tile(tile: TileEdit) -> Self {
        Self { tile, placed: None, removed: None }
    }
}

impl MapEdit {
    pub fn pos(&self) -> TilePos {
        match *self {
            MapEdit::PlaceRoad(pos)
            | MapEdit::PlaceFlag(pos)
            | MapEdit::RemoveFlag(pos)
            | MapEdit::RemoveRoad(pos)
            | MapEdit::RemoveBuilding(pos) => pos,
            MapEdit::PlaceBuilding { pos, .. } => pos,
        }
    }

    /// Apply to `map`.  New buildings publish their construction requests
    /// at `priority`.
    pub fn apply(&self, map: &mut TileMap, priority: i32) -> MapResult<AppliedEdit> {
        Ok(match self {
            MapEdit::PlaceRoad(pos) => AppliedEdit::from_tile(map.place_road(*pos)?),
            MapEdit::PlaceFlag(pos) => AppliedEdit::from_tile(map.place_flag(*pos)?),
            MapEdit::RemoveFlag(pos) => AppliedEdit::from_tile(map.remove_flag(*pos)?),
            MapEdit::RemoveRoad(pos) => AppliedEdit::from_tile(map.remove_road(*pos)?),
            MapEdit::PlaceBuilding { pos, kind, required } => {
                let (id, tile) = map.place_building(*pos, *kind, required, priority)?;
                AppliedEdit { tile, placed: Some(id), removed: None }
            }
            MapEdit::RemoveBuilding(pos) => {
                let (building, tile) = map.remove_building(*pos)?;
                AppliedEdit { tile, placed: None, removed: Some(building.id) }
            }
        })
    }
}

impl fmt::Display for MapEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapEdit::PlaceRoad(pos) => write!(f, "place road at {pos}"),
            MapEdit::PlaceFlag(pos) => write!(f, "place flag at {pos}"),
            MapEdit::RemoveFlag(pos) => write!(f, "remove flag at {pos}"),
            MapEdit::RemoveRoad(pos) => write!(f, "remove road at {pos}"),
            MapEdit::PlaceBuilding { pos, kind, .. } => write!(f, "place {kind:?} at {pos}"),
            MapEdit::RemoveBuilding(pos) => write!(f, "remove building at {pos}"),
        }
    }
}
