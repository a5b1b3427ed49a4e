//! `TileMap`: the rectangular world grid.
//!
//! Holds, per tile, what occupies it and which resources rest on it, plus
//! every placed building.  Tiles and residents are flat row-major `Vec`s
//! indexed through `MapSize::index`.

use std::collections::BTreeMap;

use tracing::trace;

use lg_core::{BuildingId, MapSize, RequestId, ResourceId, ResourceKind, TilePos};

use crate::{
    BookingKind, Building, BuildingKind, ConstructionItem, MapError, MapResult, PlaceItem,
    ResourceRequest, Tile, TileEdit, TileEditKind,
};

#[derive(Clone, Debug)]
pub struct TileMap {
    size:          MapSize,
    tiles:         Vec<Tile>,
    /// Resources resting on each tile, in arrival order.
    residents:     Vec<Vec<ResourceId>>,
    buildings:     BTreeMap<BuildingId, Building>,
    city_hall:     Option<BuildingId>,
    next_building: BuildingId,
    next_request:  RequestId,
}

impl TileMap {
    pub fn new(size: MapSize) -> Self {
        Self {
            size,
            tiles: vec![Tile::None; size.area()],
            residents: vec![Vec::new(); size.area()],
            buildings: BTreeMap::new(),
            city_hall: None,
            next_building: BuildingId(0),
            next_request: RequestId(0),
        }
    }

    // ── Tiles ─────────────────────────────────────────────────────────────

    pub fn size(&self) -> MapSize {
        self.size
    }

    #[inline]
    pub fn contains(&self, pos: TilePos) -> bool {
        self.size.contains(pos)
    }

    /// Tile at `pos`, or `None` outside the map.
    #[inline]
    pub fn tile(&self, pos: TilePos) -> Option<Tile> {
        self.size.index(pos).map(|i| self.tiles[i])
    }

    fn index(&self, pos: TilePos) -> MapResult<usize> {
        self.size.index(pos).ok_or(MapError::OutOfBounds(pos))
    }

    // ── Residents ─────────────────────────────────────────────────────────

    /// Resources resting on `pos` (empty outside the map).
    pub fn residents(&self, pos: TilePos) -> &[ResourceId] {
        match self.size.index(pos) {
            Some(i) => &self.residents[i],
            None => &[],
        }
    }

    pub fn add_resident(&mut self, pos: TilePos, resource: ResourceId) -> MapResult<()> {
        let i = self.index(pos)?;
        if !self.residents[i].contains(&resource) {
            self.residents[i].push(resource);
        }
        Ok(())
    }

    /// Returns `true` if the resource was resting on `pos`.
    pub fn remove_resident(&mut self, pos: TilePos, resource: ResourceId) -> bool {
        let Some(i) = self.size.index(pos) else { return false };
        let list = &mut self.residents[i];
        match list.iter().position(|r| *r == resource) {
            Some(at) => {
                list.remove(at);
                true
            }
            None => false,
        }
    }

    // ── Buildings ─────────────────────────────────────────────────────────

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(&id)
    }

    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.get_mut(&id)
    }

    pub fn building_at(&self, pos: TilePos) -> Option<&Building> {
        self.tile(pos)?.building().and_then(|id| self.buildings.get(&id))
    }

    /// Buildings in placement order.
    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.values()
    }

    pub fn city_hall(&self) -> Option<&Building> {
        self.city_hall.and_then(|id| self.buildings.get(&id))
    }

    pub fn new_request_id(&mut self) -> RequestId {
        let id = self.next_request;
        self.next_request = id.next();
        id
    }

    /// Take every building's backlog, in building order.
    pub fn drain_backlogs(&mut self) -> Vec<ResourceRequest> {
        self.buildings
            .values_mut()
            .flat_map(|b| b.backlog.drain(..))
            .collect()
    }

    /// Put a request back on its building's backlog.
    ///
    /// Returns `false` when the building no longer exists; the request is
    /// then dropped.
    pub fn push_backlog(&mut self, request: ResourceRequest) -> bool {
        match self.buildings.get_mut(&request.building) {
            Some(b) => {
                b.backlog.push(request);
                true
            }
            None => false,
        }
    }

    /// Record a resource as consumed by `building`.
    pub fn deliver(
        &mut self,
        building: BuildingId,
        resource: ResourceId,
        kind: ResourceKind,
    ) -> MapResult<()> {
        let b = self
            .buildings
            .get_mut(&building)
            .ok_or(MapError::UnknownBuilding(building))?;
        b.resources_for_construction.push(ConstructionItem { resource, kind });
        Ok(())
    }

    // ── Edits ─────────────────────────────────────────────────────────────

    /// Roads go on empty tiles only.
    pub fn place_road(&mut self, pos: TilePos) -> MapResult<TileEdit> {
        let i = self.index(pos)?;
        if self.tiles[i] != Tile::None {
            return Err(MapError::CannotPlace { pos, item: PlaceItem::Road });
        }
        self.tiles[i] = Tile::Road;
        trace!(%pos, "road placed");
        Ok(TileEdit::new(TileEditKind::RoadPlaced, pos))
    }

    /// Flags go on existing roads only.
    pub fn place_flag(&mut self, pos: TilePos) -> MapResult<TileEdit> {
        let i = self.index(pos)?;
        if self.tiles[i] != Tile::Road {
            return Err(MapError::CannotPlace { pos, item: PlaceItem::Flag });
        }
        self.tiles[i] = Tile::Flag;
        trace!(%pos, "flag placed");
        Ok(TileEdit::new(TileEditKind::FlagPlaced, pos))
    }

    /// Removing a flag leaves the road underneath.
    pub fn remove_flag(&mut self, pos: TilePos) -> MapResult<TileEdit> {
        let i = self.index(pos)?;
        if self.tiles[i] != Tile::Flag {
            return Err(MapError::CannotRemove { pos, item: PlaceItem::Flag });
        }
        self.tiles[i] = Tile::Road;
        trace!(%pos, "flag removed");
        Ok(TileEdit::new(TileEditKind::FlagRemoved, pos))
    }

    pub fn remove_road(&mut self, pos: TilePos) -> MapResult<TileEdit> {
        let i = self.index(pos)?;
        if self.tiles[i] != Tile::Road {
            return Err(MapError::CannotRemove { pos, item: PlaceItem::Road });
        }
        self.tiles[i] = Tile::None;
        trace!(%pos, "road removed");
        Ok(TileEdit::new(TileEditKind::RoadRemoved, pos))
    }

    /// Place a building on an empty tile.
    ///
    /// One `Construction` request at `priority` is queued on the building's
    /// backlog per unit in `required`.
    pub fn place_building(
        &mut self,
        pos: TilePos,
        kind: BuildingKind,
        required: &[(ResourceKind, u32)],
        priority: i32,
    ) -> MapResult<(BuildingId, TileEdit)> {
        let i = self.index(pos)?;
        if self.tiles[i] != Tile::None {
            return Err(MapError::CannotPlace { pos, item: PlaceItem::Building });
        }
        if kind == BuildingKind::CityHall {
            if let Some(hall) = self.city_hall() {
                return Err(MapError::CityHallAlreadyPlaced(hall.pos));
            }
        }

        let id = self.next_building;
        self.next_building = id.next();

        let mut building = Building::new(id, kind, pos);
        building.required = required.to_vec();
        for &(resource_kind, count) in required {
            for _ in 0..count {
                let request = ResourceRequest {
                    id: self.new_request_id(),
                    kind: resource_kind,
                    priority,
                    booking_kind: BookingKind::Construction,
                    building: id,
                };
                building.backlog.push(request);
            }
        }

        self.tiles[i] = Tile::Building(id);
        if kind == BuildingKind::CityHall {
            self.city_hall = Some(id);
        }
        self.buildings.insert(id, building);
        trace!(%pos, %id, ?kind, "building placed");
        Ok((id, TileEdit::new(TileEditKind::BuildingPlaced, pos)))
    }

    /// Remove the building at `pos`.  The city hall cannot be removed.
    pub fn remove_building(&mut self, pos: TilePos) -> MapResult<(Building, TileEdit)> {
        let i = self.index(pos)?;
        let removable = self.tiles[i]
            .building()
            .filter(|id| Some(*id) != self.city_hall);
        let Some(id) = removable else {
            return Err(MapError::CannotRemove { pos, item: PlaceItem::Building });
        };
        let building = self
            .buildings
            .remove(&id)
            .ok_or(MapError::UnknownBuilding(id))?;
        self.tiles[i] = Tile::None;
        trace!(%pos, %id, "building removed");
        Ok((building, TileEdit::new(TileEditKind::BuildingRemoved, pos)))
    }
}
