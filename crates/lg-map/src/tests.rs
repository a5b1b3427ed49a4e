//! Unit tests for lg-map.

#[cfg(test)]
mod helpers {
    use lg_core::TilePos;

    pub fn p(x: i32, y: i32) -> TilePos {
        TilePos::new(x, y)
    }
}

// ── ASCII fixtures ────────────────────────────────────────────────────────────

#[cfg(test)]
mod ascii {
    use super::helpers::p;
    use crate::{BuildingKind, MapError, Tile, TileMap};

    #[test]
    fn parses_bottom_row_as_y_zero() {
        let map = TileMap::from_ascii(&["CFr", "..."]).unwrap();
        assert_eq!(map.size().width, 3);
        assert_eq!(map.size().height, 2);
        assert!(matches!(map.tile(p(0, 1)), Some(Tile::Building(_))));
        assert_eq!(map.tile(p(1, 1)), Some(Tile::Flag));
        assert_eq!(map.tile(p(2, 1)), Some(Tile::Road));
        assert_eq!(map.tile(p(0, 0)), Some(Tile::None));
        assert_eq!(map.tile(p(3, 0)), None);
    }

    #[test]
    fn city_hall_is_registered() {
        let map = TileMap::from_ascii(&["CrrB"]).unwrap();
        let hall = map.city_hall().unwrap();
        assert_eq!(hall.pos, p(0, 0));
        assert_eq!(hall.kind, BuildingKind::CityHall);
        assert_eq!(map.building_at(p(3, 0)).unwrap().kind, BuildingKind::Produce);
        assert_eq!(map.buildings().count(), 2);
    }

    #[test]
    fn display_roundtrip() {
        let rows = ["CrF.", ".BrB"];
        let map = TileMap::from_ascii(&rows).unwrap();
        assert_eq!(map.to_string(), rows.join("\n"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            TileMap::from_ascii(&["Crx"]),
            Err(MapError::Parse { line: 0, .. })
        ));
        assert!(matches!(
            TileMap::from_ascii(&["Cr", "r"]),
            Err(MapError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            TileMap::from_ascii(&["CrC"]),
            Err(MapError::CityHallAlreadyPlaced(_))
        ));
    }
}

// ── Placement rules ───────────────────────────────────────────────────────────

#[cfg(test)]
mod edits {
    use lg_core::{MapSize, ResourceKind};

    use super::helpers::p;
    use crate::{BookingKind, BuildingKind, MapError, PlaceItem, Tile, TileEditKind, TileMap};

    #[test]
    fn road_then_flag_then_back() {
        let mut map = TileMap::new(MapSize::new(3, 1));
        let e = map.place_road(p(1, 0)).unwrap();
        assert_eq!(e.kind, TileEditKind::RoadPlaced);
        let e = map.place_flag(p(1, 0)).unwrap();
        assert_eq!(e.kind, TileEditKind::FlagPlaced);
        let e = map.remove_flag(p(1, 0)).unwrap();
        assert_eq!(e.kind, TileEditKind::FlagRemoved);
        assert_eq!(map.tile(p(1, 0)), Some(Tile::Road));
        let e = map.remove_road(p(1, 0)).unwrap();
        assert_eq!(e.kind, TileEditKind::RoadRemoved);
        assert_eq!(map.tile(p(1, 0)), Some(Tile::None));
    }

    #[test]
    fn flags_need_a_road() {
        let mut map = TileMap::new(MapSize::new(2, 1));
        assert_eq!(
            map.place_flag(p(0, 0)),
            Err(MapError::CannotPlace { pos: p(0, 0), item: PlaceItem::Flag })
        );
    }

    #[test]
    fn no_stacking() {
        let mut map = TileMap::from_ascii(&["Cr"]).unwrap();
        assert!(map.place_road(p(1, 0)).is_err());
        assert!(map.place_building(p(1, 0), BuildingKind::Produce, &[], 1).is_err());
        assert!(map.place_road(p(0, 0)).is_err());
        assert_eq!(map.place_road(p(2, 0)), Err(MapError::OutOfBounds(p(2, 0))));
    }

    #[test]
    fn building_publishes_one_request_per_unit() {
        let mut map = TileMap::new(MapSize::new(2, 1));
        let planks = ResourceKind(1);
        let stone = ResourceKind(2);
        let (id, edit) = map
            .place_building(p(1, 0), BuildingKind::Produce, &[(planks, 2), (stone, 1)], 1)
            .unwrap();
        assert_eq!(edit.kind, TileEditKind::BuildingPlaced);

        let b = map.building(id).unwrap();
        assert_eq!(b.backlog.len(), 3);
        assert_eq!(b.required_total(), 3);
        assert!(b.backlog.iter().all(|r| r.building == id
            && r.priority == 1
            && r.booking_kind == BookingKind::Construction));
        let mut ids: Vec<_> = b.backlog.iter().map(|r| r.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);

        let drained = map.drain_backlogs();
        assert_eq!(drained.len(), 3);
        assert!(map.building(id).unwrap().backlog.is_empty());
    }

    #[test]
    fn remove_building_but_not_city_hall() {
        let mut map = TileMap::from_ascii(&["CrB"]).unwrap();
        assert!(map.remove_building(p(0, 0)).is_err());
        let (b, edit) = map.remove_building(p(2, 0)).unwrap();
        assert_eq!(edit.kind, TileEditKind::BuildingRemoved);
        assert_eq!(map.tile(p(2, 0)), Some(Tile::None));
        assert!(map.building(b.id).is_none());
        // Requests for a vanished building are dropped.
        let req = crate::ResourceRequest {
            id: map.new_request_id(),
            kind: ResourceKind(0),
            priority: 1,
            booking_kind: BookingKind::Construction,
            building: b.id,
        };
        assert!(!map.push_backlog(req));
    }
}

// ── Residents & delivery ──────────────────────────────────────────────────────

#[cfg(test)]
mod residents {
    use lg_core::{ResourceId, ResourceKind};

    use super::helpers::p;
    use crate::TileMap;

    #[test]
    fn add_and_remove() {
        let mut map = TileMap::from_ascii(&["Cr"]).unwrap();
        map.add_resident(p(0, 0), ResourceId(1)).unwrap();
        map.add_resident(p(0, 0), ResourceId(2)).unwrap();
        map.add_resident(p(0, 0), ResourceId(1)).unwrap();
        assert_eq!(map.residents(p(0, 0)), &[ResourceId(1), ResourceId(2)]);
        assert!(map.remove_resident(p(0, 0), ResourceId(1)));
        assert!(!map.remove_resident(p(0, 0), ResourceId(1)));
        assert!(map.residents(p(9, 9)).is_empty());
        assert!(map.add_resident(p(9, 9), ResourceId(3)).is_err());
    }

    #[test]
    fn delivery_completes_construction() {
        let mut map = TileMap::from_ascii(&["C."]).unwrap();
        let (id, _) = map
            .place_building(p(1, 0), crate::BuildingKind::Produce, &[(ResourceKind(4), 1)], 1)
            .unwrap();
        assert!(!map.building(id).unwrap().is_construction_complete());
        map.deliver(id, ResourceId(0), ResourceKind(4)).unwrap();
        assert!(map.building(id).unwrap().is_construction_complete());
    }
}
