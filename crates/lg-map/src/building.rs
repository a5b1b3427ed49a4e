//! Buildings and the resource requests they publish.

use lg_core::{BuildingId, RequestId, ResourceId, ResourceKind, TilePos};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    /// The single seed of the full segmentation rebuild, and the usual
    /// origin of resources.
    CityHall,
    Produce,
    Harvest,
}

/// Why a resource is being moved to a building.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BookingKind {
    Construction,
    Processing,
}

/// The claim binding a resource to the building that requested it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Booking {
    pub building: BuildingId,
    pub priority: i32,
    pub kind:     BookingKind,
}

/// A pending need for one unit of `kind` at `building`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceRequest {
    pub id:           RequestId,
    pub kind:         ResourceKind,
    /// Lower values are served first.
    pub priority:     i32,
    pub booking_kind: BookingKind,
    pub building:     BuildingId,
}

impl ResourceRequest {
    /// Rebuild the request a booking was created from, under a fresh id.
    pub fn from_booking(id: RequestId, kind: ResourceKind, booking: Booking) -> Self {
        Self {
            id,
            kind,
            priority: booking.priority,
            booking_kind: booking.kind,
            building: booking.building,
        }
    }

    pub fn booking(&self) -> Booking {
        Booking {
            building: self.building,
            priority: self.priority,
            kind:     self.booking_kind,
        }
    }
}

/// A resource consumed by a building under construction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructionItem {
    pub resource: ResourceId,
    pub kind:     ResourceKind,
}

/// A single-tile building.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    pub id:   BuildingId,
    pub kind: BuildingKind,
    pub pos:  TilePos,
    /// Resources needed to finish construction, as `(kind, count)`.
    pub required: Vec<(ResourceKind, u32)>,
    /// Requests not yet handed to the router.
    pub backlog: Vec<ResourceRequest>,
    /// Resources delivered so far.
    pub resources_for_construction: Vec<ConstructionItem>,
}

impl Building {
    pub fn new(id: BuildingId, kind: BuildingKind, pos: TilePos) -> Self {
        Self {
            id,
            kind,
            pos,
            required: Vec::new(),
            backlog: Vec::new(),
            resources_for_construction: Vec::new(),
        }
    }

    pub fn is_city_hall(&self) -> bool {
        self.kind == BuildingKind::CityHall
    }

    pub fn required_total(&self) -> u32 {
        self.required.iter().map(|(_, n)| n).sum()
    }

    /// Whether every required resource has been delivered.
    pub fn is_construction_complete(&self) -> bool {
        self.resources_for_construction.len() as u32 >= self.required_total()
    }
}
