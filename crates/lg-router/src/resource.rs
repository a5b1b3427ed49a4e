//! Resources lying on the map or in transit, and the store that owns them.

use std::collections::{BTreeMap, VecDeque};

use lg_core::{ActorId, ResourceId, ResourceKind, SegmentId, TilePos};
use lg_map::Booking;

/// One hop of a stitched route: carry the resource along `segment` and put
/// it down at `waypoint`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitLeg {
    pub segment:  SegmentId,
    pub waypoint: TilePos,
}

/// A single unit of some resource kind.
///
/// `booking` and `legs` are set together when the resource is matched and
/// cleared together when the booking ends.  The last leg's waypoint is the
/// booked building's tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapResource {
    pub id:       ResourceId,
    pub kind:     ResourceKind,
    /// Last tile the resource rested on.
    pub pos:      TilePos,
    pub booking:  Option<Booking>,
    /// Remaining legs, front first.
    pub legs:     VecDeque<TransitLeg>,
    /// Actor holding the resource right now.
    pub carrier:  Option<ActorId>,
    /// Actor that has claimed the resource for its next leg.
    pub targeter: Option<ActorId>,
}

impl MapResource {
    pub fn new(id: ResourceId, kind: ResourceKind, pos: TilePos) -> Self {
        Self {
            id,
            kind,
            pos,
            booking: None,
            legs: VecDeque::new(),
            carrier: None,
            targeter: None,
        }
    }

    #[inline]
    pub fn is_booked(&self) -> bool {
        self.booking.is_some()
    }

    #[inline]
    pub fn is_carried(&self) -> bool {
        self.carrier.is_some()
    }

    pub fn current_leg(&self) -> Option<TransitLeg> {
        self.legs.front().copied()
    }
}

// ── ResourceStore ─────────────────────────────────────────────────────────────

/// Every live resource, keyed by id.  Ids are allocated in increasing order
/// and never reused.
#[derive(Clone, Debug)]
pub struct ResourceStore {
    resources: BTreeMap<ResourceId, MapResource>,
    next:      ResourceId,
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self { resources: BTreeMap::new(), next: ResourceId(0) }
    }
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the id the next `insert` will use.
    pub fn allocate(&mut self) -> ResourceId {
        let id = self.next;
        self.next = id.next();
        id
    }

    pub fn insert(&mut self, resource: MapResource) {
        self.resources.insert(resource.id, resource);
    }

    pub fn remove(&mut self, id: ResourceId) -> Option<MapResource> {
        self.resources.remove(&id)
    }

    pub fn get(&self, id: ResourceId) -> Option<&MapResource> {
        self.resources.get(&id)
    }

    pub fn get_mut(&mut self, id: ResourceId) -> Option<&mut MapResource> {
        self.resources.get_mut(&id)
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.resources.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapResource> {
        self.resources.values()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn booked_count(&self) -> usize {
        self.resources.values().filter(|r| r.is_booked()).count()
    }
}
