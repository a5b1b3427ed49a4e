//! `ResourceRouter`: pending requests, bookings and in-transit hand-off.
//!
//! The router owns every `MapResource` and the queue of requests that have
//! not been matched yet.  Segments and the tile map are passed in by the
//! caller on each call; the router only writes the bookkeeping it owns on
//! them (segment transport queues and linked-resource sets, tile residents,
//! building backlogs).

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, trace, warn};

use lg_core::{
    ActorId, BuildingId, MapSize, PriorityQueue, RequestId, ResourceId, ResourceKind, SegmentId,
    TilePos,
};
use lg_map::{BookingKind, MapError, ResourceRequest, TileMap};
use lg_segment::{Segment, SegmentStore};

use crate::search::FoundPair;
use crate::{
    MapResource, ResourceStore, RouterError, RouterResult, SearchScratch, TransitLeg, stitch_path,
};

// ── Event types ───────────────────────────────────────────────────────────────

/// Outcome of one `pathfind_requests_in_queue` pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathfindReport {
    /// Requests booked this pass, in the order they were served.
    pub booked:     Vec<(RequestId, ResourceId)>,
    /// Requests for which no resource was reachable.
    pub unmatched:  usize,
    /// Requests whose matched path could not be split into segment legs.
    pub unstitched: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorRole {
    /// The actor is holding the resource and must put it down.
    Carrier,
    /// The actor was on its way to pick the resource up.
    Targeter,
}

/// Tells actor logic that a resource it holds or was heading for lost its
/// route.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitInterruption {
    pub resource: ResourceId,
    pub actor:    ActorId,
    pub role:     ActorRole,
}

/// What happened when an actor put a resource down.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Waypoint reached; the resource now waits on `segment`'s queue.
    Advanced { segment: SegmentId },
    /// The resource was consumed by `building`.
    Delivered { building: BuildingId },
    /// The resource rests on the map without a route.
    Dropped,
}

// ── ResourceRouter ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ResourceRouter {
    requests:  PriorityQueue<RequestId>,
    pending:   FxHashMap<RequestId, ResourceRequest>,
    resources: ResourceStore,
    scratch:   SearchScratch,
}

impl ResourceRouter {
    pub fn new(size: MapSize) -> Self {
        Self {
            requests:  PriorityQueue::new(),
            pending:   FxHashMap::default(),
            resources: ResourceStore::new(),
            scratch:   SearchScratch::new(size),
        }
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    pub fn resource(&self, id: ResourceId) -> Option<&MapResource> {
        self.resources.get(id)
    }

    // ── Requests ──────────────────────────────────────────────────────────

    pub fn add_requests(&mut self, requests: impl IntoIterator<Item = ResourceRequest>) {
        for request in requests {
            self.requests.push(request.priority, request.id);
            self.pending.insert(request.id, request);
        }
    }

    /// Drop queued requests by id.  Returns how many were queued.
    pub fn remove_requests(&mut self, ids: &[RequestId]) -> usize {
        ids.iter().filter(|id| self.remove_request(**id)).count()
    }

    /// Drop every queued request owned by `building`.
    pub fn remove_requests_for(&mut self, building: BuildingId) -> usize {
        let ids: Vec<RequestId> = self
            .pending
            .values()
            .filter(|r| r.building == building)
            .map(|r| r.id)
            .collect();
        self.remove_requests(&ids)
    }

    fn remove_request(&mut self, id: RequestId) -> bool {
        self.requests.remove(&id);
        self.pending.remove(&id).is_some()
    }

    /// Queued requests, most urgent first.
    pub fn pending_requests(&self) -> impl Iterator<Item = &ResourceRequest> + '_ {
        self.requests.iter().filter_map(|(_, id)| self.pending.get(&id))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    // ── Resources ─────────────────────────────────────────────────────────

    /// Put a new resource on the map at `pos`.
    pub fn spawn_resource(
        &mut self,
        map: &mut TileMap,
        pos: TilePos,
        kind: ResourceKind,
    ) -> RouterResult<ResourceId> {
        let id = self.resources.allocate();
        map.add_resident(pos, id)?;
        self.resources.insert(MapResource::new(id, kind, pos));
        trace!(resource = %id, %pos, "resource spawned");
        Ok(id)
    }

    // ── Matching ──────────────────────────────────────────────────────────

    /// Match queued construction requests with resources and book them.
    ///
    /// Building backlogs are moved into the queue first.  Requests are
    /// served most urgent first and each takes the nearest unbooked
    /// resource; a resource matched earlier in the pass is not offered
    /// again.  Requests that find nothing stay queued.
    pub fn pathfind_requests_in_queue(
        &mut self,
        map: &mut TileMap,
        segments: &mut SegmentStore,
    ) -> RouterResult<PathfindReport> {
        let backlog = map.drain_backlogs();
        self.add_requests(backlog);

        let mut report = PathfindReport::default();
        let mut taken: FxHashSet<ResourceId> = FxHashSet::default();
        let mut pairs: Vec<FoundPair> = Vec::new();

        let queued: Vec<RequestId> = self.requests.iter().map(|(_, id)| id).collect();
        for id in queued {
            let Some(request) = self.pending.get(&id).copied() else { continue };
            if request.booking_kind != BookingKind::Construction {
                continue;
            }
            let Some(origin) = map.building(request.building).map(|b| b.pos) else {
                trace!(request = %id, building = %request.building, "building gone, request dropped");
                self.remove_request(id);
                continue;
            };
            match self
                .scratch
                .find_resource(map, &self.resources, &request, origin, &taken)?
            {
                Some(pair) => {
                    taken.insert(pair.resource);
                    pairs.push(pair);
                }
                None => {
                    trace!(request = %id, kind = request.kind.0, "no resource reachable");
                    report.unmatched += 1;
                }
            }
        }

        for pair in pairs {
            let destination = pair.path.last().copied();
            let legs = stitch_path(&pair.path, segments)
                .filter(|legs| legs.back().map(|l| l.waypoint) == destination);
            let Some(legs) = legs else {
                warn!(
                    request = %pair.request.id,
                    resource = %pair.resource,
                    steps = pair.path.len(),
                    "matched path does not follow the segments, request kept"
                );
                report.unstitched += 1;
                continue;
            };
            let served = (pair.request.id, pair.resource);
            self.book(pair, legs, segments)?;
            report.booked.push(served);
        }
        Ok(report)
    }

    fn book(
        &mut self,
        pair: FoundPair,
        legs: VecDeque<TransitLeg>,
        segments: &mut SegmentStore,
    ) -> RouterResult<()> {
        let id = pair.resource;
        let booking = pair.request.booking();
        let res = self
            .resources
            .get_mut(id)
            .ok_or(RouterError::UnknownResource(id))?;

        for leg in &legs {
            if let Some(s) = segments.get_mut(leg.segment) {
                s.link_resource(id);
            }
        }
        if let Some(first) = legs.front() {
            segments
                .get_mut(first.segment)
                .ok_or(RouterError::UnknownSegment(first.segment))?
                .enqueue_resource(booking.priority, id);
        }
        debug!(
            resource = %id,
            building = %booking.building,
            request = %pair.request.id,
            legs = legs.len(),
            "resource booked"
        );
        res.booking = Some(booking);
        res.legs = legs;
        self.remove_request(pair.request.id);
        Ok(())
    }

    // ── Actor events ──────────────────────────────────────────────────────

    /// Pop the most urgent resource waiting on `segment` and record `actor`
    /// as heading for it.
    pub fn claim_next_resource(
        &mut self,
        segments: &mut SegmentStore,
        segment: SegmentId,
        actor: ActorId,
    ) -> RouterResult<Option<ResourceId>> {
        let seg = segments
            .get_mut(segment)
            .ok_or(RouterError::UnknownSegment(segment))?;
        while let Some((_, id)) = seg.pop_resource() {
            if let Some(res) = self.resources.get_mut(id) {
                res.targeter = Some(actor);
                trace!(resource = %id, %segment, %actor, "resource claimed");
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// The actor lifts a booked resource off its tile.
    pub fn on_actor_started_picking_up(
        &mut self,
        map: &mut TileMap,
        resource: ResourceId,
        actor: ActorId,
    ) -> RouterResult<()> {
        let res = self
            .resources
            .get_mut(resource)
            .ok_or(RouterError::UnknownResource(resource))?;
        if !res.is_booked() {
            return Err(RouterError::NotBooked(resource));
        }
        if let Some(carrier) = res.carrier {
            return Err(RouterError::AlreadyCarried { resource, carrier });
        }
        map.remove_resident(res.pos, resource);
        res.carrier = Some(actor);
        res.targeter = Some(actor);
        Ok(())
    }

    /// The actor puts `resource` down at `pos` after carrying it along
    /// `segment` (`None` if the segment no longer exists).
    ///
    /// Nothing is changed when an error is returned.
    pub fn on_actor_placed_resource(
        &mut self,
        map: &mut TileMap,
        segments: &mut SegmentStore,
        pos: TilePos,
        segment: Option<SegmentId>,
        resource: ResourceId,
    ) -> RouterResult<Placement> {
        if !map.contains(pos) {
            return Err(MapError::OutOfBounds(pos).into());
        }
        let res = self
            .resources
            .get(resource)
            .ok_or(RouterError::UnknownResource(resource))?;
        let kind = res.kind;
        let booking = res.booking;
        let next_leg = match (res.legs.front(), res.legs.get(1)) {
            (Some(leg), Some(next)) if leg.waypoint == pos => Some(*next),
            _ => None,
        };

        // Inside the requesting building.
        if let Some(booking) =
            booking.filter(|b| map.building(b.building).is_some_and(|site| site.pos == pos))
        {
            map.deliver(booking.building, resource, kind)?;
            self.clear_booking(resource, map, segments, false)?;
            self.resources.remove(resource);
            debug!(%resource, building = %booking.building, "resource delivered");
            return Ok(Placement::Delivered { building: booking.building });
        }

        // At the end of the current leg, with more to go.
        if let (Some(next), Some(booking)) = (next_leg, booking) {
            segments
                .get_mut(next.segment)
                .ok_or(RouterError::UnknownSegment(next.segment))?
                .enqueue_resource(booking.priority, resource);
            let res = self
                .resources
                .get_mut(resource)
                .ok_or(RouterError::UnknownResource(resource))?;
            let done = res.legs.pop_front().map(|leg| leg.segment);
            res.carrier = None;
            res.targeter = None;
            res.pos = pos;
            for left in segment.into_iter().chain(done) {
                if res.legs.iter().any(|leg| leg.segment == left) {
                    continue;
                }
                if let Some(s) = segments.get_mut(left) {
                    s.unlink_resource(resource);
                }
            }
            trace!(%resource, %pos, segment = %next.segment, "resource advanced");
            return Ok(Placement::Advanced { segment: next.segment });
        }

        // Off route: the booking cannot continue from here.
        if let Some(res) = self.resources.get_mut(resource) {
            res.carrier = None;
            res.pos = pos;
        }
        if self.clear_booking(resource, map, segments, true)? {
            debug!(%resource, %pos, "resource dropped off route, request rebooked");
        }
        if let Some(res) = self.resources.get_mut(resource) {
            res.targeter = None;
        }
        map.add_resident(pos, resource)?;
        Ok(Placement::Dropped)
    }

    // ── Segment deletion ──────────────────────────────────────────────────

    /// Release every resource routed through `segment`, which has already
    /// been removed from `segments`.
    ///
    /// Each booking is cleared and its request goes back on the building's
    /// backlog, to be matched again on the next pass.  Resources not held
    /// by an actor are put back on their tile so the next pass can find
    /// them.  Actors holding or heading for an affected resource are
    /// reported.
    pub fn on_segment_deleted(
        &mut self,
        segment: &mut Segment,
        map: &mut TileMap,
        segments: &mut SegmentStore,
    ) -> RouterResult<Vec<TransitInterruption>> {
        let mut interruptions = Vec::new();
        let mut rebooked = 0usize;

        for id in segment.take_linked_resources() {
            segment.dequeue_resource(id);
            let Some(res) = self.resources.get(id) else { continue };
            if !res.is_booked() {
                continue;
            }
            let affected = match (res.carrier, res.targeter) {
                (Some(actor), _) => Some((actor, ActorRole::Carrier)),
                (None, Some(actor)) => Some((actor, ActorRole::Targeter)),
                (None, None) => None,
            };
            if let Some((actor, role)) = affected {
                interruptions.push(TransitInterruption { resource: id, actor, role });
            }
            if self.clear_booking(id, map, segments, true)? {
                rebooked += 1;
            }
        }

        if rebooked > 0 {
            info!(
                segment = %segment.id(),
                rebooked,
                interrupted = interruptions.len(),
                "bookings released by segment deletion"
            );
        }
        Ok(interruptions)
    }

    /// End the booking of `id`: drop it from every remaining leg's queue and
    /// linked set, and optionally put its request back on the building's
    /// backlog.  A rebooked resource that nobody carries is returned to the
    /// residents of its tile.  Returns `false` if the resource was not
    /// booked.
    fn clear_booking(
        &mut self,
        id: ResourceId,
        map: &mut TileMap,
        segments: &mut SegmentStore,
        rebook: bool,
    ) -> RouterResult<bool> {
        let Some(res) = self.resources.get_mut(id) else { return Ok(false) };
        let Some(booking) = res.booking.take() else { return Ok(false) };

        for leg in res.legs.drain(..) {
            if let Some(s) = segments.get_mut(leg.segment) {
                s.dequeue_resource(id);
                s.unlink_resource(id);
            }
        }
        res.targeter = None;

        if rebook {
            if res.carrier.is_none() {
                map.add_resident(res.pos, id)?;
            }
            let request = ResourceRequest::from_booking(map.new_request_id(), res.kind, booking);
            if !map.push_backlog(request) {
                debug!(resource = %id, building = %booking.building, "building gone, resource freed");
            }
        }
        Ok(true)
    }
}
