//! `Segment`: one maximal road run between vertices.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use lg_core::{Direction, PriorityQueue, ResourceId, SegmentId, TilePos};
use lg_graph::{Graph, GraphError};

use crate::{SegmentError, SegmentResult};

// ── SegmentIdAllocator ────────────────────────────────────────────────────────

/// Hands out segment ids in increasing order.  Ids are never reused.
#[derive(Clone, Debug)]
pub struct SegmentIdAllocator {
    next: SegmentId,
}

impl Default for SegmentIdAllocator {
    fn default() -> Self {
        Self { next: SegmentId(0) }
    }
}

impl SegmentIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> SegmentId {
        let id = self.next;
        self.next = id.next();
        id
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// A connected component of the tile graph bounded by vertex tiles.
///
/// Vertices and movement tiles are stored sorted.  Equality and ordering
/// compare vertices, movement tiles and graph only; the id and the router
/// bookkeeping do not take part.
#[derive(Clone, Debug)]
pub struct Segment {
    id:               SegmentId,
    graph:            Graph,
    vertices:         Vec<TilePos>,
    movement_tiles:   Vec<TilePos>,
    linked_segments:  BTreeSet<SegmentId>,
    /// Resources whose stitched path crosses this segment.
    linked_resources: BTreeSet<ResourceId>,
    /// Resources waiting to be carried along this segment.
    transport_queue:  PriorityQueue<ResourceId>,
}

impl Segment {
    /// Validate and build a segment.  The graph's path index is computed
    /// here, once, so later queries never pay for it.
    pub fn new(
        id: SegmentId,
        vertices: Vec<TilePos>,
        movement_tiles: Vec<TilePos>,
        graph: Graph,
    ) -> SegmentResult<Segment> {
        let vertices = sorted_unique(vertices).map_err(SegmentError::DuplicateVertex)?;
        let movement_tiles =
            sorted_unique(movement_tiles).map_err(SegmentError::DuplicateMovementTile)?;
        if vertices.len() < 2 {
            return Err(SegmentError::TooFewVertices(vertices.len()));
        }
        if let Some(v) = vertices.iter().find(|v| !graph.is_node(**v)) {
            return Err(GraphError::NotANode(*v).into());
        }
        graph.path_index();

        Ok(Segment {
            id,
            graph,
            vertices,
            movement_tiles,
            linked_segments: BTreeSet::new(),
            linked_resources: BTreeSet::new(),
            transport_queue: PriorityQueue::new(),
        })
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn vertices(&self) -> &[TilePos] {
        &self.vertices
    }

    pub fn movement_tiles(&self) -> &[TilePos] {
        &self.movement_tiles
    }

    pub fn has_vertex(&self, pos: TilePos) -> bool {
        self.vertices.binary_search(&pos).is_ok()
    }

    pub fn has_movement_tile(&self, pos: TilePos) -> bool {
        self.movement_tiles.binary_search(&pos).is_ok()
    }

    pub fn shares_vertex(&self, other: &Segment) -> bool {
        self.vertices.iter().any(|v| other.has_vertex(*v))
    }

    /// Whether the graph has the directed edge `a → b` between adjacent tiles.
    pub fn contains_edge(&self, a: TilePos, b: TilePos) -> bool {
        Direction::between(a, b).is_some_and(|d| self.graph.has_edge(a, d))
    }

    // ── Neighbour links ───────────────────────────────────────────────────

    pub fn linked_segments(&self) -> &BTreeSet<SegmentId> {
        &self.linked_segments
    }

    pub fn link(&mut self, other: SegmentId) -> bool {
        other != self.id && self.linked_segments.insert(other)
    }

    pub fn unlink(&mut self, other: SegmentId) -> bool {
        self.linked_segments.remove(&other)
    }

    // ── Router bookkeeping ────────────────────────────────────────────────

    pub fn linked_resources(&self) -> &BTreeSet<ResourceId> {
        &self.linked_resources
    }

    pub fn link_resource(&mut self, resource: ResourceId) -> bool {
        self.linked_resources.insert(resource)
    }

    pub fn unlink_resource(&mut self, resource: ResourceId) -> bool {
        self.linked_resources.remove(&resource)
    }

    /// Empty the linked-resource set, returning its contents.
    pub fn take_linked_resources(&mut self) -> BTreeSet<ResourceId> {
        std::mem::take(&mut self.linked_resources)
    }

    pub fn transport_queue(&self) -> &PriorityQueue<ResourceId> {
        &self.transport_queue
    }

    pub fn enqueue_resource(&mut self, priority: i32, resource: ResourceId) {
        self.transport_queue.push(priority, resource);
    }

    pub fn dequeue_resource(&mut self, resource: ResourceId) -> bool {
        self.transport_queue.remove(&resource).is_some()
    }

    /// Pop the most urgent resource waiting on this segment.
    pub fn pop_resource(&mut self) -> Option<(i32, ResourceId)> {
        self.transport_queue.pop()
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.movement_tiles == other.movement_tiles
            && self.graph == other.graph
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.vertices
            .cmp(&other.vertices)
            .then_with(|| self.movement_tiles.cmp(&other.movement_tiles))
            .then_with(|| self.graph.cmp(&other.graph))
    }
}

/// Sort `items`, failing with the first duplicate.
fn sorted_unique(mut items: Vec<TilePos>) -> Result<Vec<TilePos>, TilePos> {
    items.sort_unstable();
    if let Some(w) = items.windows(2).find(|w| w[0] == w[1]) {
        return Err(w[0]);
    }
    Ok(items)
}
