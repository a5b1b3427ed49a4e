//! `SegmentStore`: the authoritative list of live segments.
//!
//! Keyed by `SegmentId` in a `BTreeMap`, so iteration follows creation order
//! and is deterministic.  Inserting a segment links it with every live
//! segment that shares a vertex; removing it unlinks it again.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::debug;

use lg_core::{Direction, SegmentId, TilePos};

use crate::{Segment, SegmentError, SegmentResult, SegmentsDiff};

#[derive(Clone, Debug, Default)]
pub struct SegmentStore {
    segments: BTreeMap<SegmentId, Segment>,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a full rebuild, linking as segments are inserted.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut store = Self::new();
        for s in segments {
            store.insert(s);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(&id)
    }

    pub fn get_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.segments.get_mut(&id)
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.segments.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Segment> {
        self.segments.values_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.segments.keys().copied()
    }

    /// Segments whose graph has the directed edge `a → b`.
    pub fn with_edge(&self, a: TilePos, b: TilePos) -> impl Iterator<Item = &Segment> {
        self.segments.values().filter(move |s| s.contains_edge(a, b))
    }

    /// Segments that have `pos` as a vertex.
    pub fn with_vertex(&self, pos: TilePos) -> impl Iterator<Item = &Segment> {
        self.segments.values().filter(move |s| s.has_vertex(pos))
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    pub fn insert(&mut self, mut segment: Segment) {
        let id = segment.id();
        for other in self.segments.values_mut() {
            if other.shares_vertex(&segment) {
                other.link(id);
                segment.link(other.id());
            }
        }
        self.segments.insert(id, segment);
    }

    pub fn remove(&mut self, id: SegmentId) -> Option<Segment> {
        let segment = self.segments.remove(&id)?;
        for neighbour in segment.linked_segments() {
            if let Some(n) = self.segments.get_mut(neighbour) {
                n.unlink(id);
            }
        }
        Some(segment)
    }

    /// Remove the deleted segments, then insert the added ones.  Returns the
    /// removed segments so their linked resources can be re-homed.
    pub fn apply_diff(&mut self, diff: SegmentsDiff) -> SegmentResult<Vec<Segment>> {
        if let Some(missing) = diff.deleted.iter().find(|id| !self.contains(**id)) {
            return Err(SegmentError::UnknownSegment(*missing));
        }
        let removed: Vec<Segment> = diff
            .deleted
            .iter()
            .filter_map(|id| self.remove(*id))
            .collect();
        let added = diff.added.len();
        for s in diff.added {
            self.insert(s);
        }
        debug!(added, removed = removed.len(), live = self.len(), "segment diff applied");
        Ok(removed)
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Verify that no directed tile edge belongs to two live segments.
    pub fn check_disjoint_edges(&self) -> SegmentResult<()> {
        let mut owner: FxHashMap<(TilePos, Direction), SegmentId> = FxHashMap::default();
        for segment in self.segments.values() {
            for edge in segment.graph().edges() {
                if let Some(first) = owner.insert(edge, segment.id()) {
                    return Err(SegmentError::SharedEdge {
                        pos: edge.0,
                        dir: edge.1,
                        first,
                        second: segment.id(),
                    });
                }
            }
        }
        Ok(())
    }
}
