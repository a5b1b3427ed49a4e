//! `Segmenter`: flood-fill partitioning of the tile map into segments.
//!
//! # Algorithm
//!
//! Two queues.  The outer queue holds seeds `(direction, tile)`; each seed
//! starts one candidate segment.  The inner queue flood-fills that segment:
//!
//! - A vertex tile (flag or building) expands only in the direction it was
//!   seeded with.  Road tiles expand in all four directions.
//! - An edge `pos → next` is taken only if neither endpoint has already
//!   marked it in the per-tile `visited` mask, `next` is walkable, and the
//!   two tiles are not both buildings.  Taking it marks both endpoints, so
//!   every undirected edge is claimed by exactly one segment.
//! - Reaching a vertex records it and stops there; reaching a flag also
//!   pushes four fresh seeds at the flag onto the outer queue.
//!
//! A candidate with fewer than two vertices is discarded.
//!
//! # Incremental update
//!
//! `on_tiles_updated` deletes the segments an edit invalidates, pre-marks the
//! edges of every surviving segment as visited, and floods again from the
//! edited tiles, their neighbours, and the vertices of the deleted segments.
//! The pre-marking keeps the new segments disjoint from the surviving ones.

use std::collections::VecDeque;

use tracing::{debug, trace};

use lg_core::{Direction, DirectionMask, MapSize, SegmentId, TilePos};
use lg_graph::Graph;
use lg_map::{Tile, TileEdit, TileEditKind, TileMap};

use crate::{Segment, SegmentError, SegmentIdAllocator, SegmentResult, SegmentStore};

/// Result of an incremental update.  Nothing is applied yet.
#[derive(Debug, Default)]
pub struct SegmentsDiff {
    pub added:   Vec<Segment>,
    pub deleted: Vec<SegmentId>,
}

impl SegmentsDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

type Seed = (Direction, TilePos);

/// Owns the segment id allocator and the flood-fill scratch buffers, which
/// are reused across calls.
#[derive(Debug, Default)]
pub struct Segmenter {
    ids:     SegmentIdAllocator,
    visited: Vec<DirectionMask>,
    outer:   VecDeque<Seed>,
    inner:   VecDeque<Seed>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition the whole map, seeding from the city hall.
    pub fn build_graph_segments(&mut self, map: &TileMap) -> SegmentResult<Vec<Segment>> {
        let hall = map.city_hall().ok_or(SegmentError::MissingCityHall)?.pos;
        self.reset(map.size());
        self.seed_all_directions(hall);
        let segments = self.flood(map)?;
        debug!(segments = segments.len(), "segmentation rebuilt");
        Ok(segments)
    }

    /// Recompute the segments affected by `edits`, which must already be
    /// applied to `map`.
    pub fn on_tiles_updated(
        &mut self,
        map: &TileMap,
        edits: &[TileEdit],
        store: &SegmentStore,
    ) -> SegmentResult<SegmentsDiff> {
        let mut deleted: Vec<SegmentId> = Vec::new();
        for edit in edits {
            for segment in store.iter() {
                if !deleted.contains(&segment.id()) && should_segment_be_deleted(map, *edit, segment)
                {
                    deleted.push(segment.id());
                }
            }
        }

        self.reset(map.size());
        let size = map.size();
        for segment in store.iter().filter(|s| !deleted.contains(&s.id())) {
            for (pos, mask) in segment.graph().iter() {
                if let Some(i) = size.index(pos) {
                    self.visited[i] = DirectionMask(self.visited[i].0 | mask.0);
                }
            }
        }

        for edit in edits {
            match edit.kind {
                TileEditKind::RoadPlaced
                | TileEditKind::FlagPlaced
                | TileEditKind::FlagRemoved
                | TileEditKind::BuildingPlaced => {
                    if is_walkable(map, edit.pos) {
                        self.seed_all_directions(edit.pos);
                    }
                }
                TileEditKind::RoadRemoved | TileEditKind::BuildingRemoved => {
                    for (_, n) in edit.pos.neighbours() {
                        if is_walkable(map, n) {
                            self.seed_all_directions(n);
                        }
                    }
                }
            }
        }
        for id in &deleted {
            let Some(segment) = store.get(*id) else { continue };
            for &v in segment.vertices() {
                if is_walkable(map, v) {
                    self.seed_all_directions(v);
                }
            }
        }

        let added = self.flood(map)?;
        debug!(
            edits = edits.len(),
            added = added.len(),
            deleted = deleted.len(),
            "segments updated"
        );
        Ok(SegmentsDiff { added, deleted })
    }

    // ── Flood fill ────────────────────────────────────────────────────────

    fn reset(&mut self, size: MapSize) {
        self.visited.clear();
        self.visited.resize(size.area(), DirectionMask::NONE);
        self.outer.clear();
        self.inner.clear();
    }

    fn seed_all_directions(&mut self, pos: TilePos) {
        self.outer.extend(Direction::ALL.map(|d| (d, pos)));
    }

    fn flood(&mut self, map: &TileMap) -> SegmentResult<Vec<Segment>> {
        let size = map.size();
        let mut segments = Vec::new();

        while let Some(seed) = self.outer.pop_front() {
            self.inner.clear();
            self.inner.push_back(seed);

            let mut vertices: Vec<TilePos> = Vec::new();
            let mut tiles: Vec<TilePos> = vec![seed.1];
            let mut graph = Graph::new();

            while let Some((seed_dir, pos)) = self.inner.pop_front() {
                let (Some(tile), Some(i)) = (map.tile(pos), size.index(pos)) else {
                    continue;
                };
                if !tile.is_walkable() {
                    continue;
                }
                if tile.is_vertex() {
                    push_unique(&mut vertices, pos);
                }

                for dir in Direction::ALL {
                    if tile.is_vertex() && dir != seed_dir {
                        continue;
                    }
                    if self.visited[i].has(dir) {
                        continue;
                    }
                    let next = pos.step(dir);
                    let Some(j) = size.index(next) else { continue };
                    if self.visited[j].has(dir.opposite()) {
                        continue;
                    }
                    let next_tile = map.tile(next).unwrap_or(Tile::None);
                    if !next_tile.is_walkable() {
                        continue;
                    }
                    if tile.is_building() && next_tile.is_building() {
                        continue;
                    }

                    if next_tile == Tile::Flag {
                        self.outer.extend(Direction::ALL.map(|d| (d, next)));
                    }

                    self.visited[i] = self.visited[i].with(dir);
                    self.visited[j] = self.visited[j].with(dir.opposite());
                    graph.connect(pos, dir);
                    push_unique(&mut tiles, next);

                    if next_tile.is_vertex() {
                        push_unique(&mut vertices, next);
                    } else {
                        self.inner.push_back((dir, next));
                    }
                }
            }

            if vertices.len() > 1 {
                let id = self.ids.allocate();
                trace!(%id, vertices = vertices.len(), tiles = tiles.len(), "segment found");
                segments.push(Segment::new(id, vertices, tiles, graph)?);
            }
        }
        Ok(segments)
    }
}

/// Whether `edit` invalidates `segment`.
///
/// Road or building placement connects to an adjacent road that is a node of
/// the segment.  Every other edit invalidates the segment when the edited
/// tile itself is one of its nodes.
pub fn should_segment_be_deleted(map: &TileMap, edit: TileEdit, segment: &Segment) -> bool {
    let graph = segment.graph();
    if edit.kind.connects_neighbours() {
        edit.pos
            .neighbours()
            .into_iter()
            .any(|(_, n)| graph.is_node(n) && map.tile(n) == Some(Tile::Road))
    } else {
        graph.is_node(edit.pos)
    }
}

fn is_walkable(map: &TileMap, pos: TilePos) -> bool {
    map.tile(pos).is_some_and(Tile::is_walkable)
}

fn push_unique(list: &mut Vec<TilePos>, pos: TilePos) {
    if !list.contains(&pos) {
        list.push(pos);
    }
}
