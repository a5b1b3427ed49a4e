//! `SearchScratch`: breadth-first search from a requesting building to the
//! nearest matching resource.
//!
//! # Algorithm
//!
//! The search walks tile edges, not tiles.  It is seeded with all four
//! directions at the building and marks the building's `visited` mask full,
//! so no edge ever re-enters it.  Each popped `(dir, pos)` marks the edge on
//! both endpoints and then:
//!
//! - stops at a building other than the city hall (resources pass through
//!   the city hall but never through another site),
//! - refuses building-to-building edges and empty tiles,
//! - records `pos` as the parent of the new tile if it had none yet,
//! - scans the new tile's residents for an unbooked resource of the wanted
//!   kind.  The first one found ends the search.
//!
//! Parents are only set on first arrival, so the parent chain is a BFS tree
//! rooted at the building and the walk back from the resource is acyclic.
//!
//! All buffers are sized to the map once and only the bounding box of
//! touched tiles is cleared after each search.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use lg_core::{Direction, DirectionMask, MapSize, ResourceId, TilePos};
use lg_map::{ResourceRequest, Tile, TileMap};

use crate::{ResourceStore, RouterError, RouterResult};

/// A request matched with a resource, and the tile path from the resource
/// (first) to the requesting building (last).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundPair {
    pub request:  ResourceRequest,
    pub resource: ResourceId,
    pub path:     Vec<TilePos>,
}

#[derive(Clone, Debug)]
pub struct SearchScratch {
    size:    MapSize,
    visited: Vec<DirectionMask>,
    parent:  Vec<Option<TilePos>>,
    queue:   VecDeque<(Direction, TilePos)>,
    /// Inclusive bounding box of the tiles touched by the current search.
    touched: Option<(TilePos, TilePos)>,
}

impl SearchScratch {
    pub fn new(size: MapSize) -> Self {
        Self {
            size,
            visited: vec![DirectionMask::NONE; size.area()],
            parent: vec![None; size.area()],
            queue: VecDeque::new(),
            touched: None,
        }
    }

    pub fn size(&self) -> MapSize {
        self.size
    }

    /// Resize the buffers if the map changed size.
    pub fn prepare(&mut self, size: MapSize) {
        if size != self.size {
            *self = Self::new(size);
        }
    }

    /// Edge visits allowed per search.  Every accepted visit sets a fresh
    /// bit in some tile's mask, so a correct search never reaches this.
    pub fn step_budget(&self) -> usize {
        4 * self.size.area() + 4
    }

    /// Search outward from `origin` for an unbooked resource matching
    /// `request`, skipping anything in `taken`.
    pub fn find_resource(
        &mut self,
        map: &TileMap,
        resources: &ResourceStore,
        request: &ResourceRequest,
        origin: TilePos,
        taken: &FxHashSet<ResourceId>,
    ) -> RouterResult<Option<FoundPair>> {
        self.prepare(map.size());
        let result = self
            .search(map, resources, request, origin, taken)
            .and_then(|found| match found {
                Some((resource, at)) => self.walk_back(request, at, origin).map(|path| {
                    path.map(|path| FoundPair { request: *request, resource, path })
                }),
                None => Ok(None),
            });
        self.clear_touched();
        result
    }

    fn search(
        &mut self,
        map: &TileMap,
        resources: &ResourceStore,
        request: &ResourceRequest,
        origin: TilePos,
        taken: &FxHashSet<ResourceId>,
    ) -> RouterResult<Option<(ResourceId, TilePos)>> {
        let size = self.size;
        let Some(o) = size.index(origin) else { return Ok(None) };
        let hall = map.city_hall().map(|h| h.id);

        self.queue.clear();
        self.queue.extend(Direction::ALL.map(|d| (d, origin)));
        self.visited[o] = DirectionMask::ALL;
        self.touch(origin);

        let budget = self.step_budget();
        let mut steps = 0usize;

        while let Some((dir, pos)) = self.queue.pop_front() {
            let next = pos.step(dir);
            let (Some(i), Some(j)) = (size.index(pos), size.index(next)) else {
                continue;
            };
            if self.visited[j].has(dir.opposite()) {
                continue;
            }
            steps += 1;
            if steps > budget {
                return Err(RouterError::SearchExhausted { request: request.id });
            }

            self.touch(next);
            self.visited[j] = self.visited[j].with(dir.opposite());
            self.visited[i] = self.visited[i].with(dir);

            let tile = map.tile(pos).unwrap_or(Tile::None);
            let next_tile = map.tile(next).unwrap_or(Tile::None);
            if next_tile.building().is_some_and(|id| Some(id) != hall) {
                continue;
            }
            if tile.is_building() && next_tile.is_building() {
                continue;
            }
            if tile == Tile::None || next_tile == Tile::None {
                continue;
            }

            if self.parent[j].is_none() {
                self.parent[j] = Some(pos);
            }

            let found = map.residents(next).iter().copied().find(|id| {
                !taken.contains(id)
                    && resources
                        .get(*id)
                        .is_some_and(|r| r.kind == request.kind && !r.is_booked())
            });
            if let Some(resource) = found {
                return Ok(Some((resource, next)));
            }

            for d in Direction::ALL {
                if d != dir.opposite() && !self.visited[j].has(d) {
                    self.queue.push_back((d, next));
                }
            }
        }
        Ok(None)
    }

    /// Follow parents from `from` back to `origin`.  The walk may take at
    /// most one step per touched tile.
    fn walk_back(
        &self,
        request: &ResourceRequest,
        from: TilePos,
        origin: TilePos,
    ) -> RouterResult<Option<Vec<TilePos>>> {
        let limit = self.touched_area();
        let mut path = vec![from];
        let mut cur = from;
        while let Some(prev) = self.size.index(cur).and_then(|i| self.parent[i]) {
            if path.len() > limit {
                return Err(RouterError::SearchExhausted { request: request.id });
            }
            path.push(prev);
            cur = prev;
        }
        Ok((cur == origin).then_some(path))
    }

    fn touch(&mut self, pos: TilePos) {
        self.touched = Some(match self.touched {
            None => (pos, pos),
            Some((lo, hi)) => (
                TilePos::new(lo.x.min(pos.x), lo.y.min(pos.y)),
                TilePos::new(hi.x.max(pos.x), hi.y.max(pos.y)),
            ),
        });
    }

    fn touched_area(&self) -> usize {
        match self.touched {
            None => 0,
            Some((lo, hi)) => ((hi.x - lo.x + 1) * (hi.y - lo.y + 1)) as usize,
        }
    }

    fn clear_touched(&mut self) {
        self.queue.clear();
        let Some((lo, hi)) = self.touched.take() else { return };
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                if let Some(i) = self.size.index(TilePos::new(x, y)) {
                    self.visited[i] = DirectionMask::NONE;
                    self.parent[i] = None;
                }
            }
        }
    }

    /// Whether every buffer is back to its idle state.
    pub fn is_clean(&self) -> bool {
        self.touched.is_none()
            && self.queue.is_empty()
            && self.visited.iter().all(|m| m.is_empty())
            && self.parent.iter().all(Option::is_none)
    }
}
