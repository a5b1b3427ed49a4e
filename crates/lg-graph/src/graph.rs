//! `Graph`: a growable, offset-addressed grid of direction masks.
//!
//! # Addressing
//!
//! Positions are absolute map coordinates.  The backing grid covers the
//! bounding box of every tile that has ever been touched; it starts
//! `Unestablished` and becomes `Established` on the first `set_direction`.
//! Cells added by growth start empty.
//!
//! ```text
//! local = (pos.y - offset.y) * width + (pos.x - offset.x)
//! ```

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;

use lg_core::{Direction, DirectionMask, TilePos};

use crate::{GraphError, GraphResult, PathIndex};

// ── GraphExtent ───────────────────────────────────────────────────────────────

/// Bounding box of the backing grid.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphExtent {
    /// No tile has been touched yet.
    #[default]
    Unestablished,
    Established {
        /// Absolute position of local cell `(0, 0)`.
        offset: TilePos,
        width:  u32,
        height: u32,
    },
}

impl GraphExtent {
    #[inline]
    pub fn contains(self, pos: TilePos) -> bool {
        self.local_index(pos).is_some()
    }

    #[inline]
    fn local_index(self, pos: TilePos) -> Option<usize> {
        match self {
            GraphExtent::Unestablished => None,
            GraphExtent::Established { offset, width, height } => {
                let lx = pos.x - offset.x;
                let ly = pos.y - offset.y;
                if lx < 0 || ly < 0 || lx as u32 >= width || ly as u32 >= height {
                    None
                } else {
                    Some(ly as usize * width as usize + lx as usize)
                }
            }
        }
    }

    /// Smallest extent covering both `self` and `pos`.
    fn grown_to(self, pos: TilePos) -> GraphExtent {
        match self {
            GraphExtent::Unestablished => {
                GraphExtent::Established { offset: pos, width: 1, height: 1 }
            }
            GraphExtent::Established { offset, width, height } => {
                let min_x = offset.x.min(pos.x);
                let min_y = offset.y.min(pos.y);
                let max_x = (offset.x + width as i32 - 1).max(pos.x);
                let max_y = (offset.y + height as i32 - 1).max(pos.y);
                GraphExtent::Established {
                    offset: TilePos::new(min_x, min_y),
                    width:  (max_x - min_x + 1) as u32,
                    height: (max_y - min_y + 1) as u32,
                }
            }
        }
    }

    fn area(self) -> usize {
        match self {
            GraphExtent::Unestablished => 0,
            GraphExtent::Established { width, height, .. } => width as usize * height as usize,
        }
    }

    /// Absolute position of local index `i`.
    fn pos_of(self, i: usize) -> TilePos {
        match self {
            GraphExtent::Unestablished => TilePos::default(),
            GraphExtent::Established { offset, width, .. } => {
                let w = width as usize;
                TilePos::new(offset.x + (i % w) as i32, offset.y + (i / w) as i32)
            }
        }
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Directed tile graph of one segment.
///
/// Equality and ordering are structural over the set of non-empty nodes:
/// two graphs with the same edges compare equal regardless of the grid
/// extent they were grown to or whether their path index is computed.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    extent:     GraphExtent,
    /// Row-major masks, `extent.area()` long.
    nodes:      Vec<DirectionMask>,
    node_count: usize,
    paths:      OnceCell<PathIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a box-drawing fixture.  Rows are listed top to bottom; the last
    /// row is `y = 0` and the first column is `x = 0`.  `.` is an empty cell.
    pub fn from_rows(rows: &[&str]) -> GraphResult<Graph> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut graph = Graph::new();
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(GraphError::RaggedRows);
            }
            let y = (height - row - 1) as i32;
            for (col, glyph) in line.chars().enumerate() {
                let mask = DirectionMask::from_glyph(glyph)
                    .ok_or(GraphError::InvalidGlyph { glyph, row, col })?;
                for dir in mask.iter() {
                    graph.set_direction(TilePos::new(col as i32, y), dir, true);
                }
            }
        }
        Ok(graph)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Set or clear the directed edge `pos → pos.step(dir)`.
    ///
    /// Setting a bit outside the current extent grows the grid.  Clearing a
    /// bit outside the extent is a no-op.  Any change drops the path index.
    pub fn set_direction(&mut self, pos: TilePos, dir: Direction, value: bool) {
        let idx = match self.extent.local_index(pos) {
            Some(i) => i,
            None if !value => return,
            None => {
                self.grow_to(pos);
                match self.extent.local_index(pos) {
                    Some(i) => i,
                    None => return,
                }
            }
        };

        let old = self.nodes[idx];
        let new = old.set(dir, value);
        if old == new {
            return;
        }
        self.nodes[idx] = new;
        match (old.is_empty(), new.is_empty()) {
            (true, false) => self.node_count += 1,
            (false, true) => self.node_count -= 1,
            _ => {}
        }
        self.paths.take();
    }

    /// Add the undirected edge between `pos` and its neighbour in `dir`.
    pub fn connect(&mut self, pos: TilePos, dir: Direction) {
        self.set_direction(pos, dir, true);
        self.set_direction(pos.step(dir), dir.opposite(), true);
    }

    fn grow_to(&mut self, pos: TilePos) {
        let old_extent = self.extent;
        let new_extent = old_extent.grown_to(pos);
        let mut nodes = vec![DirectionMask::NONE; new_extent.area()];
        for (i, mask) in self.nodes.iter().enumerate() {
            if let Some(j) = new_extent.local_index(old_extent.pos_of(i)) {
                nodes[j] = *mask;
            }
        }
        self.extent = new_extent;
        self.nodes = nodes;
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn extent(&self) -> GraphExtent {
        self.extent
    }

    /// Number of tiles with at least one outgoing edge.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Whether `pos` lies inside the backing grid (it may still be empty).
    #[inline]
    pub fn contains(&self, pos: TilePos) -> bool {
        self.extent.contains(pos)
    }

    /// Mask at `pos`, or `None` outside the backing grid.
    #[inline]
    pub fn node(&self, pos: TilePos) -> Option<DirectionMask> {
        self.extent.local_index(pos).map(|i| self.nodes[i])
    }

    /// Whether `pos` is a non-empty node.
    #[inline]
    pub fn is_node(&self, pos: TilePos) -> bool {
        self.node(pos).is_some_and(|m| !m.is_empty())
    }

    /// Whether the directed edge `pos → pos.step(dir)` exists.
    #[inline]
    pub fn has_edge(&self, pos: TilePos, dir: Direction) -> bool {
        self.node(pos).is_some_and(|m| m.has(dir))
    }

    /// Non-empty nodes in row-major order (bottom row first).
    pub fn iter(&self) -> impl Iterator<Item = (TilePos, DirectionMask)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_empty())
            .map(|(i, m)| (self.extent.pos_of(i), *m))
    }

    /// Every directed edge as `(from, direction)`.
    pub fn edges(&self) -> impl Iterator<Item = (TilePos, Direction)> + '_ {
        self.iter().flat_map(|(pos, mask)| mask.iter().map(move |d| (pos, d)))
    }

    /// Whether every directed edge has its reverse.
    pub fn is_undirected(&self) -> bool {
        self.edges()
            .all(|(pos, dir)| self.has_edge(pos.step(dir), dir.opposite()))
    }

    // ── Paths ─────────────────────────────────────────────────────────────

    /// The all-pairs path index, computing it on first use.
    pub fn path_index(&self) -> &PathIndex {
        self.paths.get_or_init(|| PathIndex::build(self))
    }

    /// Whether the path index is currently computed.
    pub fn has_path_index(&self) -> bool {
        self.paths.get().is_some()
    }

    /// Shortest path from `origin` to `dest`, both endpoints included.
    pub fn shortest_path(&self, origin: TilePos, dest: TilePos) -> GraphResult<Vec<TilePos>> {
        self.path_index().path(origin, dest)
    }

    /// Number of edges on the shortest path from `a` to `b`.
    pub fn cost(&self, a: TilePos, b: TilePos) -> GraphResult<u32> {
        self.path_index().cost(a, b)
    }

    /// Nodes of minimum eccentricity.
    pub fn centers(&self) -> GraphResult<&[TilePos]> {
        self.path_index().centers()
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.node_count == other.node_count && self.iter().eq(other.iter())
    }
}

impl Eq for Graph {}

impl PartialOrd for Graph {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Graph {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl fmt::Display for Graph {
    /// Box-drawing rows, top row first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let GraphExtent::Established { width, height, .. } = self.extent else {
            return Ok(());
        };
        let w = width as usize;
        for row in (0..height as usize).rev() {
            for mask in &self.nodes[row * w..(row + 1) * w] {
                write!(f, "{}", mask.glyph())?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
