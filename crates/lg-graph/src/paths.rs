//! `PathIndex`: all-pairs shortest paths over a `Graph`.
//!
//! # Algorithm
//!
//! Floyd–Warshall over the non-empty nodes with unit edge weights, O(V³)
//! time and O(V²) space.  Segments are small (a road between flags), so the
//! cubic cost is paid once per segment, right after segmentation.
//!
//! `dist[i * n + j]` is the hop count from node `i` to node `j`
//! (`UNREACHABLE` when there is no path).  `prev[i * n + j]` is the node
//! preceding `j` on the shortest path from `i`.

use rustc_hash::FxHashMap;

use lg_core::TilePos;

use crate::{Graph, GraphError, GraphResult};

const UNREACHABLE: u32 = u32::MAX;
const NO_NODE: u32 = u32::MAX;

#[derive(Clone, Debug)]
pub struct PathIndex {
    /// Node index → absolute position, row-major order of the graph.
    positions: Vec<TilePos>,
    /// Absolute position → node index.
    index:     FxHashMap<TilePos, u32>,
    dist:      Vec<u32>,
    prev:      Vec<u32>,
    /// Minimum-eccentricity nodes, or the unreachable pair that makes the
    /// graph disconnected.
    centers:   Result<Vec<TilePos>, GraphError>,
}

impl PathIndex {
    pub(crate) fn build(graph: &Graph) -> PathIndex {
        let positions: Vec<TilePos> = graph.iter().map(|(p, _)| p).collect();
        let index: FxHashMap<TilePos, u32> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| (*p, i as u32))
            .collect();
        let n = positions.len();

        let mut dist = vec![UNREACHABLE; n * n];
        let mut prev = vec![NO_NODE; n * n];

        for (i, &pos) in positions.iter().enumerate() {
            dist[i * n + i] = 0;
            prev[i * n + i] = i as u32;
            let Some(mask) = graph.node(pos) else { continue };
            for dir in mask.iter() {
                if let Some(&j) = index.get(&pos.step(dir)) {
                    let j = j as usize;
                    dist[i * n + j] = 1;
                    prev[i * n + j] = i as u32;
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let ik = dist[i * n + k];
                if ik == UNREACHABLE {
                    continue;
                }
                for j in 0..n {
                    let kj = dist[k * n + j];
                    if kj == UNREACHABLE {
                        continue;
                    }
                    if ik + kj < dist[i * n + j] {
                        dist[i * n + j] = ik + kj;
                        prev[i * n + j] = prev[k * n + j];
                    }
                }
            }
        }

        let centers = compute_centers(&positions, &dist);
        PathIndex { positions, index, dist, prev, centers }
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    /// Node positions in index order.
    pub fn positions(&self) -> &[TilePos] {
        &self.positions
    }

    fn node_index(&self, pos: TilePos) -> GraphResult<usize> {
        self.index
            .get(&pos)
            .map(|&i| i as usize)
            .ok_or(GraphError::NotANode(pos))
    }

    pub fn cost(&self, from: TilePos, to: TilePos) -> GraphResult<u32> {
        let n = self.positions.len();
        let i = self.node_index(from)?;
        let j = self.node_index(to)?;
        match self.dist[i * n + j] {
            UNREACHABLE => Err(GraphError::Unreachable { from, to }),
            d => Ok(d),
        }
    }

    /// Walk `prev` back from `to`, then reverse.  The walk is bounded by the
    /// node count: a longer chain means the predecessor data is corrupt.
    pub fn path(&self, from: TilePos, to: TilePos) -> GraphResult<Vec<TilePos>> {
        let n = self.positions.len();
        let i = self.node_index(from)?;
        let j = self.node_index(to)?;
        if self.dist[i * n + j] == UNREACHABLE {
            return Err(GraphError::Unreachable { from, to });
        }

        let mut path = vec![to];
        let mut cur = j;
        let mut steps = 0;
        while cur != i {
            if steps >= n {
                return Err(GraphError::SearchExhausted { from, to, steps });
            }
            let p = self.prev[i * n + cur];
            if p == NO_NODE {
                return Err(GraphError::Unreachable { from, to });
            }
            cur = p as usize;
            path.push(self.positions[cur]);
            steps += 1;
        }
        path.reverse();
        Ok(path)
    }

    pub fn centers(&self) -> GraphResult<&[TilePos]> {
        match &self.centers {
            Ok(c) => Ok(c.as_slice()),
            Err(e) => Err(e.clone()),
        }
    }

    /// Largest distance from `pos` to any node.
    pub fn eccentricity(&self, pos: TilePos) -> GraphResult<u32> {
        let n = self.positions.len();
        let i = self.node_index(pos)?;
        let row = &self.dist[i * n..(i + 1) * n];
        match row.iter().position(|&d| d == UNREACHABLE) {
            Some(j) => Err(GraphError::Unreachable { from: pos, to: self.positions[j] }),
            None => Ok(row.iter().copied().max().unwrap_or(0)),
        }
    }
}

fn compute_centers(positions: &[TilePos], dist: &[u32]) -> GraphResult<Vec<TilePos>> {
    let n = positions.len();
    if n == 0 {
        return Err(GraphError::Empty);
    }
    let mut eccentricity = Vec::with_capacity(n);
    for i in 0..n {
        let row = &dist[i * n..(i + 1) * n];
        if let Some(j) = row.iter().position(|&d| d == UNREACHABLE) {
            return Err(GraphError::Unreachable { from: positions[i], to: positions[j] });
        }
        eccentricity.push(row.iter().copied().max().unwrap_or(0));
    }
    let radius = eccentricity.iter().copied().min().unwrap_or(0);
    Ok(positions
        .iter()
        .zip(&eccentricity)
        .filter(|(_, e)| **e == radius)
        .map(|(p, _)| *p)
        .collect())
}
