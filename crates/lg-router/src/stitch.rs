//! Converting a tile path into segment legs.

use std::collections::VecDeque;

use lg_core::TilePos;
use lg_segment::SegmentStore;

use crate::TransitLeg;

/// Split `path` (resource first, building last) into the segments it
/// crosses and the vertex at which it leaves each one.
///
/// Every step `a → b` is attributed to the segments whose graph has that
/// edge.  `b` ends a leg when it is a vertex of the segment, except when the
/// next step `b → c` stays in the same segment: the path only passes
/// through that vertex.  A segment the path leaves and later re-enters gets
/// one leg per visit.
///
/// Returns `None` when the path crosses no segment or takes a step that no
/// segment owns.
pub fn stitch_path(path: &[TilePos], segments: &SegmentStore) -> Option<VecDeque<TransitLeg>> {
    let mut legs: VecDeque<TransitLeg> = VecDeque::new();

    for (i, step) in path.windows(2).enumerate() {
        let (a, b) = (step[0], step[1]);
        let mut owned = false;
        for segment in segments.with_edge(a, b) {
            owned = true;
            if path.get(i + 2).is_some_and(|&c| segment.contains_edge(c, b)) {
                continue;
            }
            if segment.has_vertex(b) {
                legs.push_back(TransitLeg { segment: segment.id(), waypoint: b });
            }
        }
        if !owned {
            return None;
        }
    }

    if legs.is_empty() { None } else { Some(legs) }
}
