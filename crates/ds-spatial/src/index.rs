//! Nearest-candidate lookup.
//!
//! A click lands anywhere on the map; spawning is centred on the nearest real
//! map point instead.  An R-tree (via `rstar`) over `[lat, lon]` answers the
//! query, and the few closest entries in degree space are re-ranked by
//! great-circle distance because a degree of longitude shrinks away from the
//! equator.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ds_core::GeoPoint;

use crate::CandidatePoint;

/// How many degree-space neighbours are re-ranked by haversine distance.
const RERANK: usize = 8;

/// Entry stored in the R-tree: a 2-D `[lat, lon]` point with the index of
/// the candidate it came from.
#[derive(Clone)]
struct IndexEntry {
    point: [f64; 2],
    index: usize,
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for IndexEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

/// Spatial index over a candidate slice.  Indices refer back into that slice.
pub struct CandidateIndex {
    tree: RTree<IndexEntry>,
    positions: Vec<GeoPoint>,
}

impl CandidateIndex {
    /// Bulk-load the index (O(n log n)).
    pub fn build(candidates: &[CandidatePoint]) -> Self {
        let entries: Vec<IndexEntry> = candidates
            .iter()
            .enumerate()
            .map(|(index, c)| IndexEntry { point: [c.pos.lat, c.pos.lon], index })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            positions: candidates.iter().map(|c| c.pos).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index of the candidate nearest to `pos`, or `None` if the index is empty.
    pub fn nearest(&self, pos: GeoPoint) -> Option<usize> {
        self.tree
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(RERANK)
            .map(|e| (e.index, pos.distance_km(self.positions[e.index])))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
