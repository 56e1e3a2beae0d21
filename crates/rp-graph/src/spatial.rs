//! Latitude-sorted nearest-node index.
//!
//! # How the search works
//!
//! All node positions are copied into one array sorted ascending by
//! latitude.  A query binary-searches for the insertion point of its
//! latitude (the *pivot*), seeds the best candidate from the pivot entry,
//! then scans outward in both directions.  Each scan stops as soon as the
//! latitude gap alone exceeds the current best Euclidean distance — valid
//! because `|Δlat|` is a lower bound on the true distance, so nothing
//! further out in that direction can win.
//!
//! Complexity: O(log n) for the pivot plus a scan sized by local point
//! density along the latitude axis.  Degenerates to O(n) when many nodes
//! share near-identical latitudes — a documented characteristic of the
//! structure, not a defect.

use rp_core::{GeoPoint, NodeId};

use crate::network::RoadGraph;

/// Immutable nearest-node index over a finalized [`RoadGraph`].
///
/// Build once, query many; safe for concurrent read access.
pub struct SpatialIndex {
    /// `(position, node)` entries sorted ascending by latitude.
    by_lat: Vec<(GeoPoint, NodeId)>,
}

impl SpatialIndex {
    /// Copy every node's position and sort by latitude.  O(n log n), once.
    pub fn build(graph: &RoadGraph) -> Self {
        let mut by_lat: Vec<(GeoPoint, NodeId)> = graph
            .node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| (pos, NodeId(i as u32)))
            .collect();
        by_lat.sort_unstable_by(|a, b| a.0.lat.total_cmp(&b.0.lat));
        Self { by_lat }
    }

    pub fn len(&self) -> usize {
        self.by_lat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_lat.is_empty()
    }

    /// The graph node closest to `query` by Euclidean distance.
    ///
    /// Returns `None` only for an empty graph.  Ties resolve to an
    /// unspecified one of the equally-near nodes.
    pub fn nearest(&self, query: GeoPoint) -> Option<NodeId> {
        if self.by_lat.is_empty() {
            return None;
        }

        // Insertion point of the query latitude, clamped into range.
        let pivot = self
            .by_lat
            .partition_point(|&(pos, _)| pos.lat < query.lat)
            .min(self.by_lat.len() - 1);

        let mut best = pivot;
        let mut best_dist = self.by_lat[pivot].0.distance_to(query);

        // Scan up (increasing latitude), then down, each cut off once the
        // latitude gap alone rules out any further improvement.
        for i in pivot + 1..self.by_lat.len() {
            if (self.by_lat[i].0.lat - query.lat).abs() > best_dist {
                break;
            }
            let d = self.by_lat[i].0.distance_to(query);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }
        for i in (0..pivot).rev() {
            if (self.by_lat[i].0.lat - query.lat).abs() > best_dist {
                break;
            }
            let d = self.by_lat[i].0.distance_to(query);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }

        Some(self.by_lat[best].1)
    }
}
