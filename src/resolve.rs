//! Merge resolver: snap near-coincident cross-path vertices together.
//!
//! Two strategies:
//! - **Pairwise** (default): every vertex, in id order, looks up its
//!   nearest cross-path neighbour and, if it is closer than the threshold,
//!   both move to their midpoint. A vertex merges at most once, so chains
//!   over three or more paths resolve pair by pair, not as one average.
//! - **Cluster**: all cross-path pairs under the threshold are unioned,
//!   and each group collapses to its mean. Two vertices of the same path
//!   never share a group.
//!
//! Neither strategy rebuilds the index after moving vertices.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use kurbo::Point;
use petgraph::unionfind::UnionFind;
use tracing::{debug, trace};

use crate::config::{AlignConfig, MergeStrategy};
use crate::error::Degenerate;
use crate::geom::{centroid, midpoint};
use crate::index::SpatialIndex;
use crate::path::PathModel;
use crate::vertex::VertexSet;

/// Counters from one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Merges performed (pairs for pairwise, unions for cluster).
    pub pairs: usize,
    /// Vertices whose position actually changed.
    pub moved_vertices: usize,
    /// Groups of two or more vertices snapped to one point.
    pub groups: usize,
    /// Set when there was nothing to align.
    pub degenerate: Option<Degenerate>,
}

#[derive(Debug, Clone)]
pub struct Resolver {
    threshold: f64,
    neighbors: usize,
    strategy: MergeStrategy,
}

impl Resolver {
    pub fn new(config: &AlignConfig) -> Self {
        Self {
            threshold: config.threshold,
            neighbors: config.neighbors.max(2),
            strategy: config.strategy,
        }
    }

    /// Merge near-coincident vertices in place.
    ///
    /// `index` must have been built from `vertices` before any mutation.
    pub fn resolve(
        &self,
        paths: &mut [PathModel],
        vertices: &mut VertexSet,
        index: &SpatialIndex,
    ) -> ResolveStats {
        if let Some(degenerate) = degenerate(vertices) {
            return ResolveStats {
                degenerate: Some(degenerate),
                ..ResolveStats::default()
            };
        }
        if index.is_empty() {
            return ResolveStats::default();
        }
        match self.strategy {
            MergeStrategy::Pairwise => self.pairwise(paths, vertices, index),
            MergeStrategy::Cluster => self.cluster(paths, vertices, index),
        }
    }

    fn pairwise(
        &self,
        paths: &mut [PathModel],
        vertices: &mut VertexSet,
        index: &SpatialIndex,
    ) -> ResolveStats {
        let mut stats = ResolveStats::default();
        let mut merged = vec![false; vertices.len()];

        for id in 0..vertices.len() {
            if merged[id] {
                continue;
            }
            let Some(p) = vertices.get(id).copied() else {
                continue;
            };
            let candidate = index
                .nearest(p.position, self.neighbors)
                .into_iter()
                .filter_map(|n| vertices.get(n.id))
                .find(|q| q.id != p.id && q.path != p.path)
                .copied();
            let Some(q) = candidate else {
                continue;
            };
            if merged[q.id] {
                continue;
            }
            let distance = p.position.distance(q.position);
            if distance >= self.threshold {
                continue;
            }

            let m = midpoint(p.position, q.position);
            trace!(p = p.id, q = q.id, distance, x = m.x, y = m.y, "merge pair");
            stats.moved_vertices += move_to(vertices, paths, p.id, m);
            stats.moved_vertices += move_to(vertices, paths, q.id, m);
            merged[p.id] = true;
            merged[q.id] = true;
            stats.pairs += 1;
            stats.groups += 1;
        }

        debug!(
            pairs = stats.pairs,
            moved = stats.moved_vertices,
            "pairwise resolution done"
        );
        stats
    }

    fn cluster(
        &self,
        paths: &mut [PathModel],
        vertices: &mut VertexSet,
        index: &SpatialIndex,
    ) -> ResolveStats {
        let mut stats = ResolveStats::default();
        let n = vertices.len();
        let mut sets: UnionFind<usize> = UnionFind::new(n);
        // Paths present in each group, keyed by the group's root.
        let mut group_paths: HashMap<usize, BTreeSet<usize>> = vertices
            .iter()
            .map(|v| (v.id, BTreeSet::from([v.path])))
            .collect();

        for p in vertices.iter() {
            for neighbor in index.within(p.position, self.threshold) {
                let Some(q) = vertices.get(neighbor.id) else {
                    continue;
                };
                if q.id <= p.id || q.path == p.path {
                    continue;
                }
                let (rp, rq) = (sets.find(p.id), sets.find(q.id));
                if rp == rq {
                    continue;
                }
                let disjoint = match (group_paths.get(&rp), group_paths.get(&rq)) {
                    (Some(a), Some(b)) => a.is_disjoint(b),
                    _ => false,
                };
                if !disjoint {
                    continue;
                }
                sets.union(rp, rq);
                let root = sets.find(p.id);
                let mut merged_paths = group_paths.remove(&rp).unwrap_or_default();
                merged_paths.extend(group_paths.remove(&rq).unwrap_or_default());
                group_paths.insert(root, merged_paths);
                stats.pairs += 1;
            }
        }

        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for id in 0..n {
            groups.entry(sets.find(id)).or_default().push(id);
        }

        for members in groups.values().filter(|m| m.len() > 1) {
            let points: Vec<Point> = members
                .iter()
                .filter_map(|&id| vertices.get(id).map(|v| v.position))
                .collect();
            let Some(center) = centroid(&points) else {
                continue;
            };
            trace!(size = members.len(), x = center.x, y = center.y, "collapse group");
            for &id in members {
                stats.moved_vertices += move_to(vertices, paths, id, center);
            }
            stats.groups += 1;
        }

        debug!(
            unions = stats.pairs,
            groups = stats.groups,
            moved = stats.moved_vertices,
            "cluster resolution done"
        );
        stats
    }
}

/// Nothing to align when there are fewer than two vertices or only one
/// path owns vertices.
pub fn degenerate(vertices: &VertexSet) -> Option<Degenerate> {
    if vertices.len() < 2 {
        Some(Degenerate::TooFewVertices(vertices.len()))
    } else if vertices.path_count() < 2 {
        Some(Degenerate::SinglePath)
    } else {
        None
    }
}

/// Move one vertex; returns 1 if its position changed.
fn move_to(vertices: &mut VertexSet, paths: &mut [PathModel], id: usize, to: Point) -> usize {
    let changed = vertices.get(id).is_some_and(|v| v.position != to);
    vertices.set_position(id, paths, to);
    usize::from(changed)
}
