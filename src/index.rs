//! Nearest-neighbour index over vertex positions.
//!
//! A bulk-loaded R*-tree snapshot of the vertex set. The snapshot is taken
//! once, before any merge: queries after a merge still see the original
//! positions.

use kurbo::Point;
use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::vertex::VertexSet;

/// Vertex position tagged with its vertex id.
type IndexedVertex = GeomWithData<[f64; 2], usize>;

/// One query result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: usize,
    pub distance_sq: f64,
}

#[derive(Debug)]
pub struct SpatialIndex {
    tree: RTree<IndexedVertex>,
}

impl SpatialIndex {
    /// Bulk-load every vertex. O(n log n).
    pub fn build(vertices: &VertexSet) -> Self {
        let entries: Vec<IndexedVertex> = vertices
            .iter()
            .map(|v| GeomWithData::new([v.position.x, v.position.y], v.id))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The `k` entries closest to `point`, nearest first.
    ///
    /// A vertex sitting exactly on `point` is included; callers filter it
    /// out by id. Equal distances are ordered by id.
    pub fn nearest(&self, point: Point, k: usize) -> Vec<Neighbor> {
        let mut found: Vec<Neighbor> = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[point.x, point.y])
            .take(k)
            .map(|(entry, distance_sq)| Neighbor {
                id: entry.data,
                distance_sq,
            })
            .collect();
        found.sort_by(|a, b| {
            a.distance_sq
                .total_cmp(&b.distance_sq)
                .then(a.id.cmp(&b.id))
        });
        found
    }

    /// All entries strictly closer than `radius` to `point`, ordered by id.
    pub fn within(&self, point: Point, radius: f64) -> Vec<Neighbor> {
        let radius_sq = radius * radius;
        let mut found: Vec<Neighbor> = self
            .tree
            .locate_within_distance([point.x, point.y], radius_sq)
            .filter_map(|entry| {
                let [x, y] = *entry.geom();
                let distance_sq = (x - point.x).powi(2) + (y - point.y).powi(2);
                (distance_sq < radius_sq).then_some(Neighbor {
                    id: entry.data,
                    distance_sq,
                })
            })
            .collect();
        found.sort_by_key(|n| n.id);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathModel;

    fn index_of(data: &[&str]) -> (VertexSet, SpatialIndex) {
        let paths: Vec<PathModel> = data.iter().map(|d| PathModel::parse(d).unwrap()).collect();
        let set = VertexSet::extract(&paths);
        let index = SpatialIndex::build(&set);
        (set, index)
    }

    #[test]
    fn empty_index_answers_nothing() {
        let (_, index) = index_of(&[]);
        assert!(index.is_empty());
        assert!(index.nearest(Point::ZERO, 2).is_empty());
        assert!(index.within(Point::ZERO, 10.0).is_empty());
    }

    #[test]
    fn nearest_includes_self_first() {
        let (set, index) = index_of(&["M0,0 L10,0", "M10.2,0 L20,0"]);
        assert_eq!(index.len(), 4);
        let p = set.get(1).unwrap();
        let found = index.nearest(p.position, 2);
        assert_eq!(found[0].id, 1);
        assert_eq!(found[0].distance_sq, 0.0);
        assert_eq!(found[1].id, 2);
        assert!((found[1].distance_sq - 0.04).abs() < 1e-9);
    }

    #[test]
    fn nearest_matches_brute_force() {
        let data: Vec<String> = (0..20)
            .map(|i| {
                let x = ((i * 7 + 13) % 50) as f64 * 0.7;
                let y = ((i * 11 + 37) % 50) as f64 * 0.3;
                format!("M{x},{y} L{},{}", y, x)
            })
            .collect();
        let refs: Vec<&str> = data.iter().map(String::as_str).collect();
        let (set, index) = index_of(&refs);

        let query = Point::new(12.3, 4.5);
        let found = index.nearest(query, 5);
        let mut brute: Vec<f64> = set
            .iter()
            .map(|v| (v.position - query).hypot2())
            .collect();
        brute.sort_by(f64::total_cmp);
        for (n, d) in found.iter().zip(&brute) {
            assert!((n.distance_sq - d).abs() < 1e-9);
        }
    }

    #[test]
    fn within_is_strict() {
        let (_, index) = index_of(&["M0,0", "M3,4", "M1,0"]);
        let found = index.within(Point::ZERO, 5.0);
        let ids: Vec<usize> = found.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }
}
