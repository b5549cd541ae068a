//! Nearest-point index over a fixed set of 2-D coordinates.
//!
//! An R-tree (via `rstar`) answers "which stored point is closest to Q" in
//! logarithmic time.  Each stored point carries a payload `T` (a `NodeId` for
//! road networks, a `GridPos` for the vertex grid), so a query resolves to
//! the owning object directly instead of going back through a rounded
//! coordinate.
//!
//! The index is immutable: when the underlying point set changes, build a new
//! one.  Building over zero points fails with [`SpatialError::EmptyIndex`].

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use nav_core::Coord;

use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: the point plus its position in build order.
#[derive(Clone)]
struct IndexEntry {
    point: [f64; 2],
    seq: u32,
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for IndexEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── CoordIndex ────────────────────────────────────────────────────────────────

/// Nearest-neighbour index over a non-empty point set.
///
/// Points and payloads are kept in build order and exposed through
/// [`points`](Self::points) / [`point`](Self::point) for reverse lookup.
pub struct CoordIndex<T = usize> {
    tree: RTree<IndexEntry>,
    points: Vec<Coord>,
    payloads: Vec<T>,
}

impl CoordIndex<usize> {
    /// Index bare points; the payload of each point is its build position.
    pub fn from_points(points: impl IntoIterator<Item = Coord>) -> SpatialResult<Self> {
        Self::build(points.into_iter().enumerate().map(|(i, p)| (p, i)))
    }
}

impl<T> CoordIndex<T> {
    /// Bulk-load the index from `(point, payload)` pairs.
    ///
    /// Time complexity: O(N log N).
    pub fn build(entries: impl IntoIterator<Item = (Coord, T)>) -> SpatialResult<Self> {
        let (points, payloads): (Vec<Coord>, Vec<T>) = entries.into_iter().unzip();
        if points.is_empty() {
            return Err(SpatialError::EmptyIndex);
        }

        let items: Vec<IndexEntry> = points
            .iter()
            .enumerate()
            .map(|(i, p)| IndexEntry { point: p.to_array(), seq: i as u32 })
            .collect();

        Ok(Self { tree: RTree::bulk_load(items), points, payloads })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: an index cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The indexed points in build order.
    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    /// Reverse lookup: build position → stored coordinate.
    pub fn point(&self, i: usize) -> Option<Coord> {
        self.points.get(i).copied()
    }

    /// The stored point nearest to `query` (Euclidean), returned by value
    /// exactly as it was indexed.
    pub fn nearest(&self, query: Coord) -> Coord {
        self.points[self.nearest_seq(query)]
    }

    /// Nearest stored point together with its payload.
    pub fn nearest_entry(&self, query: Coord) -> (Coord, &T) {
        let i = self.nearest_seq(query);
        (self.points[i], &self.payloads[i])
    }

    /// Up to `k` entries ordered by ascending distance from `query`.
    pub fn k_nearest(&self, query: Coord, k: usize) -> Vec<(Coord, &T)> {
        self.tree
            .nearest_neighbor_iter(&query.to_array())
            .take(k)
            .map(|e| (self.points[e.seq as usize], &self.payloads[e.seq as usize]))
            .collect()
    }

    /// Build position of the nearest point.
    ///
    /// Equidistant candidates resolve to the one indexed first, so repeated
    /// queries against the same index always agree.
    fn nearest_seq(&self, query: Coord) -> usize {
        let mut best = (usize::MAX, f64::INFINITY);
        for (entry, d2) in self.tree.nearest_neighbor_iter_with_distance_2(&query.to_array()) {
            if d2 > best.1 {
                break;
            }
            best = (best.0.min(entry.seq as usize), d2);
        }
        best.0
    }
}
