//! Routing trait plus A* and Dijkstra implementations.
//!
//! # Pluggability
//!
//! [`RoadNetwork`](crate::RoadNetwork) routes through the [`Router`] trait so
//! callers can swap the search.  [`AStarRouter`] is the default and uses the
//! straight-line distance to the target as its heuristic.  That heuristic is
//! admissible and consistent as long as no road is shorter than the
//! straight line between its endpoints, which holds for lengths measured
//! along the geometry in the same CRS units as the coordinates.  When that
//! cannot be guaranteed, use [`DijkstraRouter`].
//!
//! # Cost units
//!
//! Costs are the stored edge `length` values summed as `f64`; no unit
//! conversion happens here.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use nav_core::NodeId;

use crate::graph::RoutableGraph;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// Result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes in travel order, source first and target last.  A route whose
    /// source and target coincide holds exactly one node.
    pub nodes: Vec<NodeId>,
    /// Sum of the traversed edge lengths.
    pub length: f64,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
pub trait Router: Send + Sync {
    /// Compute a minimum-length route from `from` to `to`.
    ///
    /// Returns [`SpatialError::NoPath`] when the nodes lie in different
    /// connected components; never an empty or partial route.
    fn route(&self, graph: &RoutableGraph, from: NodeId, to: NodeId) -> SpatialResult<Route>;
}

/// A* search with a Euclidean-distance heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarRouter;

impl Router for AStarRouter {
    fn route(&self, graph: &RoutableGraph, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        let target = graph.node_coord(to)?;
        search(graph, from, to, |n| graph.node_pos[n.index()].distance(target))
    }
}

/// Plain Dijkstra (A* with a zero heuristic).
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &RoutableGraph, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        graph.node_coord(to)?;
        search(graph, from, to, |_| 0.0)
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

fn search(
    graph: &RoutableGraph,
    from: NodeId,
    to: NodeId,
    heuristic: impl Fn(NodeId) -> f64,
) -> SpatialResult<Route> {
    let source = graph.node_coord(from)?;
    if from == to {
        return Ok(Route { nodes: vec![from], length: 0.0 });
    }

    let n = graph.node_count();
    // g[v] = best known path length from `from` to v.
    let mut g      = vec![f64::INFINITY; n];
    let mut prev   = vec![NodeId::INVALID; n];
    let mut closed = vec![false; n];

    g[from.index()] = 0.0;

    // Min-heap on f = g + h.  NodeId is the secondary key so equal-f entries
    // pop in a fixed order and repeated queries return identical routes.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(heuristic(from)), from)));

    while let Some(Reverse((_, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(&prev, from, to, g[to.index()]));
        }
        if closed[node.index()] {
            continue;
        }
        closed[node.index()] = true;

        let g_node = g[node.index()];
        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            if closed[neighbor.index()] {
                continue;
            }
            let tentative = g_node + graph.edge_length[edge.index()];
            if tentative < g[neighbor.index()] {
                g[neighbor.index()] = tentative;
                prev[neighbor.index()] = node;
                heap.push(Reverse((OrderedFloat(tentative + heuristic(neighbor)), neighbor)));
            }
        }
    }

    Err(SpatialError::NoPath { from: source, to: graph.node_pos[to.index()] })
}

fn reconstruct(prev: &[NodeId], from: NodeId, to: NodeId, length: f64) -> Route {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    Route { nodes, length }
}
