//! Road network: a routable graph, its CRS tag, and a nearest-node index.
//!
//! The node index is always built over the current graph.  The graph and its
//! index are only ever replaced together, so no query can observe an index
//! built for a previous graph.

use log::info;

use nav_core::{Coord, Crs, NetworkType, NodeId};

use crate::graph::RoutableGraph;
use crate::index::CoordIndex;
use crate::router::{AStarRouter, Route, Router};
use crate::{SpatialError, SpatialResult};

/// Routable graph plus nearest-node lookup and shortest-path queries.
pub struct RoadNetwork {
    graph: RoutableGraph,
    crs:   Crs,
    index: CoordIndex<NodeId>,
}

impl RoadNetwork {
    /// Take ownership of `graph` and index its nodes.
    ///
    /// Fails with [`SpatialError::EmptyNetwork`] if the graph has no nodes.
    pub fn new(graph: RoutableGraph, crs: Crs) -> SpatialResult<Self> {
        let index = index_nodes(&graph)?;
        info!(
            "{} network ready: {} nodes, {} edges, crs {}",
            graph.network_type(),
            graph.node_count(),
            graph.edge_count() / 2,
            crs,
        );
        Ok(Self { graph, crs, index })
    }

    /// Swap in a new graph, rebuilding the node index before returning.
    ///
    /// On error the previous graph and index are left untouched.
    pub fn replace_graph(&mut self, graph: RoutableGraph) -> SpatialResult<()> {
        let index = index_nodes(&graph)?;
        info!(
            "{} network replaced: {} nodes, {} edges",
            graph.network_type(),
            graph.node_count(),
            graph.edge_count() / 2,
        );
        self.graph = graph;
        self.index = index;
        Ok(())
    }

    pub fn graph(&self) -> &RoutableGraph {
        &self.graph
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn network_type(&self) -> NetworkType {
        self.graph.network_type()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Coordinate of the graph node nearest to `point`.
    pub fn nearest_node(&self, point: Coord) -> Coord {
        self.index.nearest(point)
    }

    /// `NodeId` of the graph node nearest to `point`.
    pub fn nearest_node_id(&self, point: Coord) -> NodeId {
        *self.index.nearest_entry(point).1
    }

    /// Up to `k` nearest node coordinates, by ascending distance.
    pub fn k_nearest_nodes(&self, point: Coord, k: usize) -> Vec<Coord> {
        self.index.k_nearest(point, k).into_iter().map(|(c, _)| c).collect()
    }

    /// `NodeId` of the node at exactly `coord`, if it is in the graph.
    pub fn node_id(&self, coord: Coord) -> Option<NodeId> {
        self.graph.node_id(coord)
    }

    pub fn node_coord(&self, node: NodeId) -> SpatialResult<Coord> {
        self.graph.node_coord(node)
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Node coordinates of a shortest path between the nodes nearest to
    /// `source` and `target`.
    ///
    /// Returns a single coordinate when both snap to the same node, and
    /// [`SpatialError::NoPath`] when they lie in different components.
    pub fn shortest_path(&self, source: Coord, target: Coord) -> SpatialResult<Vec<Coord>> {
        let route = self.route(source, target)?;
        Ok(self.graph.coords_of(&route.nodes))
    }

    /// Like [`shortest_path`](Self::shortest_path) but returns node ids and
    /// the total length.
    pub fn route(&self, source: Coord, target: Coord) -> SpatialResult<Route> {
        self.route_with(&AStarRouter, source, target)
    }

    /// Route with a caller-supplied [`Router`].
    pub fn route_with<R: Router + ?Sized>(
        &self,
        router: &R,
        source: Coord,
        target: Coord,
    ) -> SpatialResult<Route> {
        let from = self.nearest_node_id(source);
        let to = self.nearest_node_id(target);
        router.route(&self.graph, from, to)
    }
}

fn index_nodes(graph: &RoutableGraph) -> SpatialResult<CoordIndex<NodeId>> {
    if graph.is_empty() {
        return Err(SpatialError::EmptyNetwork);
    }
    CoordIndex::build(
        graph
            .node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| (pos, NodeId(i as u32))),
    )
}
