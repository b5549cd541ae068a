//! Routable graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Roads are undirected: every road is stored as two directed half-edges with
//! the same `length`.  Nodes are keyed by their exact [`Coord`]; adding a
//! coordinate that already exists returns the existing `NodeId`.

use rustc_hash::FxHashMap;

use nav_core::{Access, Coord, EdgeId, NetworkType, NodeId};

use crate::{SpatialError, SpatialResult};

// ── RoutableGraph ─────────────────────────────────────────────────────────────

/// Undirected weighted graph in CSR format, built for one [`NetworkType`].
///
/// Do not construct directly; use [`GraphBuilder`].
pub struct RoutableGraph {
    network: NetworkType,

    /// Coordinate of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Coord>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each half-edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each half-edge.
    pub edge_to: Vec<NodeId>,

    /// Traversal length of each half-edge, in CRS units.
    pub edge_length: Vec<f64>,

    node_lookup: FxHashMap<Coord, NodeId>,
}

impl RoutableGraph {
    pub fn network_type(&self) -> NetworkType {
        self.network
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of directed half-edges (twice the number of roads).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// `NodeId` of the node at exactly `coord`, if any.
    pub fn node_id(&self, coord: Coord) -> Option<NodeId> {
        self.node_lookup.get(&coord).copied()
    }

    pub fn node_coord(&self, node: NodeId) -> SpatialResult<Coord> {
        self.node_pos
            .get(node.index())
            .copied()
            .ok_or(SpatialError::NodeNotFound(node))
    }

    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Shortest stored length of a road between `a` and `b`, if they are
    /// adjacent.
    pub fn edge_length_between(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.out_edges(a)
            .filter(|e| self.edge_to[e.index()] == b)
            .map(|e| self.edge_length[e.index()])
            .min_by(f64::total_cmp)
    }

    /// Map a node sequence to its coordinates.
    pub fn coords_of(&self, nodes: &[NodeId]) -> Vec<Coord> {
        nodes.iter().map(|n| self.node_pos[n.index()]).collect()
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`RoutableGraph`] incrementally, then call [`build`](Self::build).
///
/// Roads are tagged with an [`Access`] set.  `build()` keeps only the roads
/// open to the builder's network type, and drops nodes whose every road was
/// filtered out.  Nodes added without any road are kept.
///
/// # Example
///
/// ```
/// use nav_core::{Coord, NetworkType};
/// use nav_spatial::GraphBuilder;
///
/// let mut b = GraphBuilder::new(NetworkType::Walking);
/// let a = b.add_node(Coord::new(0.0, 0.0));
/// let c = b.add_node(Coord::new(100.0, 0.0));
/// b.add_road(a, c, 100.0);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // both directions
/// ```
pub struct GraphBuilder {
    network:   NetworkType,
    nodes:     Vec<Coord>,
    lookup:    FxHashMap<Coord, NodeId>,
    raw_roads: Vec<RawRoad>,
}

struct RawRoad {
    a:      NodeId,
    b:      NodeId,
    length: f64,
    access: Access,
}

impl GraphBuilder {
    pub fn new(network: NetworkType) -> Self {
        Self {
            network,
            nodes:     Vec::new(),
            lookup:    FxHashMap::default(),
            raw_roads: Vec::new(),
        }
    }

    pub fn network_type(&self) -> NetworkType {
        self.network
    }

    /// Add a node, or return the existing `NodeId` if `pos` is already present.
    pub fn add_node(&mut self, pos: Coord) -> NodeId {
        if let Some(&id) = self.lookup.get(&pos) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.lookup.insert(pos, id);
        id
    }

    /// Add an undirected road open to every network type.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length: f64) {
        self.add_road_with_access(a, b, length, Access::ALL);
    }

    /// Add an undirected road open only to the network types in `access`.
    pub fn add_road_with_access(&mut self, a: NodeId, b: NodeId, length: f64, access: Access) {
        self.raw_roads.push(RawRoad { a, b, length, access });
    }

    /// Convenience for loaders: add both endpoint nodes and the road between
    /// them.
    pub fn add_road_between(&mut self, a: Coord, b: Coord, length: f64, access: Access) {
        let a = self.add_node(a);
        let b = self.add_node(b);
        self.add_road_with_access(a, b, length, access);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn road_count(&self) -> usize { self.raw_roads.len() }

    /// Consume the builder and produce a [`RoutableGraph`].
    ///
    /// Fails with [`SpatialError::InvalidLength`] if any kept road has a
    /// negative or non-finite length.  Node ids are renumbered densely when
    /// nodes are dropped, in their original insertion order.
    pub fn build(self) -> SpatialResult<RoutableGraph> {
        let network = self.network;

        let mut touched = vec![false; self.nodes.len()];
        let mut kept_any = vec![false; self.nodes.len()];
        let mut kept: Vec<&RawRoad> = Vec::with_capacity(self.raw_roads.len());
        for road in &self.raw_roads {
            touched[road.a.index()] = true;
            touched[road.b.index()] = true;
            if !road.access.allows(network) {
                continue;
            }
            if !road.length.is_finite() || road.length < 0.0 {
                return Err(SpatialError::InvalidLength { from: road.a, to: road.b, length: road.length });
            }
            kept_any[road.a.index()] = true;
            kept_any[road.b.index()] = true;
            kept.push(road);
        }

        // Renumber surviving nodes.
        let mut remap = vec![NodeId::INVALID; self.nodes.len()];
        let mut node_pos = Vec::with_capacity(self.nodes.len());
        for (i, &pos) in self.nodes.iter().enumerate() {
            if kept_any[i] || !touched[i] {
                remap[i] = NodeId(node_pos.len() as u32);
                node_pos.push(pos);
            }
        }
        let node_count = node_pos.len();

        // Expand each road into two half-edges and sort by source for CSR.
        let mut half: Vec<(NodeId, NodeId, f64)> = Vec::with_capacity(kept.len() * 2);
        for road in kept {
            let (a, b) = (remap[road.a.index()], remap[road.b.index()]);
            half.push((a, b, road.length));
            half.push((b, a, road.length));
        }
        half.sort_by_key(|&(from, to, _)| (from.0, to.0));

        let edge_from:   Vec<NodeId> = half.iter().map(|e| e.0).collect();
        let edge_to:     Vec<NodeId> = half.iter().map(|e| e.1).collect();
        let edge_length: Vec<f64>    = half.iter().map(|e| e.2).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &half {
            node_out_start[e.0.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, half.len());

        let node_lookup = node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| (pos, NodeId(i as u32)))
            .collect();

        Ok(RoutableGraph {
            network,
            node_pos,
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
            node_lookup,
        })
    }
}
