//! Pedestrian network with a persistent path cache.
//!
//! The cache is populated explicitly by the caller:
//!
//! 1. [`get_cached_path`](WalkwayNetwork::get_cached_path) — on a hit, done;
//! 2. on a miss, [`shortest_path`](WalkwayNetwork::shortest_path);
//! 3. [`cache_path`](WalkwayNetwork::cache_path) with the result.
//!
//! Nothing here fills the cache behind the caller's back.

use log::info;

use nav_core::{Coord, Crs, NetworkType};

use crate::cache::{CacheConfig, PathCache};
use crate::graph::RoutableGraph;
use crate::network::RoadNetwork;
use crate::router::Route;
use crate::{SpatialError, SpatialResult};

/// A walking [`RoadNetwork`] plus a region-scoped [`PathCache`].
pub struct WalkwayNetwork {
    network: RoadNetwork,
    region:  String,
    cache:   PathCache,
}

impl WalkwayNetwork {
    /// Build the network from a walking graph and load the region's cache.
    ///
    /// Fails if the graph is empty or was not built for
    /// [`NetworkType::Walking`].  A missing or unreadable cache file is not an
    /// error.
    pub fn new(graph: RoutableGraph, crs: Crs, cache: CacheConfig) -> SpatialResult<Self> {
        if graph.network_type() != NetworkType::Walking {
            return Err(SpatialError::NetworkMismatch {
                expected: NetworkType::Walking,
                found:    graph.network_type(),
            });
        }
        let network = RoadNetwork::new(graph, crs)?;
        let path_cache = PathCache::load(&cache);
        info!("walkway for {} has {} cached paths", cache.region, path_cache.len());
        Ok(Self { network, region: cache.region, cache: path_cache })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// The underlying road network.
    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    /// Replace the walking graph; the node index is rebuilt before returning.
    /// Cached paths are kept.
    pub fn replace_graph(&mut self, graph: RoutableGraph) -> SpatialResult<()> {
        if graph.network_type() != NetworkType::Walking {
            return Err(SpatialError::NetworkMismatch {
                expected: NetworkType::Walking,
                found:    graph.network_type(),
            });
        }
        self.network.replace_graph(graph)
    }

    // ── Cache ─────────────────────────────────────────────────────────────

    /// Previously cached path from `source` to `target`, if any.
    pub fn get_cached_path(&self, source: Coord, target: Coord) -> Option<&[Coord]> {
        self.cache.get(source, target)
    }

    /// Cache `path` for `(source, target)` and its reverse for
    /// `(target, source)`, then write the cache file.
    pub fn cache_path(&mut self, source: Coord, target: Coord, path: Vec<Coord>) -> SpatialResult<()> {
        self.cache.insert(source, target, path)
    }

    /// Number of cached `(source, target)` keys.
    pub fn cached_paths(&self) -> usize {
        self.cache.len()
    }

    // ── Delegated network queries ─────────────────────────────────────────

    pub fn nearest_node(&self, point: Coord) -> Coord {
        self.network.nearest_node(point)
    }

    pub fn shortest_path(&self, source: Coord, target: Coord) -> SpatialResult<Vec<Coord>> {
        self.network.shortest_path(source, target)
    }

    pub fn route(&self, source: Coord, target: Coord) -> SpatialResult<Route> {
        self.network.route(source, target)
    }
}
