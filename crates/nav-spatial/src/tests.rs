//! Unit tests for nav-spatial.
//!
//! All tests use hand-crafted or seeded random graphs; cache tests write into
//! a fresh temporary directory.

#[cfg(test)]
mod helpers {
    use nav_core::{Coord, Crs, NetworkType, NodeId};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{GraphBuilder, RoadNetwork, RoutableGraph};

    pub fn crs() -> Crs {
        Crs::new("epsg:5361")
    }

    /// Three nodes on a line, unit lengths.
    pub fn line_graph(network: NetworkType) -> RoutableGraph {
        let mut b = GraphBuilder::new(network);
        let n0 = b.add_node(Coord::new(0.0, 0.0));
        let n1 = b.add_node(Coord::new(1.0, 0.0));
        let n2 = b.add_node(Coord::new(2.0, 0.0));
        b.add_road(n0, n1, 1.0);
        b.add_road(n1, n2, 1.0);
        b.build().unwrap()
    }

    /// Five-node network with two candidate routes between n0 and n4.
    ///
    /// ```text
    ///   n3 (0,100) ────200──── n4 (200,100)
    ///    │                      │
    ///   500                    100
    ///    │                      │
    ///   n0 (0,0) ─100─ n1 (100,0) ─100─ n2 (200,0)
    /// ```
    ///
    /// n0→n1→n2→n4 = 300, n0→n3→n4 = 700.
    pub fn grid_network() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = GraphBuilder::new(NetworkType::Driving);
        let n0 = b.add_node(Coord::new(0.0, 0.0));
        let n1 = b.add_node(Coord::new(100.0, 0.0));
        let n2 = b.add_node(Coord::new(200.0, 0.0));
        let n3 = b.add_node(Coord::new(0.0, 100.0));
        let n4 = b.add_node(Coord::new(200.0, 100.0));
        b.add_road(n0, n1, 100.0);
        b.add_road(n1, n2, 100.0);
        b.add_road(n2, n4, 100.0);
        b.add_road(n0, n3, 500.0);
        b.add_road(n3, n4, 200.0);
        (RoadNetwork::new(b.build().unwrap(), crs()).unwrap(), [n0, n1, n2, n3, n4])
    }

    /// Seeded random sparse graph.  Road lengths are never shorter than the
    /// straight line between their endpoints, so the A* heuristic stays
    /// admissible.  Not necessarily connected.
    pub fn random_graph(seed: u64, nodes: usize) -> RoutableGraph {
        let mut rng = SmallRng::seed_from_u64(seed);
        let pos: Vec<Coord> = (0..nodes)
            .map(|_| Coord::new(rng.gen_range(0.0..1_000.0), rng.gen_range(0.0..1_000.0)))
            .collect();

        let mut b = GraphBuilder::new(NetworkType::Walking);
        let ids: Vec<NodeId> = pos.iter().map(|&p| b.add_node(p)).collect();
        for _ in 0..nodes * 3 / 2 {
            let i = rng.gen_range(0..nodes);
            let j = rng.gen_range(0..nodes);
            if i == j {
                continue;
            }
            let detour = rng.gen_range(1.0..1.5);
            b.add_road(ids[i], ids[j], pos[i].distance(pos[j]) * detour);
        }
        b.build().unwrap()
    }

    /// Sum of edge lengths along `nodes`, panicking if two consecutive nodes
    /// are not adjacent.
    pub fn path_length(graph: &RoutableGraph, nodes: &[NodeId]) -> f64 {
        nodes
            .windows(2)
            .map(|w| {
                graph
                    .edge_length_between(w[0], w[1])
                    .unwrap_or_else(|| panic!("{} and {} are not adjacent", w[0], w[1]))
            })
            .sum()
    }
}

// ── Coordinate index ──────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use nav_core::Coord;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{CoordIndex, SpatialError};

    #[test]
    fn empty_build_fails() {
        let r = CoordIndex::from_points(Vec::<Coord>::new());
        assert!(matches!(r, Err(SpatialError::EmptyIndex)));
    }

    #[test]
    fn nearest_returns_stored_point() {
        let idx = CoordIndex::from_points([
            Coord::new(0.0, 0.0),
            Coord::new(10.0, 0.0),
            Coord::new(0.0, 10.0),
        ])
        .unwrap();
        assert_eq!(idx.nearest(Coord::new(8.0, 1.0)), Coord::new(10.0, 0.0));
        assert_eq!(idx.nearest(Coord::new(0.0, 0.0)), Coord::new(0.0, 0.0));
        assert_eq!(idx.nearest(Coord::new(-50.0, 60.0)), Coord::new(0.0, 10.0));
    }

    #[test]
    fn ties_resolve_to_first_built() {
        let pts = [Coord::new(1.0, 0.0), Coord::new(-1.0, 0.0), Coord::new(0.0, 1.0)];
        let idx = CoordIndex::from_points(pts).unwrap();
        for _ in 0..5 {
            assert_eq!(idx.nearest(Coord::new(0.0, 0.0)), Coord::new(1.0, 0.0));
        }

        let reversed = CoordIndex::from_points(pts.into_iter().rev()).unwrap();
        assert_eq!(reversed.nearest(Coord::new(0.0, 0.0)), Coord::new(0.0, 1.0));
    }

    #[test]
    fn matches_brute_force() {
        let mut rng = SmallRng::seed_from_u64(7);
        let pts: Vec<Coord> = (0..500)
            .map(|_| Coord::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)))
            .collect();
        let idx = CoordIndex::from_points(pts.iter().copied()).unwrap();

        for _ in 0..200 {
            let q = Coord::new(rng.gen_range(-120.0..120.0), rng.gen_range(-120.0..120.0));
            let best = pts
                .iter()
                .map(|p| p.distance_2(q))
                .fold(f64::INFINITY, f64::min);
            let got = idx.nearest(q);
            assert!(pts.contains(&got));
            assert_eq!(got.distance_2(q), best);
        }
    }

    #[test]
    fn payload_and_reverse_lookup() {
        let idx = CoordIndex::build([
            (Coord::new(0.0, 0.0), "a"),
            (Coord::new(5.0, 5.0), "b"),
        ])
        .unwrap();
        assert_eq!(idx.nearest_entry(Coord::new(4.0, 4.0)), (Coord::new(5.0, 5.0), &"b"));
        assert_eq!(idx.point(0), Some(Coord::new(0.0, 0.0)));
        assert_eq!(idx.point(2), None);
        assert_eq!(idx.points().len(), 2);
        assert!(!idx.is_empty());
    }

    #[test]
    fn k_nearest_order() {
        let idx = CoordIndex::from_points([
            Coord::new(3.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(2.0, 0.0),
        ])
        .unwrap();
        let near: Vec<Coord> = idx
            .k_nearest(Coord::new(0.0, 0.0), 2)
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(near, vec![Coord::new(1.0, 0.0), Coord::new(2.0, 0.0)]);
    }
}

// ── Graph builder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use nav_core::{Access, Coord, NetworkType, NodeId};

    use crate::{GraphBuilder, SpatialError};

    #[test]
    fn duplicate_coordinates_share_a_node() {
        let mut b = GraphBuilder::new(NetworkType::Driving);
        let a = b.add_node(Coord::new(1.0, 2.0));
        let again = b.add_node(Coord::new(1.0, 2.0));
        assert_eq!(a, again);
        assert_eq!(b.node_count(), 1);
    }

    #[test]
    fn roads_are_undirected() {
        let g = super::helpers::line_graph(NetworkType::Driving);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 4);
        let n1 = g.node_id(Coord::new(1.0, 0.0)).unwrap();
        assert_eq!(g.degree(n1), 2);
        for e in g.out_edges(n1) {
            assert_eq!(g.edge_from[e.index()], n1);
        }
        assert_eq!(g.edge_length_between(NodeId(0), n1), Some(1.0));
        assert_eq!(g.edge_length_between(n1, NodeId(0)), Some(1.0));
        assert_eq!(g.edge_length_between(NodeId(0), NodeId(2)), None);
    }

    #[test]
    fn filters_by_network_type() {
        let mut b = GraphBuilder::new(NetworkType::Walking);
        let a = b.add_node(Coord::new(0.0, 0.0));
        let c = b.add_node(Coord::new(10.0, 0.0));
        let d = b.add_node(Coord::new(20.0, 0.0));
        let lonely = b.add_node(Coord::new(99.0, 99.0));
        b.add_road_with_access(a, c, 10.0, Access::WALKING);
        b.add_road_with_access(c, d, 10.0, Access::DRIVING);
        let _ = lonely;
        let g = b.build().unwrap();

        assert_eq!(g.network_type(), NetworkType::Walking);
        // `d` only had a driving road; the explicitly added lonely node stays.
        assert_eq!(g.node_count(), 3);
        assert!(g.node_id(Coord::new(20.0, 0.0)).is_none());
        assert!(g.node_id(Coord::new(99.0, 99.0)).is_some());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn rejects_invalid_lengths() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let mut b = GraphBuilder::new(NetworkType::Driving);
            let a = b.add_node(Coord::new(0.0, 0.0));
            let c = b.add_node(Coord::new(1.0, 0.0));
            b.add_road(a, c, bad);
            assert!(matches!(b.build(), Err(SpatialError::InvalidLength { .. })));
        }
    }

    #[test]
    fn filtered_invalid_road_is_ignored() {
        let mut b = GraphBuilder::new(NetworkType::Walking);
        let a = b.add_node(Coord::new(0.0, 0.0));
        let c = b.add_node(Coord::new(1.0, 0.0));
        b.add_road_with_access(a, c, -5.0, Access::DRIVING);
        b.add_road_with_access(a, c, 1.0, Access::WALKING);
        assert_eq!(b.build().unwrap().edge_count(), 2);
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use nav_core::{Coord, NetworkType, NodeId};

    use crate::{AStarRouter, DijkstraRouter, GraphBuilder, Router, SpatialError};

    #[test]
    fn trivial_same_node() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let r = AStarRouter.route(net.graph(), n0, n0).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.nodes, vec![n0]);
        assert_eq!(r.length, 0.0);
    }

    #[test]
    fn shortest_route_correct() {
        let (net, [n0, n1, n2, _, n4]) = super::helpers::grid_network();
        let route = AStarRouter.route(net.graph(), n0, n4).unwrap();
        assert_eq!(route.nodes, vec![n0, n1, n2, n4]);
        assert_eq!(route.length, 300.0);
    }

    #[test]
    fn dijkstra_agrees() {
        let (net, [_, _, n2, n3, n4]) = super::helpers::grid_network();
        let a = AStarRouter.route(net.graph(), n3, n2).unwrap();
        let d = DijkstraRouter.route(net.graph(), n3, n2).unwrap();
        assert_eq!(a, d);
        assert_eq!(a.nodes, vec![n3, n4, n2]);
        let a = AStarRouter.route(net.graph(), n4, n3).unwrap();
        assert_eq!(a.length, 200.0);
    }

    #[test]
    fn no_path_disconnected() {
        let mut b = GraphBuilder::new(NetworkType::Driving);
        let a = b.add_node(Coord::new(0.0, 0.0));
        let c = b.add_node(Coord::new(1.0, 0.0));
        let g = b.build().unwrap();
        let result = AStarRouter.route(&g, a, c);
        assert!(matches!(
            result,
            Err(SpatialError::NoPath { from, to }) if from == Coord::new(0.0, 0.0) && to == Coord::new(1.0, 0.0)
        ));
    }

    #[test]
    fn unknown_node() {
        let g = super::helpers::line_graph(NetworkType::Driving);
        let r = AStarRouter.route(&g, NodeId(0), NodeId(17));
        assert!(matches!(r, Err(SpatialError::NodeNotFound(NodeId(17)))));
    }

    #[test]
    fn astar_is_optimal_on_random_graphs() {
        for seed in 0..8 {
            let g = super::helpers::random_graph(seed, 80);
            let n = g.node_count() as u32;
            for i in (0..n).step_by(7) {
                for j in (0..n).step_by(11) {
                    let (from, to) = (NodeId(i), NodeId(j));
                    match (AStarRouter.route(&g, from, to), DijkstraRouter.route(&g, from, to)) {
                        (Ok(a), Ok(d)) => {
                            assert!((a.length - d.length).abs() < 1e-6, "seed {seed}: {} vs {}", a.length, d.length);
                            assert_eq!(a.nodes.first(), Some(&from));
                            assert_eq!(a.nodes.last(), Some(&to));
                            let walked = super::helpers::path_length(&g, &a.nodes);
                            assert!((walked - a.length).abs() < 1e-6);
                        }
                        (Err(SpatialError::NoPath { .. }), Err(SpatialError::NoPath { .. })) => {}
                        (a, d) => panic!("seed {seed}: routers disagree: {a:?} vs {d:?}"),
                    }
                }
            }
        }
    }
}

// ── Road network ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod network {
    use nav_core::{Coord, NetworkType};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{GraphBuilder, RoadNetwork, SpatialError};

    use super::helpers::{crs, line_graph};

    #[test]
    fn empty_graph_rejected() {
        let g = GraphBuilder::new(NetworkType::Driving).build().unwrap();
        assert!(matches!(RoadNetwork::new(g, crs()), Err(SpatialError::EmptyNetwork)));
    }

    #[test]
    fn carries_crs_and_type() {
        let net = RoadNetwork::new(line_graph(NetworkType::Cycling), crs()).unwrap();
        assert_eq!(net.crs().as_str(), "epsg:5361");
        assert_eq!(net.network_type(), NetworkType::Cycling);
    }

    #[test]
    fn line_scenario() {
        let net = RoadNetwork::new(line_graph(NetworkType::Driving), crs()).unwrap();
        let path = net
            .shortest_path(Coord::new(0.1, 0.2), Coord::new(2.2, -0.1))
            .unwrap();
        assert_eq!(path, vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0), Coord::new(2.0, 0.0)]);
        let route = net.route(Coord::new(0.1, 0.2), Coord::new(2.2, -0.1)).unwrap();
        assert_eq!(route.length, 2.0);
    }

    #[test]
    fn same_node_yields_single_coordinate() {
        let net = RoadNetwork::new(line_graph(NetworkType::Driving), crs()).unwrap();
        let path = net
            .shortest_path(Coord::new(0.9, 0.1), Coord::new(1.1, -0.1))
            .unwrap();
        assert_eq!(path, vec![Coord::new(1.0, 0.0)]);
    }

    #[test]
    fn disconnected_is_an_error() {
        let mut b = GraphBuilder::new(NetworkType::Driving);
        let a = b.add_node(Coord::new(0.0, 0.0));
        let c = b.add_node(Coord::new(1.0, 0.0));
        b.add_road(a, c, 1.0);
        b.add_node(Coord::new(50.0, 50.0));
        let net = RoadNetwork::new(b.build().unwrap(), crs()).unwrap();

        let r = net.shortest_path(Coord::new(0.0, 0.0), Coord::new(49.0, 49.0));
        assert!(matches!(r, Err(SpatialError::NoPath { .. })));
    }

    #[test]
    fn nearest_node_is_a_member() {
        let g = super::helpers::random_graph(3, 120);
        let nodes = g.node_pos.clone();
        let net = RoadNetwork::new(g, crs()).unwrap();
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..100 {
            let p = Coord::new(rng.gen_range(-50.0..1_050.0), rng.gen_range(-50.0..1_050.0));
            let n = net.nearest_node(p);
            assert!(nodes.contains(&n));
            assert_eq!(net.node_id(n), Some(net.nearest_node_id(p)));
        }
    }

    #[test]
    fn shortest_path_is_idempotent() {
        let (net, _) = super::helpers::grid_network();
        let a = Coord::new(5.0, 90.0);
        let b = Coord::new(190.0, 10.0);
        let first = net.shortest_path(a, b).unwrap();
        let second = net.shortest_path(a, b).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.first(), Some(&net.nearest_node(a)));
        assert_eq!(first.last(), Some(&net.nearest_node(b)));
    }

    #[test]
    fn replace_graph_rebuilds_index() {
        let mut net = RoadNetwork::new(line_graph(NetworkType::Driving), crs()).unwrap();
        assert_eq!(net.nearest_node(Coord::new(100.0, 100.0)), Coord::new(2.0, 0.0));

        let mut b = GraphBuilder::new(NetworkType::Driving);
        let a = b.add_node(Coord::new(100.0, 100.0));
        let c = b.add_node(Coord::new(101.0, 100.0));
        b.add_road(a, c, 1.0);
        net.replace_graph(b.build().unwrap()).unwrap();

        assert_eq!(net.nearest_node(Coord::new(0.0, 0.0)), Coord::new(100.0, 100.0));
        assert!(net.node_id(Coord::new(2.0, 0.0)).is_none());
    }

    #[test]
    fn failed_replace_keeps_previous_graph() {
        let mut net = RoadNetwork::new(line_graph(NetworkType::Driving), crs()).unwrap();
        let empty = GraphBuilder::new(NetworkType::Driving).build().unwrap();
        assert!(matches!(net.replace_graph(empty), Err(SpatialError::EmptyNetwork)));
        assert_eq!(net.graph().node_count(), 3);
        assert_eq!(net.nearest_node(Coord::new(9.0, 0.0)), Coord::new(2.0, 0.0));
    }

    #[test]
    fn k_nearest_nodes() {
        let net = RoadNetwork::new(line_graph(NetworkType::Driving), crs()).unwrap();
        let near = net.k_nearest_nodes(Coord::new(-1.0, 0.0), 2);
        assert_eq!(near, vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)]);
    }
}

// ── Path cache ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use std::fs;

    use nav_core::Coord;

    use crate::{CacheConfig, PathCache};

    fn path() -> Vec<Coord> {
        vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0), Coord::new(2.0, 0.0)]
    }

    #[test]
    fn config_file_path() {
        let c = CacheConfig::new("campus");
        assert_eq!(c.dir.to_str(), Some(CacheConfig::DEFAULT_DIR));
        let c = c.with_dir("/tmp/x");
        assert_eq!(c.file_path().to_str(), Some("/tmp/x/campus_path_cache.bin"));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PathCache::load(&CacheConfig::new("nowhere").with_dir(dir.path()));
        assert!(cache.is_empty());
        assert!(cache.get(Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)).is_none());
    }

    #[test]
    fn insert_is_symmetric() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = PathCache::load(&CacheConfig::new("sym").with_dir(dir.path()));
        let (a, b) = (Coord::new(0.0, 0.0), Coord::new(2.0, 0.0));
        cache.insert(a, b, path()).unwrap();

        assert_eq!(cache.get(a, b), Some(path().as_slice()));
        let mut rev = path();
        rev.reverse();
        assert_eq!(cache.get(b, a), Some(rev.as_slice()));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config = CacheConfig::new("durable").with_dir(dir.path());
        let (a, b) = (Coord::new(0.0, 0.0), Coord::new(2.0, 0.0));
        PathCache::load(&config).insert(a, b, path()).unwrap();

        let reloaded = PathCache::load(&config);
        assert_eq!(reloaded.get(a, b), Some(path().as_slice()));
        assert_eq!(reloaded.get(b, a).map(|p| p[0]), Some(b));
    }

    #[test]
    fn later_insert_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let config = CacheConfig::new("over").with_dir(dir.path());
        let mut cache = PathCache::load(&config);
        let (a, b) = (Coord::new(0.0, 0.0), Coord::new(2.0, 0.0));
        cache.insert(a, b, path()).unwrap();
        cache.insert(a, b, vec![a, b]).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(b, a), Some([b, a].as_slice()));
        assert_eq!(PathCache::load(&config).get(a, b), Some([a, b].as_slice()));
    }

    #[test]
    fn corrupt_file_is_empty_and_gets_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let config = CacheConfig::new("corrupt").with_dir(dir.path());
        fs::write(config.file_path(), [0xFF, 0x00, 0x13]).unwrap();

        let mut cache = PathCache::load(&config);
        assert!(cache.is_empty());

        let (a, b) = (Coord::new(0.0, 0.0), Coord::new(2.0, 0.0));
        cache.insert(a, b, path()).unwrap();
        assert_eq!(PathCache::load(&config).len(), 2);
    }

    #[test]
    fn creates_missing_directory_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("outputs").join("deeper");
        let config = CacheConfig::new("fresh").with_dir(&nested);
        let mut cache = PathCache::load(&config);
        cache.insert(Coord::new(0.0, 0.0), Coord::new(1.0, 0.0), path()).unwrap();

        let entries: Vec<_> = fs::read_dir(&nested)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("fresh_path_cache.bin")]);
        assert_eq!(cache.file_path(), config.file_path());
    }
}

// ── Walkway network ───────────────────────────────────────────────────────────

#[cfg(test)]
mod walkway {
    use nav_core::{Coord, NetworkType};

    use crate::{CacheConfig, SpatialError, WalkwayNetwork};

    use super::helpers::{crs, line_graph};

    #[test]
    fn requires_walking_graph() {
        let dir = tempfile::tempdir().unwrap();
        let r = WalkwayNetwork::new(
            line_graph(NetworkType::Driving),
            crs(),
            CacheConfig::new("ub").with_dir(dir.path()),
        );
        assert!(matches!(
            r,
            Err(SpatialError::NetworkMismatch { expected: NetworkType::Walking, found: NetworkType::Driving })
        ));
    }

    #[test]
    fn empty_store_lookup_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let w = WalkwayNetwork::new(
            line_graph(NetworkType::Walking),
            crs(),
            CacheConfig::new("ub").with_dir(dir.path()),
        )
        .unwrap();
        assert_eq!(w.region(), "ub");
        assert_eq!(w.cached_paths(), 0);
        assert!(w.get_cached_path(Coord::new(0.0, 0.0), Coord::new(2.0, 0.0)).is_none());
    }

    #[test]
    fn get_compute_store_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config = CacheConfig::new("ub").with_dir(dir.path());
        let mut w = WalkwayNetwork::new(line_graph(NetworkType::Walking), crs(), config.clone()).unwrap();

        let from = w.nearest_node(Coord::new(-0.3, 0.1));
        let to = w.nearest_node(Coord::new(2.4, 0.0));
        assert!(w.get_cached_path(from, to).is_none());

        let path = w.shortest_path(from, to).unwrap();
        // Looking up does not populate.
        assert_eq!(w.cached_paths(), 0);
        w.cache_path(from, to, path.clone()).unwrap();
        assert_eq!(w.get_cached_path(from, to), Some(path.as_slice()));

        let fresh = WalkwayNetwork::new(line_graph(NetworkType::Walking), crs(), config).unwrap();
        assert_eq!(fresh.cached_paths(), 2);
        let back: Vec<Coord> = path.iter().rev().copied().collect();
        assert_eq!(fresh.get_cached_path(to, from), Some(back.as_slice()));
    }

    #[test]
    fn replace_graph_keeps_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = CacheConfig::new("ub").with_dir(dir.path());
        let mut w = WalkwayNetwork::new(line_graph(NetworkType::Walking), crs(), config).unwrap();
        let (a, b) = (Coord::new(0.0, 0.0), Coord::new(1.0, 0.0));
        w.cache_path(a, b, vec![a, b]).unwrap();

        assert!(w.replace_graph(line_graph(NetworkType::Driving)).is_err());
        w.replace_graph(line_graph(NetworkType::Walking)).unwrap();
        assert_eq!(w.get_cached_path(b, a), Some([b, a].as_slice()));
        assert_eq!(w.network().graph().node_count(), 3);
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use nav_core::{Coord, NetworkType};

    use crate::{load_graph_reader, SpatialError};

    const EDGES: &str = "\
x1,y1,x2,y2,length,access
0,0,100,0,100.0,all
100,0,100,50,50.0,walking|cycling
100,0,200,0,100.0,driving
";

    #[test]
    fn walking_subset() {
        let g = load_graph_reader(Cursor::new(EDGES), NetworkType::Walking).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 4);
        assert!(g.node_id(Coord::new(100.0, 50.0)).is_some());
        assert!(g.node_id(Coord::new(200.0, 0.0)).is_none());
    }

    #[test]
    fn driving_subset() {
        let g = load_graph_reader(Cursor::new(EDGES), NetworkType::Driving).unwrap();
        assert_eq!(g.node_count(), 3);
        assert!(g.node_id(Coord::new(200.0, 0.0)).is_some());
        assert!(g.node_id(Coord::new(100.0, 50.0)).is_none());
    }

    #[test]
    fn bad_access_is_parse_error() {
        let csv = "x1,y1,x2,y2,length,access\n0,0,1,0,1.0,boat\n";
        let r = load_graph_reader(Cursor::new(csv), NetworkType::Walking);
        assert!(matches!(r, Err(SpatialError::Parse(_))));
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let csv = "x1,y1,x2,y2,length,access\n0,0,1,zero,1.0,all\n";
        let r = load_graph_reader(Cursor::new(csv), NetworkType::Walking);
        assert!(matches!(r, Err(SpatialError::Parse(_))));
    }

    #[test]
    fn negative_length_rejected() {
        let csv = "x1,y1,x2,y2,length,access\n0,0,1,0,-1.0,all\n";
        let r = load_graph_reader(Cursor::new(csv), NetworkType::Walking);
        assert!(matches!(r, Err(SpatialError::InvalidLength { .. })));
    }
}
