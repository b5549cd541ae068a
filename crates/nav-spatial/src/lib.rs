//! `nav-spatial` — nearest-node lookup, routing, and the walkway path cache.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`index`]   | `CoordIndex` (R-tree nearest-point lookup)                  |
//! | [`graph`]   | `RoutableGraph` (CSR), `GraphBuilder`                       |
//! | [`router`]  | `Router` trait, `Route`, `AStarRouter`, `DijkstraRouter`    |
//! | [`network`] | `RoadNetwork` (graph + CRS + node index)                    |
//! | [`cache`]   | `PathCache`, `CacheConfig`                                  |
//! | [`walkway`] | `WalkwayNetwork` (pedestrian network + path cache)          |
//! | [`loader`]  | `load_graph_csv`, `load_graph_reader`                       |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Typical flow
//!
//! ```rust,ignore
//! let graph = load_graph_csv(Path::new("edges.csv"), NetworkType::Walking)?;
//! let mut walkway = WalkwayNetwork::new(graph, Crs::new("epsg:5361"), CacheConfig::new("ub"))?;
//!
//! let from = walkway.nearest_node(home);
//! let to   = walkway.nearest_node(work);
//! let path = match walkway.get_cached_path(from, to) {
//!     Some(p) => p.to_vec(),
//!     None => {
//!         let p = walkway.shortest_path(from, to)?;
//!         walkway.cache_path(from, to, p.clone())?;
//!         p
//!     }
//! };
//! ```

pub mod cache;
pub mod error;
pub mod graph;
pub mod index;
pub mod loader;
pub mod network;
pub mod router;
pub mod walkway;

#[cfg(test)]
mod tests;

pub use cache::{CacheConfig, PathCache};
pub use error::{SpatialError, SpatialResult};
pub use graph::{GraphBuilder, RoutableGraph};
pub use index::CoordIndex;
pub use loader::{load_graph_csv, load_graph_reader};
pub use network::RoadNetwork;
pub use router::{AStarRouter, DijkstraRouter, Route, Router};
pub use walkway::WalkwayNetwork;
