//! CSV loader for already-routable edge lists.
//!
//! # CSV format
//!
//! One row per undirected road.  Endpoints are given by coordinate; rows
//! sharing an exact coordinate share a node.
//!
//! ```csv
//! x1,y1,x2,y2,length,access
//! 0,0,100,0,100.0,all
//! 100,0,100,50,50.0,walking|cycling
//! 100,0,200,0,100.0,driving
//! ```
//!
//! **`access`** is `all` or a `|`-separated list of `driving`, `walking`,
//! `cycling`.  Only rows open to the requested [`NetworkType`] end up in the
//! graph.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use nav_core::{Access, Coord, NetworkType};

use crate::graph::{GraphBuilder, RoutableGraph};
use crate::{SpatialError, SpatialResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EdgeRecord {
    x1:     f64,
    y1:     f64,
    x2:     f64,
    y2:     f64,
    length: f64,
    access: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a routable graph for `network` from a CSV edge list.
pub fn load_graph_csv(path: &Path, network: NetworkType) -> SpatialResult<RoutableGraph> {
    let file = std::fs::File::open(path)?;
    load_graph_reader(file, network)
}

/// Like [`load_graph_csv`] but accepts any `Read` source.
pub fn load_graph_reader<R: Read>(reader: R, network: NetworkType) -> SpatialResult<RoutableGraph> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = GraphBuilder::new(network);

    for (line, result) in csv_reader.deserialize::<EdgeRecord>().enumerate() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        let access: Access = row
            .access
            .parse()
            .map_err(|e| SpatialError::Parse(format!("row {}: {e}", line + 1)))?;
        builder.add_road_between(
            Coord::new(row.x1, row.y1),
            Coord::new(row.x2, row.y2),
            row.length,
            access,
        );
    }

    builder.build()
}
