//! Spatial-subsystem error type.

use thiserror::Error;

use nav_core::{Coord, NetworkType, NodeId};

/// Errors produced by `nav-spatial`.
///
/// A missing path-cache entry is not an error; lookups return `None`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("cannot build a coordinate index over zero points")]
    EmptyIndex,

    #[error("routable graph has no nodes")]
    EmptyNetwork,

    #[error("no path from {from} to {to}")]
    NoPath { from: Coord, to: Coord },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("edge {from} -> {to} has invalid length {length}")]
    InvalidLength { from: NodeId, to: NodeId, length: f64 },

    #[error("expected a {expected} network, got {found}")]
    NetworkMismatch { expected: NetworkType, found: NetworkType },

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("path cache encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("could not replace path cache file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
