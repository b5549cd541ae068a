//! `nav-grid` — discrete grid of network-vertex agents.
//!
//! | Module    | Contents                                   |
//! |-----------|--------------------------------------------|
//! | [`grid`]  | `VertexGrid`                               |
//! | [`agent`] | `GridAgent` trait, `VertexAgent`           |
//! | [`error`] | `GridError`, `GridResult<T>`               |
//!
//! Grid cells usually correspond one-to-one with road-network nodes, but the
//! grid lives in its own discrete coordinate space and does not depend on a
//! `RoadNetwork`.

pub mod agent;
pub mod error;
pub mod grid;


pub use agent::{GridAgent, VertexAgent};
pub use error::{GridError, GridResult};
pub use grid::VertexGrid;
