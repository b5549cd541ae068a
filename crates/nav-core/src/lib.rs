//! `nav-core` — foundational types for the campus navigation workspace.
//!
//! This crate is a dependency of every other `nav-*` crate.  It has no
//! `nav-*` dependencies and only `thiserror` (plus optional `serde`) as
//! external ones.
//!
//! # What lives here
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `NodeId`, `EdgeId`                        |
//! | [`geo`]     | `Coord` (exact-match node key), `GridPos`            |
//! | [`network`] | `NetworkType`, `Access`, `Crs`                       |
//! | [`error`]   | `CoreError`, `CoreResult`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod network;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Coord, GridPos};
pub use ids::{AgentId, EdgeId, NodeId};
pub use network::{Access, Crs, NetworkType};
