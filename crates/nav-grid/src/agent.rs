//! Agents that can occupy a vertex-grid cell.

use nav_core::{AgentId, Coord};

/// Anything placed in a [`VertexGrid`](crate::VertexGrid).
///
/// The grid owns the cell assignment; the agent only supplies the continuous
/// position used for nearest-vertex queries.
pub trait GridAgent {
    fn float_pos(&self) -> Coord;
}

/// Minimal vertex agent: an id and the coordinate of the network node it
/// stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexAgent {
    pub id: AgentId,
    pub float_pos: Coord,
}

impl VertexAgent {
    pub fn new(id: AgentId, float_pos: Coord) -> Self {
        Self { id, float_pos }
    }
}

impl GridAgent for VertexAgent {
    #[inline]
    fn float_pos(&self) -> Coord {
        self.float_pos
    }
}
