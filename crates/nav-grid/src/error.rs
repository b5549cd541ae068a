use thiserror::Error;

use nav_core::GridPos;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: GridPos, width: u32, height: u32 },

    #[error("no vertices are placed; nearest-vertex index is not built")]
    EmptyIndex,
}

pub type GridResult<T> = Result<T, GridError>;
