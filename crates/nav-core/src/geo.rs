//! Continuous coordinates and discrete grid cells.
//!
//! `Coord` is the identity of a road-network node: two nodes with equal
//! coordinates are the same node.  Equality and hashing therefore compare the
//! exact bit pattern of both components, with `-0.0` folded into `0.0` so the
//! two zero encodings do not split one node into two.  There is no tolerance
//! and no snapping; callers that derive coordinates arithmetically must feed
//! back the exact values the network returned.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A 2-D point in the network's projected coordinate reference system.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance in CRS units.
    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Squared straight-line distance; cheaper when only ordering matters.
    #[inline]
    pub fn distance_2(self, other: Coord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    #[inline]
    fn key_bits(self) -> (u64, u64) {
        // `+ 0.0` maps -0.0 to 0.0 and leaves every other value untouched.
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl PartialEq for Coord {
    fn eq(&self, other: &Self) -> bool {
        self.key_bits() == other.key_bits()
    }
}

impl Eq for Coord {}

impl Hash for Coord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_bits().hash(state);
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Coord {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── GridPos ──────────────────────────────────────────────────────────────────

/// Integer address of a vertex-grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub col: u32,
    pub row: u32,
}

impl GridPos {
    #[inline]
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Cell centre expressed as a continuous coordinate.
    #[inline]
    pub fn to_coord(self) -> Coord {
        Coord::new(self.col as f64, self.row as f64)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.col, self.row)
    }
}
