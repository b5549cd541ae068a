//! Network-type selector, per-edge access sets, and the CRS tag.
//!
//! A routable graph holds exactly one network type.  Raw edges coming from
//! ingestion carry an [`Access`] set; building a graph for a given
//! [`NetworkType`] keeps only the edges whose access set contains it.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use crate::CoreError;

/// Which traversal mode a routable graph was built for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NetworkType {
    #[default]
    Driving,
    Walking,
    Cycling,
}

impl NetworkType {
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkType::Driving => "driving",
            NetworkType::Walking => "walking",
            NetworkType::Cycling => "cycling",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" | "drive" => Ok(NetworkType::Driving),
            "walking" | "walk" => Ok(NetworkType::Walking),
            "cycling" | "bike" => Ok(NetworkType::Cycling),
            other => Err(CoreError::Parse(format!("unknown network type `{other}`"))),
        }
    }
}

// ── Access ───────────────────────────────────────────────────────────────────

/// Set of network types allowed to traverse an edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Access(u8);

impl Access {
    pub const NONE: Access = Access(0);
    pub const DRIVING: Access = Access(1 << 0);
    pub const WALKING: Access = Access(1 << 1);
    pub const CYCLING: Access = Access(1 << 2);
    pub const ALL: Access = Access(0b111);

    #[inline]
    pub fn allows(self, network: NetworkType) -> bool {
        self.0 & Access::from(network).0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<NetworkType> for Access {
    fn from(network: NetworkType) -> Self {
        match network {
            NetworkType::Driving => Access::DRIVING,
            NetworkType::Walking => Access::WALKING,
            NetworkType::Cycling => Access::CYCLING,
        }
    }
}

impl BitOr for Access {
    type Output = Access;
    fn bitor(self, rhs: Access) -> Access {
        Access(self.0 | rhs.0)
    }
}

/// Parses `all` or a `|`-separated list of network type names.
impl FromStr for Access {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Access::ALL);
        }
        s.split('|')
            .filter(|part| !part.trim().is_empty())
            .try_fold(Access::NONE, |acc, part| {
                part.parse::<NetworkType>().map(|n| acc | Access::from(n))
            })
    }
}

// ── Crs ──────────────────────────────────────────────────────────────────────

/// Coordinate reference system identifier, e.g. `epsg:5361`.
///
/// Carried alongside a network so callers can tell which projection its
/// coordinates are in.  No reprojection happens in this workspace.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crs(String);

impl Crs {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
