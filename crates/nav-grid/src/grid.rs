//! Single-occupancy vertex grid.
//!
//! # Layout
//!
//! Cells are stored row-major in one `Vec<Option<A>>`:
//!
//! ```text
//! cells[ row * width + col ]
//! ```
//!
//! # Nearest-vertex index
//!
//! A [`CoordIndex`] over the agents' float positions, with each agent's cell
//! as payload.  Any placement or removal marks the index stale; the next
//! nearest-vertex query rebuilds it before answering, and
//! [`prune_disconnected`](VertexGrid::prune_disconnected) rebuilds it
//! eagerly.  Queries never read an index built for an older occupancy.

use log::debug;

use nav_core::{Coord, GridPos};
use nav_spatial::CoordIndex;

use crate::agent::GridAgent;
use crate::{GridError, GridResult};

/// Moore neighbourhood offsets.
const MOORE: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

pub struct VertexGrid<A> {
    width:  u32,
    height: u32,
    torus:  bool,
    cells:  Vec<Option<A>>,
    occupied: usize,
    index:  Option<CoordIndex<GridPos>>,
    index_stale: bool,
}

impl<A: GridAgent> VertexGrid<A> {
    /// Create an empty `width × height` grid.  With `torus` set, edges wrap
    /// for both neighbourhoods and distances.
    pub fn new(width: u32, height: u32, torus: bool) -> Self {
        let cells = (0..width as usize * height as usize).map(|_| None).collect();
        Self {
            width,
            height,
            torus,
            cells,
            occupied: 0,
            index: None,
            index_stale: false,
        }
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn is_torus(&self) -> bool { self.torus }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    // ── Cell access ───────────────────────────────────────────────────────

    pub fn get(&self, pos: GridPos) -> Option<&A> {
        self.slot(pos).ok().and_then(|i| self.cells[i].as_ref())
    }

    pub fn is_cell_empty(&self, pos: GridPos) -> bool {
        self.get(pos).is_none()
    }

    /// Occupied cells and their agents, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &A)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.as_ref().map(|a| (self.pos_of(i), a)))
    }

    /// Put `agent` into `pos`, evicting and returning any previous occupant.
    pub fn place_or_replace(&mut self, agent: A, pos: GridPos) -> GridResult<Option<A>> {
        let i = self.slot(pos)?;
        let evicted = self.cells[i].replace(agent);
        if evicted.is_none() {
            self.occupied += 1;
        }
        self.index_stale = true;
        Ok(evicted)
    }

    /// Take the agent out of `pos`, if any.
    pub fn remove(&mut self, pos: GridPos) -> Option<A> {
        let i = self.slot(pos).ok()?;
        let removed = self.cells[i].take();
        if removed.is_some() {
            self.occupied -= 1;
            self.index_stale = true;
        }
        removed
    }

    // ── Neighbourhood ─────────────────────────────────────────────────────

    /// Cells in the 8-connected neighbourhood of `pos`, wrapped on a torus
    /// and clipped otherwise.  Never contains `pos` itself or duplicates.
    pub fn moore_neighborhood(&self, pos: GridPos) -> Vec<GridPos> {
        let (w, h) = (self.width as i64, self.height as i64);
        let mut out = Vec::with_capacity(8);
        for (dx, dy) in MOORE {
            let (mut c, mut r) = (pos.col as i64 + dx, pos.row as i64 + dy);
            if self.torus {
                c = c.rem_euclid(w);
                r = r.rem_euclid(h);
            } else if c < 0 || r < 0 || c >= w || r >= h {
                continue;
            }
            let n = GridPos::new(c as u32, r as u32);
            if n != pos && !out.contains(&n) {
                out.push(n);
            }
        }
        out
    }

    /// Agents in the Moore neighbourhood of `pos`.
    pub fn neighbors(&self, pos: GridPos) -> impl Iterator<Item = &A> + '_ {
        self.moore_neighborhood(pos)
            .into_iter()
            .filter_map(move |n| self.get(n))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Cell of the agent whose float position is nearest to `point`.
    pub fn nearest_vertex_pos(&mut self, point: Coord) -> GridResult<GridPos> {
        self.refresh_index();
        let index = self.index.as_ref().ok_or(GridError::EmptyIndex)?;
        Ok(*index.nearest_entry(point).1)
    }

    /// Agent whose float position is nearest to `point`.
    ///
    /// Fails with [`GridError::EmptyIndex`] when no agent is placed.
    pub fn nearest_vertex(&mut self, point: Coord) -> GridResult<&A> {
        let pos = self.nearest_vertex_pos(point)?;
        self.get(pos).ok_or(GridError::EmptyIndex)
    }

    /// Straight-line distance between two continuous positions.  On a torus
    /// each axis takes the shorter of the direct and wrapped-around distance.
    pub fn distance(&self, a: Coord, b: Coord) -> f64 {
        let mut dx = (a.x - b.x).abs();
        let mut dy = (a.y - b.y).abs();
        if self.torus {
            dx = dx.min(self.width as f64 - dx);
            dy = dy.min(self.height as f64 - dy);
        }
        dx.hypot(dy)
    }

    // ── Pruning ───────────────────────────────────────────────────────────

    /// Remove every agent with no occupied Moore neighbour and rebuild the
    /// nearest-vertex index.
    ///
    /// Neighbour occupancy is read from a snapshot taken before any removal,
    /// so the result does not depend on visiting order.  Removed agents are
    /// returned for the caller to drop.
    pub fn prune_disconnected(&mut self) -> Vec<A> {
        let snapshot: Vec<bool> = self.cells.iter().map(Option::is_some).collect();

        let isolated: Vec<usize> = (0..self.cells.len())
            .filter(|&i| snapshot[i])
            .filter(|&i| {
                self.moore_neighborhood(self.pos_of(i))
                    .into_iter()
                    .all(|n| !snapshot[self.flat(n)])
            })
            .collect();

        let removed: Vec<A> = isolated
            .into_iter()
            .filter_map(|i| self.cells[i].take())
            .collect();
        self.occupied -= removed.len();
        debug!("pruned {} disconnected vertices; {} remain", removed.len(), self.occupied);

        self.index_stale = true;
        self.refresh_index();
        removed
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn refresh_index(&mut self) {
        if !self.index_stale {
            return;
        }
        // Building only fails when no agent is placed.
        let index = CoordIndex::build(self.iter().map(|(pos, a)| (a.float_pos(), pos))).ok();
        self.index = index;
        self.index_stale = false;
    }

    fn slot(&self, pos: GridPos) -> GridResult<usize> {
        if pos.col >= self.width || pos.row >= self.height {
            return Err(GridError::OutOfBounds { pos, width: self.width, height: self.height });
        }
        Ok(self.flat(pos))
    }

    #[inline]
    fn flat(&self, pos: GridPos) -> usize {
        pos.row as usize * self.width as usize + pos.col as usize
    }

    #[inline]
    fn pos_of(&self, i: usize) -> GridPos {
        let w = self.width as usize;
        GridPos::new((i % w) as u32, (i / w) as u32)
    }
}
