//! Configuration for grid generation, search policy and pixel mapping.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::astar::FrontierPolicy;
use crate::cell::Position;
use crate::{DEFAULT_SIZE, DEFAULT_WALL_PROBABILITY};

/// Parameters for randomly generated grids.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    /// Number of rows (and columns) of the square grid
    pub size: usize,
    /// Independent probability of each cell being a wall
    pub wall_probability: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            wall_probability: DEFAULT_WALL_PROBABILITY,
        }
    }
}

impl GridConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_wall_probability(mut self, wall_probability: f64) -> Self {
        self.wall_probability = wall_probability;
        self
    }
}

/// Policy switches for [AstarSearch](crate::AstarSearch).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Accept `start == end` as a trivial search instead of rejecting it
    pub allow_same_endpoints: bool,
    /// Consult the grid's connected components before expanding anything
    pub check_reachability: bool,
    /// What happens to a cell improved while still on the frontier. Only
    /// [FrontierPolicy::Reprioritize] guarantees a minimal cost.
    pub frontier: FrontierPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            allow_same_endpoints: true,
            check_reachability: false,
            frontier: FrontierPolicy::KeepEntry,
        }
    }
}

impl SearchConfig {
    pub fn with_same_endpoints(mut self, allow: bool) -> Self {
        self.allow_same_endpoints = allow;
        self
    }

    pub fn with_reachability_check(mut self, check: bool) -> Self {
        self.check_reachability = check;
        self
    }

    pub fn with_frontier_policy(mut self, frontier: FrontierPolicy) -> Self {
        self.frontier = frontier;
        self
    }
}

/// Square board drawn `width` pixels wide with a status strip of `info_height` pixels below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub width: u32,
    pub info_height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 600,
            info_height: 70,
        }
    }
}

impl Viewport {
    /// Side length in pixels of one cell on a board with `rows` rows.
    pub fn gap(&self, rows: usize) -> u32 {
        if rows == 0 {
            0
        } else {
            self.width / rows as u32
        }
    }

    /// Maps a pixel to the cell below it. Rows run along the horizontal axis,
    /// columns along the vertical one. Pixels in the status strip or past the
    /// last full cell map to nothing.
    pub fn cell_at(&self, x: u32, y: u32, rows: usize) -> Option<Position> {
        let gap = self.gap(rows);
        if gap == 0 {
            return None;
        }
        let (row, col) = ((x / gap) as usize, (y / gap) as usize);
        (row < rows && col < rows).then(|| Position::new(row, col))
    }
}
