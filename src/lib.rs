//! # grid_astar
//!
//! Path search on square grids using [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! with the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
//! Movement is 4-directional with unit cost. Equal estimates are expanded in insertion order and
//! neighbours are always visited down, up, right, left, so every search is reproducible.
//!
//! By default a cell whose cost improves while it waits on the frontier keeps its queue entry,
//! which reproduces the classic step-by-step visualisation but may return a path longer than
//! the shortest one. [FrontierPolicy::Reprioritize] re-queues such cells and always returns a
//! shortest path.
//!
//! The engine knows nothing about drawing. A [SearchObserver] is told about every cell that is
//! opened, closed or found to lie on the path, and is called once per expansion so a front end
//! can redraw or stop the search.
//!
//! ```
//! use grid_astar::{find_path, Grid, Position};
//!
//! let mut grid = Grid::new(5).unwrap();
//! grid.set_walkable(Position::new(1, 1), false).unwrap();
//! grid.recompute_all_neighbors();
//!
//! let mut redraws = 0;
//! let (start, end) = (Position::new(0, 0), Position::new(4, 4));
//! let result = find_path(&grid, start, end, &mut || redraws += 1).unwrap();
//! assert!(result.found);
//! assert_eq!(result.cost, Some(8));
//! assert_eq!(result.steps, Some(8));
//! assert_eq!(redraws, result.expanded);
//! ```
pub mod astar;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod session;
pub mod solver;
pub mod trace;

pub use crate::astar::{astar, astar_with_policy, AstarRun, FrontierPolicy};
pub use crate::cell::{Cell, CellState, Position};
pub use crate::config::{GridConfig, SearchConfig, Viewport};
pub use crate::error::{Error, Result};
pub use crate::grid::Grid;
pub use crate::session::{Selection, Session};
pub use crate::solver::{find_path, AstarSearch, SearchResult};
pub use crate::trace::{Board, Mark, SearchObserver, SearchTrace};

/// Rows and columns of a default board.
pub const DEFAULT_SIZE: usize = 30;
/// Chance of each generated cell being a wall.
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.25;
