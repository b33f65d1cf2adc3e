use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Location of a [Cell] on the grid. Cells are identified by their position alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    /// Sum of absolute row and column differences. This is the exact distance on an
    /// empty 4-connected grid and therefore an admissible, consistent heuristic.
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }

    /// The orthogonal neighbours that exist on a `size` x `size` grid, in the fixed
    /// order down, up, right, left.
    pub fn orthogonal_neighbors(&self, size: usize) -> SmallVec<[Position; 4]> {
        let mut neighbors = SmallVec::new();
        if self.row + 1 < size {
            neighbors.push(Position::new(self.row + 1, self.col));
        }
        if self.row > 0 {
            neighbors.push(Position::new(self.row - 1, self.col));
        }
        if self.col + 1 < size {
            neighbors.push(Position::new(self.row, self.col + 1));
        }
        if self.col > 0 {
            neighbors.push(Position::new(self.row, self.col - 1));
        }
        neighbors
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

/// Presentation state of a cell. Kept apart from any colour scheme; a front end maps
/// each state to whatever it draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellState {
    #[default]
    Unvisited,
    Wall,
    Start,
    End,
    Open,
    Closed,
    Path,
}

impl CellState {
    pub fn symbol(&self) -> char {
        match self {
            CellState::Unvisited => '.',
            CellState::Wall => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Open => 'o',
            CellState::Closed => 'x',
            CellState::Path => '*',
        }
    }
}

/// A single grid location. The neighbour list is a snapshot and is only refreshed by
/// [Grid::recompute_neighbors](crate::Grid::recompute_neighbors) or
/// [Grid::recompute_all_neighbors](crate::Grid::recompute_all_neighbors).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    walkable: bool,
    pub(crate) neighbors: SmallVec<[Position; 4]>,
}

impl Cell {
    pub fn new(position: Position, walkable: bool) -> Cell {
        Cell {
            position,
            walkable,
            neighbors: SmallVec::new(),
        }
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn is_walkable(&self) -> bool {
        self.walkable
    }
    /// Changes the wall state without touching any neighbour list.
    pub fn set_walkable(&mut self, walkable: bool) {
        self.walkable = walkable;
    }
    pub fn neighbors(&self) -> &[Position] {
        &self.neighbors
    }
}
