use core::fmt;
use std::ops::ControlFlow;

use crate::cell::{CellState, Position};
use crate::grid::Grid;

/// Hooks invoked by the search engine. All of them default to doing nothing.
///
/// `on_expand` runs once per expanded node, after its neighbours were processed and before
/// the node is closed. Returning [ControlFlow::Break] stops the search with
/// [Error::Interrupted](crate::Error::Interrupted).
pub trait SearchObserver<N> {
    /// A node entered the frontier.
    fn on_open(&mut self, _node: &N) {}
    /// A node other than the start finished expanding.
    fn on_close(&mut self, _node: &N) {}
    /// A node strictly between start and goal lies on the returned path. Reported from the
    /// goal side towards the start.
    fn on_path(&mut self, _node: &N) {}
    fn on_expand(&mut self, _node: &N) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<N> SearchObserver<N> for () {}

/// A plain redraw callback, called once per expansion.
impl<N, F: FnMut()> SearchObserver<N> for F {
    fn on_expand(&mut self, _node: &N) -> ControlFlow<()> {
        self();
        ControlFlow::Continue(())
    }
}

/// Kind of notification recorded by a [SearchTrace].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Open,
    Closed,
    Path,
}

impl From<Mark> for CellState {
    fn from(mark: Mark) -> CellState {
        match mark {
            Mark::Open => CellState::Open,
            Mark::Closed => CellState::Closed,
            Mark::Path => CellState::Path,
        }
    }
}

/// Records every notification in emission order so that a front end can replay a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTrace<N = Position> {
    events: Vec<(N, Mark)>,
    expansions: usize,
}

impl<N> Default for SearchTrace<N> {
    fn default() -> Self {
        SearchTrace {
            events: Vec::new(),
            expansions: 0,
        }
    }
}

impl<N> SearchTrace<N> {
    pub fn events(&self) -> &[(N, Mark)] {
        &self.events
    }
    pub fn expansions(&self) -> usize {
        self.expansions
    }
    pub fn count(&self, mark: Mark) -> usize {
        self.events.iter().filter(|(_, m)| *m == mark).count()
    }
    pub fn clear(&mut self) {
        self.events.clear();
        self.expansions = 0;
    }
}

impl<N: Clone> SearchObserver<N> for SearchTrace<N> {
    fn on_open(&mut self, node: &N) {
        self.events.push((node.clone(), Mark::Open));
    }
    fn on_close(&mut self, node: &N) {
        self.events.push((node.clone(), Mark::Closed));
    }
    fn on_path(&mut self, node: &N) {
        self.events.push((node.clone(), Mark::Path));
    }
    fn on_expand(&mut self, _node: &N) -> ControlFlow<()> {
        self.expansions += 1;
        ControlFlow::Continue(())
    }
}

impl SearchTrace<Position> {
    /// Folds the recorded events onto the grid: walls first, then events in order, then the
    /// endpoints on top.
    pub fn paint(&self, grid: &Grid, start: Position, end: Position) -> Board {
        let mut board = Board::from_grid(grid);
        for (pos, mark) in &self.events {
            board.set(*pos, (*mark).into());
        }
        board.set(start, CellState::Start);
        board.set(end, CellState::End);
        board
    }
}

/// Per-cell [CellState] snapshot of a grid, rendered as one character per cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    states: Vec<CellState>,
}

impl Board {
    pub fn from_grid(grid: &Grid) -> Board {
        Board {
            size: grid.size(),
            states: grid
                .cells()
                .map(|c| {
                    if c.is_walkable() {
                        CellState::Unvisited
                    } else {
                        CellState::Wall
                    }
                })
                .collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn state(&self, pos: Position) -> Option<CellState> {
        (pos.row < self.size && pos.col < self.size)
            .then(|| self.states[pos.row * self.size + pos.col])
    }

    /// Out of bounds positions are ignored.
    pub fn set(&mut self, pos: Position, state: CellState) {
        if pos.row < self.size && pos.col < self.size {
            self.states[pos.row * self.size + pos.col] = state;
        }
    }

    pub fn count(&self, state: CellState) -> usize {
        self.states.iter().filter(|s| **s == state).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.states.chunks(self.size.max(1)) {
            let line: String = row.iter().map(CellState::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
