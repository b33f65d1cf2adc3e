use crate::cell::{Cell, Position};
use crate::config::GridConfig;
use crate::error::{Error, Result};
use core::fmt;
use itertools::iproduct;
use log::info;
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

/// Square arrangement of `size` x `size` [Cell]s stored row-major.
///
/// Neighbour lists are snapshots: after changing walls, call
/// [recompute_all_neighbors](Self::recompute_all_neighbors) before searching. The same call
/// regenerates the [UnionFind] based connected components used by
/// [reachable](Self::reachable).
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    components: UnionFind<usize>,
    neighbors_dirty: bool,
}

impl Grid {
    /// A grid without walls. Neighbour lists start out empty and dirty.
    pub fn new(size: usize) -> Result<Grid> {
        if size == 0 {
            return Err(Error::InvalidSize(size));
        }
        let cells = iproduct!(0..size, 0..size)
            .map(|(row, col)| Cell::new(Position::new(row, col), true))
            .collect();
        Ok(Grid {
            size,
            cells,
            components: UnionFind::new(size * size),
            neighbors_dirty: true,
        })
    }

    /// Allocates `size` x `size` cells, marking each one as a wall with probability
    /// `wall_probability`, drawn from `rng` in row-major order.
    pub fn create<R: Rng + ?Sized>(
        size: usize,
        wall_probability: f64,
        rng: &mut R,
    ) -> Result<Grid> {
        if !(0.0..=1.0).contains(&wall_probability) {
            return Err(Error::InvalidWallProbability(wall_probability));
        }
        let mut grid = Grid::new(size)?;
        for cell in grid.cells.iter_mut() {
            if rng.gen_bool(wall_probability) {
                cell.set_walkable(false);
            }
        }
        info!(
            "Generated {}x{} grid with {} walls",
            size,
            size,
            grid.wall_count()
        );
        Ok(grid)
    }

    pub fn from_config<R: Rng + ?Sized>(config: &GridConfig, rng: &mut R) -> Result<Grid> {
        Grid::create(config.size, config.wall_probability, rng)
    }

    /// Parses a square layout with one line per row, `#` for walls and `.` for floor.
    /// Blank lines and surrounding whitespace are ignored. Neighbours are computed.
    pub fn from_ascii(layout: &str) -> Result<Grid> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let mut grid = Grid::new(rows.len())?;
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != grid.size {
                return Err(Error::MalformedGrid(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    grid.size
                )));
            }
            for (col, c) in line.chars().enumerate() {
                let walkable = match c {
                    '.' => true,
                    '#' => false,
                    other => {
                        return Err(Error::MalformedGrid(format!(
                            "unexpected '{}' at ({}, {})",
                            other, row, col
                        )))
                    }
                };
                grid.set_walkable(Position::new(row, col), walkable)?;
            }
        }
        grid.recompute_all_neighbors();
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn ix(&self, pos: Position) -> Result<usize> {
        if self.contains(pos) {
            Ok(pos.row * self.size + pos.col)
        } else {
            Err(Error::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            })
        }
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell> {
        self.cell(Position::new(row, col))
    }

    pub fn cell(&self, pos: Position) -> Result<&Cell> {
        let ix = self.ix(pos)?;
        Ok(&self.cells[ix])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.cell(pos).map(Cell::is_walkable).unwrap_or(false)
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_walkable()).count()
    }

    /// Updates the wall state of a cell. Neighbour lists, including this cell's, are left
    /// untouched and flagged as stale.
    pub fn set_walkable(&mut self, pos: Position, walkable: bool) -> Result<()> {
        let ix = self.ix(pos)?;
        if self.cells[ix].is_walkable() != walkable {
            self.cells[ix].set_walkable(walkable);
            self.neighbors_dirty = true;
        }
        Ok(())
    }

    /// Whether walls changed since the last
    /// [recompute_all_neighbors](Self::recompute_all_neighbors).
    pub fn neighbors_dirty(&self) -> bool {
        self.neighbors_dirty
    }

    fn walkable_neighbors(&self, pos: Position) -> SmallVec<[Position; 4]> {
        pos.orthogonal_neighbors(self.size)
            .into_iter()
            .filter(|&n| self.is_walkable(n))
            .collect()
    }

    /// Replaces the neighbour list of a single cell with its currently walkable
    /// orthogonal neighbours (down, up, right, left).
    pub fn recompute_neighbors(&mut self, pos: Position) -> Result<()> {
        let ix = self.ix(pos)?;
        let neighbors = self.walkable_neighbors(pos);
        self.cells[ix].neighbors = neighbors;
        Ok(())
    }

    /// Refreshes every neighbour list and regenerates the connected components.
    pub fn recompute_all_neighbors(&mut self) {
        for ix in 0..self.cells.len() {
            let neighbors = self.walkable_neighbors(self.cells[ix].position());
            self.cells[ix].neighbors = neighbors;
        }
        self.generate_components();
        self.neighbors_dirty = false;
    }

    /// Generates a new [UnionFind] structure linking every walkable cell to the
    /// neighbours in its list. Walls stay singleton components.
    fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.cells.len());
        for (ix, cell) in self.cells.iter().enumerate() {
            if !cell.is_walkable() {
                continue;
            }
            for n in cell.neighbors() {
                components.union(ix, n.row * self.size + n.col);
            }
        }
        self.components = components;
    }

    /// Checks whether `end` can be reached from `start` according to the components
    /// built at the last neighbour recomputation. Walls and out of bounds positions are
    /// never reachable.
    pub fn reachable(&self, start: Position, end: Position) -> bool {
        match (self.ix(start), self.ix(end)) {
            (Ok(s), Ok(e)) => {
                self.cells[s].is_walkable()
                    && self.cells[e].is_walkable()
                    && self.components.equiv(s, e)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row
                .iter()
                .map(|c| if c.is_walkable() { '.' } else { '#' })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
