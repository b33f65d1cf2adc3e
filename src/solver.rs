use log::{debug, info, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::astar::astar_with_policy;
use crate::cell::Position;
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::trace::SearchObserver;

/// Uniform cost of moving to an orthogonal neighbour.
pub const STEP_COST: u32 = 1;

/// Outcome of [AstarSearch::find_path]. `cost` and `steps` are present exactly when `found` is.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchResult {
    /// Length of the returned path. Minimal under
    /// [FrontierPolicy::Reprioritize](crate::FrontierPolicy::Reprioritize)
    pub cost: Option<u32>,
    /// Number of moves along the reconstructed path
    pub steps: Option<u32>,
    pub found: bool,
    /// Cells from start to end, both included; empty if nothing was found
    pub path: Vec<Position>,
    /// Number of expanded cells
    pub expanded: usize,
}

impl SearchResult {
    pub fn not_found(expanded: usize) -> SearchResult {
        SearchResult {
            cost: None,
            steps: None,
            found: false,
            path: Vec::new(),
            expanded,
        }
    }

    fn from_path(path: Vec<Position>, cost: u32, expanded: usize) -> SearchResult {
        let steps = path.len().saturating_sub(1) as u32;
        SearchResult {
            cost: Some(cost),
            steps: Some(steps),
            found: true,
            path,
            expanded,
        }
    }
}

/// A* over a [Grid] with the Manhattan distance as heuristic.
#[derive(Clone, Debug, Default)]
pub struct AstarSearch {
    pub config: SearchConfig,
}

impl AstarSearch {
    pub fn new(config: SearchConfig) -> AstarSearch {
        AstarSearch { config }
    }

    /// The heuristic: Manhattan distance to `end`.
    pub fn heuristic(&self, pos: &Position, end: &Position) -> u32 {
        pos.manhattan_distance(end) * STEP_COST
    }

    fn successors(&self, grid: &Grid, pos: &Position) -> SmallVec<[(Position, u32); 4]> {
        grid.cell(*pos)
            .map(|cell| cell.neighbors().iter().map(|&n| (n, STEP_COST)).collect())
            .unwrap_or_default()
    }

    /// Searches for a path from `start` to `end` using the neighbour lists from the last
    /// recomputation. The path is a shortest one when the configured frontier policy
    /// reprioritizes improved cells. The grid must not change during the call. The observer is
    /// notified of frontier insertions, closed cells, path cells and every expansion.
    pub fn find_path<O>(
        &self,
        grid: &Grid,
        start: Position,
        end: Position,
        observer: &mut O,
    ) -> Result<SearchResult>
    where
        O: SearchObserver<Position> + ?Sized,
    {
        grid.cell(start)?;
        grid.cell(end)?;
        if start == end && !self.config.allow_same_endpoints {
            return Err(Error::InvalidEndpoints {
                row: start.row,
                col: start.col,
            });
        }
        if grid.neighbors_dirty() {
            warn!("Searching from {} to {} with stale neighbour lists", start, end);
        }
        if self.config.check_reachability
            && start != end
            && !grid.neighbors_dirty()
            && !grid.reachable(start, end)
        {
            info!("{} is not reachable from {}", end, start);
            return Ok(SearchResult::not_found(0));
        }

        debug!("Computing path from {} to {}", start, end);
        let run = astar_with_policy(
            &start,
            |pos| self.successors(grid, pos),
            |pos| self.heuristic(pos, &end),
            |pos| *pos == end,
            observer,
            self.config.frontier,
        )?;
        let result = match run.solution {
            Some((path, cost)) => SearchResult::from_path(path, cost, run.expanded),
            None => SearchResult::not_found(run.expanded),
        };
        debug!(
            "Search from {} to {} finished: found={} cost={:?} expanded={}",
            start, end, result.found, result.cost, result.expanded
        );
        Ok(result)
    }
}

/// Runs [AstarSearch::find_path] with the default [SearchConfig].
pub fn find_path<O>(
    grid: &Grid,
    start: Position,
    end: Position,
    observer: &mut O,
) -> Result<SearchResult>
where
    O: SearchObserver<Position> + ?Sized,
{
    AstarSearch::default().find_path(grid, start, end, observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{Mark, SearchTrace};

    fn open_grid(size: usize) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        grid.recompute_all_neighbors();
        grid
    }

    /// Asserts that the case in which start and end are equal is handled correctly.
    #[test]
    fn equal_start_end() {
        let grid = open_grid(3);
        let p = Position::new(1, 1);
        let result = find_path(&grid, p, p, &mut ()).unwrap();
        assert!(result.found);
        assert_eq!(result.cost, Some(0));
        assert_eq!(result.steps, Some(0));
        assert_eq!(result.path, vec![p]);

        let strict = AstarSearch::new(SearchConfig::default().with_same_endpoints(false));
        assert_eq!(
            strict.find_path(&grid, p, p, &mut ()),
            Err(Error::InvalidEndpoints { row: 1, col: 1 })
        );
    }

    #[test]
    fn corner_to_corner_on_open_grid() {
        let grid = open_grid(5);
        let result = find_path(&grid, Position::new(0, 0), Position::new(4, 4), &mut ()).unwrap();
        assert!(result.found);
        assert_eq!(result.cost, Some(8));
        assert_eq!(result.steps, Some(8));
        assert_eq!(result.path.len(), 9);
        for pair in result.path.windows(2) {
            assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
        }
    }

    /// Asserts that the optimal path around a single wall is found.
    #[test]
    fn solve_simple_problem() {
        let grid = Grid::from_ascii(
            "
            ...
            .#.
            ...
            ",
        )
        .unwrap();
        let result = find_path(&grid, Position::new(0, 0), Position::new(2, 2), &mut ()).unwrap();
        assert_eq!(result.cost, Some(4));
        assert!(!result.path.contains(&Position::new(1, 1)));
    }

    #[test]
    fn walled_middle_row_blocks() {
        let grid = Grid::from_ascii("...\n###\n...").unwrap();
        let mut trace = SearchTrace::default();
        let result =
            find_path(&grid, Position::new(0, 0), Position::new(2, 2), &mut trace).unwrap();
        assert_eq!(result, SearchResult::not_found(3));
        assert_eq!(trace.expansions(), 3);
        assert_eq!(trace.count(Mark::Path), 0);
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let grid = open_grid(3);
        assert_eq!(
            find_path(&grid, Position::new(0, 0), Position::new(3, 0), &mut ()),
            Err(Error::OutOfBounds {
                row: 3,
                col: 0,
                size: 3
            })
        );
        assert!(find_path(&grid, Position::new(0, 9), Position::new(0, 0), &mut ()).is_err());
    }

    #[test]
    fn reachability_check_skips_expansion() {
        let grid = Grid::from_ascii("...\n###\n...").unwrap();
        let search = AstarSearch::new(SearchConfig::default().with_reachability_check(true));
        let mut redraws = 0;
        let result = search
            .find_path(&grid, Position::new(0, 0), Position::new(2, 2), &mut || redraws += 1)
            .unwrap();
        assert!(!result.found);
        assert_eq!(redraws, 0);

        let reachable = search
            .find_path(&grid, Position::new(0, 0), Position::new(0, 2), &mut ())
            .unwrap();
        assert_eq!(reachable.cost, Some(2));
    }

    #[test]
    fn wall_endpoint_is_never_reached() {
        let grid = Grid::from_ascii("..\n.#").unwrap();
        let result = find_path(&grid, Position::new(0, 0), Position::new(1, 1), &mut ()).unwrap();
        assert!(!result.found);
    }

    #[test]
    fn path_marks_exclude_endpoints() {
        let grid = open_grid(4);
        let start = Position::new(0, 0);
        let end = Position::new(0, 3);
        let mut trace = SearchTrace::default();
        let result = find_path(&grid, start, end, &mut trace).unwrap();
        let marked: Vec<Position> = trace
            .events()
            .iter()
            .filter(|(_, m)| *m == Mark::Path)
            .map(|(p, _)| *p)
            .collect();
        assert_eq!(marked, vec![Position::new(0, 2), Position::new(0, 1)]);
        assert_eq!(result.path, vec![start, Position::new(0, 1), Position::new(0, 2), end]);
        assert!(trace
            .events()
            .iter()
            .all(|(p, m)| !(*p == start && *m == Mark::Closed)));
    }
}
