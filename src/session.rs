//! Interactive controller state: endpoint selection, running a search and regenerating the
//! board. Drawing and event polling stay with the front end, which calls into a [Session].

use log::{debug, info};
use rand::Rng;

use crate::cell::Position;
use crate::config::{GridConfig, SearchConfig, Viewport};
use crate::error::Result;
use crate::grid::Grid;
use crate::solver::{AstarSearch, SearchResult};
use crate::trace::SearchObserver;

pub const NO_PATH_STATUS: &str = "No possible paths were found!";

/// What a click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Start(Position),
    End(Position),
    /// Wall, out of bounds, or both endpoints already chosen
    Ignored,
}

pub struct Session<R: Rng> {
    grid: Grid,
    config: GridConfig,
    search: AstarSearch,
    rng: R,
    start: Option<Position>,
    end: Option<Position>,
    result: Option<SearchResult>,
    status: String,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GridConfig, mut rng: R) -> Result<Session<R>> {
        let grid = Grid::from_config(&config, &mut rng)?;
        Ok(Session {
            grid,
            config,
            search: AstarSearch::default(),
            rng,
            start: None,
            end: None,
            result: None,
            status: String::new(),
        })
    }

    pub fn with_search_config(mut self, config: SearchConfig) -> Self {
        self.search = AstarSearch::new(config);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Edits walls between runs. Neighbour lists are refreshed by [run](Self::run).
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Fills the start slot first and the end slot second. Walls are never selected. The
    /// start cell itself may be chosen again as end, giving a zero length search.
    pub fn select(&mut self, pos: Position) -> Selection {
        if !self.grid.is_walkable(pos) {
            return Selection::Ignored;
        }
        if self.start.is_none() {
            self.start = Some(pos);
            Selection::Start(pos)
        } else if self.end.is_none() {
            self.end = Some(pos);
            Selection::End(pos)
        } else {
            Selection::Ignored
        }
    }

    pub fn select_pixel(&mut self, viewport: &Viewport, x: u32, y: u32) -> Selection {
        match viewport.cell_at(x, y, self.grid.size()) {
            Some(pos) => self.select(pos),
            None => Selection::Ignored,
        }
    }

    /// Recomputes all neighbour lists and searches between the selected endpoints. Returns
    /// `None` without searching until both endpoints are chosen. The previous result and
    /// status are dropped before searching, so a failed run leaves neither behind.
    pub fn run<O>(&mut self, observer: &mut O) -> Result<Option<&SearchResult>>
    where
        O: SearchObserver<Position> + ?Sized,
    {
        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                debug!("Run requested before both endpoints were selected");
                return Ok(None);
            }
        };
        self.result = None;
        self.status.clear();
        self.grid.recompute_all_neighbors();
        let result = self.search.find_path(&self.grid, start, end, observer)?;
        self.status = if result.found {
            String::new()
        } else {
            NO_PATH_STATUS.to_owned()
        };
        self.result = Some(result);
        Ok(self.result.as_ref())
    }

    /// Draws a fresh random grid and clears the selection, result and status.
    pub fn reset(&mut self) -> Result<()> {
        info!("Resetting session");
        self.grid = Grid::from_config(&self.config, &mut self.rng)?;
        self.start = None;
        self.end = None;
        self.result = None;
        self.status.clear();
        Ok(())
    }

    /// The text shown under the board.
    pub fn status_line(&self) -> String {
        if !self.status.is_empty() {
            return self.status.clone();
        }
        match &self.result {
            Some(SearchResult {
                cost: Some(cost),
                steps: Some(steps),
                ..
            }) => format!("Optimal Path Cost: {}   Steps: {}", cost, steps),
            _ => String::new(),
        }
    }
}
