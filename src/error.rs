//! Error types for grid_astar

use thiserror::Error;

/// Failures of grid construction and search requests.
///
/// A search that exhausts its frontier is not an error; it is reported through
/// [SearchResult::found](crate::SearchResult::found).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("position ({row}, {col}) is outside a {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("start and end coincide at ({row}, {col})")]
    InvalidEndpoints { row: usize, col: usize },

    #[error("search interrupted after {expanded} expansions")]
    Interrupted { expanded: usize },

    #[error("grid size must be positive, got {0}")]
    InvalidSize(usize),

    #[error("wall probability must lie in [0, 1], got {0}")]
    InvalidWallProbability(f64),

    #[error("malformed grid layout: {0}")]
    MalformedGrid(String),
}

pub type Result<T> = std::result::Result<T, Error>;
