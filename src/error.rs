//! Errors raised when an edit or a snapshot would break the grid's invariants.

use grid_util::point::Point;
use thiserror::Error;

/// Validation failures of the grid model. A failed operation never mutates the grid.
///
/// An unreachable end cell is not an error; it is reported through
/// [SearchTrace](crate::trace::SearchTrace).
#[derive(Error, Debug)]
pub enum GridError {
    #[error("grid size {0} is outside the allowed range of 2 to 50")]
    InvalidSize(usize),

    #[error("cannot place a marker on the obstacle at {0}")]
    InvalidPlacement(Point),

    #[error("position {0} is outside the grid")]
    OutOfBounds(Point),

    #[error("cell weight must be between 1 and 1000000, got {0}")]
    InvalidWeight(u32),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
