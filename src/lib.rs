//! # grid_pathtrace
//!
//! An editable, weighted square grid together with a
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) search that records
//! every step it takes. A search produces a [SearchTrace](trace::SearchTrace): the cells in
//! the order they were finalized and the reconstructed path, which a
//! [Playback](playback::Playback) then replays to a renderer one step at a time.
//!
//! Movement is restricted to the 4-neighbourhood. The frontier pops the smallest tentative
//! distance first and breaks ties by insertion order, so traces are fully deterministic.
//! Cell weights are stored and rendered, but the default [DijkstraSolver](solver::dijkstra::DijkstraSolver)
//! charges a uniform cost of 1 per step; the
//! [WeightedDijkstraSolver](solver::weighted::WeightedDijkstraSolver) charges the weight of the
//! entered cell instead.
pub mod cell;
pub mod editor;
pub mod error;
pub mod frontier;
pub mod pathing_grid;
pub mod playback;
pub mod snapshot;
pub mod solver;
pub mod trace;

use grid_util::point::Point;

pub use cell::{Cell, CellKind, CellType};
pub use error::GridError;
pub use pathing_grid::PathingGrid;
pub use trace::{SearchTrace, TraceStatus, VisitEvent};

/// Smallest side length a grid may have.
pub const MIN_GRID_SIZE: usize = 2;
/// Largest side length a grid may have.
pub const MAX_GRID_SIZE: usize = 50;
/// Side length of a [PathingGrid::default] grid.
pub const DEFAULT_GRID_SIZE: usize = 10;
/// Weight given to a weight cell when none is specified.
pub const DEFAULT_WEIGHT: u32 = 2;
/// Heaviest weight a cell may carry. A path crosses at most `MAX_GRID_SIZE²` cells, so path
/// costs stay well inside `u32`.
pub const MAX_WEIGHT: u32 = 1_000_000;
/// Inline capacity of neighbourhood buffers; a cell has at most 4 orthogonal neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Neighbour offsets as `(dx, dy)`, i.e. +col, +row, -col, -row. The order decides which of
/// several equal-cost predecessors is recorded, so it must not change.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Builds the [Point] for a cell given as `(row, col)`. Points store the column in `x` and
/// the row in `y`.
#[inline]
pub fn at(row: i32, col: i32) -> Point {
    Point::new(col, row)
}
