use grid_util::point::Point;

use crate::{pathing_grid::PathingGrid, solver::GridSolver};

/// Dijkstra with a uniform cost of 1 per step. Cell weights are ignored, which makes the
/// search behave like a breadth-first flood with deterministic tie-breaking.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn cost(&self, _: &PathingGrid, _: &Point, _: &Point) -> u32 {
        1
    }
}
