use grid_util::point::Point;

use crate::{pathing_grid::PathingGrid, solver::GridSolver};

/// Dijkstra where entering a cell costs that cell's weight. Frontier order, neighbour order and
/// path reconstruction are the same as for [DijkstraSolver](super::dijkstra::DijkstraSolver).
#[derive(Clone, Copy, Debug, Default)]
pub struct WeightedDijkstraSolver;

impl GridSolver for WeightedDijkstraSolver {
    fn cost(&self, grid: &PathingGrid, _: &Point, to: &Point) -> u32 {
        grid.cell(*to).and_then(|c| c.entry_cost()).unwrap_or(1)
    }
}
