use fxhash::FxHashSet;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use log::debug;
use smallvec::SmallVec;

use crate::frontier::Frontier;
use crate::pathing_grid::PathingGrid;
use crate::trace::{reverse_path, FxIndexMap, SearchTrace, VisitEvent};
use crate::N_SMALLVEC_SIZE;

pub mod dijkstra;
pub mod weighted;

pub trait GridSolver {
    /// Cost of stepping from `from` into the neighbouring, passable cell `to`.
    fn cost(&self, grid: &PathingGrid, from: &Point, to: &Point) -> u32;

    /// Passable neighbours of `node` in the fixed neighbour order, with their step cost.
    fn successors(
        &self,
        grid: &PathingGrid,
        node: &Point,
    ) -> SmallVec<[(Point, u32); N_SMALLVEC_SIZE]> {
        grid.passable_neighbours(node)
            .into_iter()
            .map(|p| (p, self.cost(grid, node, &p)))
            .collect()
    }

    /// Runs Dijkstra from the grid's start to its end and records every finalized cell.
    ///
    /// The frontier pops the lowest distance first and, among equal distances, the entry that
    /// was pushed first. Improved distances push a new entry and leave the old one queued; it
    /// is discarded once popped because its cell is already visited. The search stops as soon
    /// as the end is finalized.
    fn search(&self, grid: &PathingGrid) -> SearchTrace {
        let start = grid.start();
        let end = grid.end();
        let mut trace = SearchTrace::default();

        // Cell -> (index of predecessor, best distance). Index order is discovery order.
        let mut parents: FxIndexMap<Point, (usize, u32)> = FxIndexMap::default();
        parents.insert(start, (usize::MAX, 0));
        let mut visited: FxHashSet<Point> = FxHashSet::default();
        let mut to_see: Frontier<usize, u32> = Frontier::seeded(0);

        while let Some((index, _)) = to_see.pop() {
            let Some((&node, &(_, cost))) = parents.get_index(index) else {
                continue;
            };
            if !visited.insert(node) {
                continue;
            }
            if node != start && node != end {
                trace.visited.push(VisitEvent {
                    pos: node,
                    distance: cost,
                });
            }
            if node == end {
                trace.found = true;
                break;
            }
            for (successor, move_cost) in self.successors(grid, &node) {
                let new_cost = cost.saturating_add(move_cost);
                let n = match parents.entry(successor) {
                    Vacant(e) => {
                        let n = e.index();
                        e.insert((index, new_cost));
                        n
                    }
                    Occupied(mut e) => {
                        if new_cost < e.get().1 {
                            e.insert((index, new_cost));
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };
                to_see.push(n, new_cost);
            }
        }

        trace.path = reverse_path(&parents, &end);
        debug!(
            "Search from {} to {}: {} cells finalized, found: {}, path length {}",
            start,
            end,
            trace.visited.len(),
            trace.found,
            trace.path.len()
        );
        trace
    }
}
