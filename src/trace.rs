use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;

use crate::pathing_grid::PathingGrid;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// A cell being finalized by the search, with its final distance from the start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisitEvent {
    pub pos: Point,
    pub distance: u32,
}

/// Terminal message selector handed to a renderer after playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceStatus {
    /// The end was reached over a non-empty path.
    Found,
    /// The frontier ran dry, or the path is empty because start and end coincide.
    Unreachable,
}

/// Everything one search run produced, in the order a renderer should show it.
///
/// `found` and `path` are independent: when start and end coincide the search reports `found`
/// while the path is empty. Inspect both, or use [status](Self::status).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTrace {
    /// Finalized cells in finalization order. Start and end are never part of it.
    pub visited: Vec<VisitEvent>,
    /// Cells from start (exclusive) to end (inclusive), or empty.
    pub path: Vec<Point>,
    pub found: bool,
}

impl SearchTrace {
    pub fn status(&self) -> TraceStatus {
        if self.found && !self.path.is_empty() {
            TraceStatus::Found
        } else {
            TraceStatus::Unreachable
        }
    }

    /// Distance at which `pos` was finalized, if it appears among the visit events.
    pub fn distance_to(&self, pos: Point) -> Option<u32> {
        self.visited
            .iter()
            .find(|e| e.pos == pos)
            .map(|e| e.distance)
    }

    /// Number of playback steps: visit events followed by path cells.
    pub fn step_count(&self) -> usize {
        self.visited.len() + self.path.len()
    }

    /// Sum of the weights of the path cells on `grid`, i.e. the cost of walking the path when
    /// every step is charged the weight of the entered cell.
    pub fn path_cost(&self, grid: &PathingGrid) -> u32 {
        self.path
            .iter()
            .filter_map(|p| grid.weight_at(*p))
            .fold(0u32, |acc, w| acc.saturating_add(w))
    }
}

/// Follows parent indices back from `end` and returns the cells in forward order without the
/// root. `parents` maps each discovered cell to the index of its predecessor and its distance,
/// with `usize::MAX` as the predecessor of the start.
pub(crate) fn reverse_path(parents: &FxIndexMap<Point, (usize, u32)>, end: &Point) -> Vec<Point> {
    let mut path = Vec::new();
    let mut index = parents.get_index_of(end);
    while let Some((node, &(parent, _))) = index.and_then(|i| parents.get_index(i)) {
        if parent == usize::MAX {
            break;
        }
        path.push(*node);
        index = Some(parent);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::at;

    fn parents(entries: &[(Point, usize)]) -> FxIndexMap<Point, (usize, u32)> {
        entries
            .iter()
            .enumerate()
            .map(|(d, &(p, parent))| (p, (parent, d as u32)))
            .collect()
    }

    #[test]
    fn reverse_path_drops_start() {
        // start -> (0,1) -> (1,1)
        let map = parents(&[(at(0, 0), usize::MAX), (at(0, 1), 0), (at(1, 1), 1)]);
        assert_eq!(reverse_path(&map, &at(1, 1)), vec![at(0, 1), at(1, 1)]);
    }

    #[test]
    fn reverse_path_of_start_or_unknown_is_empty() {
        let map = parents(&[(at(0, 0), usize::MAX), (at(0, 1), 0)]);
        assert!(reverse_path(&map, &at(0, 0)).is_empty());
        assert!(reverse_path(&map, &at(3, 3)).is_empty());
    }

    #[test]
    fn status_needs_found_and_path() {
        let mut trace = SearchTrace {
            found: true,
            ..Default::default()
        };
        assert_eq!(trace.status(), TraceStatus::Unreachable);
        trace.path.push(at(0, 1));
        assert_eq!(trace.status(), TraceStatus::Found);
        trace.found = false;
        assert_eq!(trace.status(), TraceStatus::Unreachable);
    }

    #[test]
    fn distance_and_cost_lookups() {
        let mut grid = PathingGrid::new(3).unwrap();
        grid.set_cell_kind(at(0, 1), crate::CellKind::Weight, Some(4))
            .unwrap();
        let trace = SearchTrace {
            visited: vec![VisitEvent {
                pos: at(0, 1),
                distance: 1,
            }],
            path: vec![at(0, 1), at(0, 2), at(1, 2), at(2, 2)],
            found: true,
        };
        assert_eq!(trace.distance_to(at(0, 1)), Some(1));
        assert_eq!(trace.distance_to(at(2, 0)), None);
        assert_eq!(trace.step_count(), 5);
        assert_eq!(trace.path_cost(&grid), 7);
    }
}
