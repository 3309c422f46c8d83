//! Plain structural snapshots of a [PathingGrid] for persistence.
//!
//! The JSON form looks like
//! `{"gridSize":3,"start":{"row":0,"col":0},"end":{"row":2,"col":2},"cells":[[{"type":"empty","weight":1},...],...]}`
//! with cells in row-major order. Start and end are not stored per cell.
use grid_util::point::Point;
use serde::{Deserialize, Serialize};

use crate::cell::{check_weight, Cell, CellType};
use crate::error::{GridError, Result};
use crate::pathing_grid::PathingGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl From<Point> for Position {
    fn from(p: Point) -> Position {
        Position { row: p.y, col: p.x }
    }
}

impl From<Position> for Point {
    fn from(p: Position) -> Point {
        Point::new(p.col, p.row)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    #[serde(rename = "type")]
    pub cell_type: CellType,
    pub weight: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    pub grid_size: usize,
    pub start: Position,
    pub end: Position,
    pub cells: Vec<Vec<CellRecord>>,
}

impl PathingGrid {
    pub fn serialize(&self) -> GridSnapshot {
        GridSnapshot {
            grid_size: self.size,
            start: self.start.into(),
            end: self.end.into(),
            cells: self
                .cells
                .chunks(self.size)
                .map(|row| {
                    row.iter()
                        .map(|c| CellRecord {
                            cell_type: c.cell_type,
                            weight: c.weight,
                        })
                        .collect()
                })
                .collect(),
        }
    }

    /// Restores a grid from a snapshot, rejecting snapshots that violate the grid invariants.
    pub fn deserialize(snapshot: &GridSnapshot) -> Result<PathingGrid> {
        let size = snapshot.grid_size;
        PathingGrid::check_size(size)?;
        if snapshot.cells.len() != size || snapshot.cells.iter().any(|row| row.len() != size) {
            return Err(GridError::MalformedSnapshot(format!(
                "cell matrix is not {size}x{size}"
            )));
        }
        let mut grid = PathingGrid::empty(size);
        grid.cells = snapshot
            .cells
            .iter()
            .flatten()
            .map(|r| {
                check_weight(r.weight).map_err(|_| {
                    GridError::MalformedSnapshot(format!("cell weight {} out of range", r.weight))
                })?;
                Ok(match r.cell_type {
                    CellType::Weight => Cell::weighted(r.weight),
                    CellType::Obstacle => Cell::obstacle(),
                    CellType::Empty => Cell::default(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        for (name, pos) in [("start", snapshot.start), ("end", snapshot.end)] {
            let point = Point::from(pos);
            if !grid.is_passable(point) {
                return Err(GridError::MalformedSnapshot(format!(
                    "{name} at {point} is out of bounds or an obstacle"
                )));
            }
        }
        grid.start = snapshot.start.into();
        grid.end = snapshot.end.into();
        for marker in [grid.start, grid.end] {
            let ix = grid.get_ix_point(&marker);
            grid.cells[ix] = Cell::default();
        }
        grid.generate_components();
        Ok(grid)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.serialize())?)
    }

    pub fn from_json(json: &str) -> Result<PathingGrid> {
        let snapshot: GridSnapshot = serde_json::from_str(json)?;
        PathingGrid::deserialize(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{at, CellKind, MAX_WEIGHT};

    fn painted_grid() -> PathingGrid {
        let mut grid = PathingGrid::new(4).unwrap();
        grid.move_start(at(1, 0)).unwrap();
        grid.move_end(at(2, 3)).unwrap();
        grid.set_cell_kind(at(0, 2), CellKind::Obstacle, None).unwrap();
        grid.set_cell_kind(at(3, 1), CellKind::Weight, Some(6)).unwrap();
        grid.set_cell_kind(at(2, 2), CellKind::Weight, None).unwrap();
        grid
    }

    #[test]
    fn snapshot_round_trip() {
        let grid = painted_grid();
        let snapshot = grid.serialize();
        assert_eq!(snapshot.grid_size, 4);
        assert_eq!(snapshot.start, Position { row: 1, col: 0 });
        assert_eq!(snapshot.cells[0][2].cell_type, CellType::Obstacle);
        assert_eq!(snapshot.cells[3][1].weight, 6);
        assert_eq!(snapshot.cells[0][0].weight, 1);
        assert_eq!(PathingGrid::deserialize(&snapshot).unwrap(), grid);
    }

    #[test]
    fn json_field_names() {
        let json = PathingGrid::new(2).unwrap().to_json().unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"gridSize":2,"start":{"row":0,"col":0},"end":{"row":1,"col":1},"cells":"#,
                r#"[[{"type":"empty","weight":1},{"type":"empty","weight":1}],"#,
                r#"[{"type":"empty","weight":1},{"type":"empty","weight":1}]]}"#
            )
        );
    }

    #[test]
    fn restored_components_are_fresh() {
        let mut grid = painted_grid();
        grid.set_cell_kind(at(1, 1), CellKind::Obstacle, None).unwrap();
        assert!(grid.components_dirty);
        let restored = PathingGrid::deserialize(&grid.serialize()).unwrap();
        assert!(!restored.components_dirty);
        assert!(restored.reachable(&restored.start(), &restored.end()));
    }

    #[test]
    fn malformed_snapshots_are_rejected() {
        let good = painted_grid().serialize();

        let mut bad_size = good.clone();
        bad_size.grid_size = 1;
        assert!(matches!(
            PathingGrid::deserialize(&bad_size),
            Err(GridError::InvalidSize(1))
        ));

        let mut ragged = good.clone();
        ragged.cells[2].pop();
        assert!(matches!(
            PathingGrid::deserialize(&ragged),
            Err(GridError::MalformedSnapshot(_))
        ));

        let mut blocked_start = good.clone();
        blocked_start.start = Position { row: 0, col: 2 };
        assert!(matches!(
            PathingGrid::deserialize(&blocked_start),
            Err(GridError::MalformedSnapshot(_))
        ));

        let mut outside_end = good.clone();
        outside_end.end = Position { row: 4, col: 0 };
        assert!(matches!(
            PathingGrid::deserialize(&outside_end),
            Err(GridError::MalformedSnapshot(_))
        ));

        let mut zero_weight = good.clone();
        zero_weight.cells[3][1].weight = 0;
        assert!(matches!(
            PathingGrid::deserialize(&zero_weight),
            Err(GridError::MalformedSnapshot(_))
        ));

        let mut heavy = good;
        heavy.cells[3][1].weight = MAX_WEIGHT + 1;
        assert!(matches!(
            PathingGrid::deserialize(&heavy),
            Err(GridError::MalformedSnapshot(_))
        ));
        heavy.cells[3][1].weight = MAX_WEIGHT;
        assert!(PathingGrid::deserialize(&heavy).is_ok());

        assert!(matches!(
            PathingGrid::from_json("{\"gridSize\": 3}"),
            Err(GridError::Json(_))
        ));
    }
}
