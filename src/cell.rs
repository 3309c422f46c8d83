use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::MAX_WEIGHT;

/// What is stored in a cell. Start and end are not stored per cell; they are tracked as
/// positions by [PathingGrid](crate::PathingGrid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    #[default]
    Empty,
    Obstacle,
    Weight,
}

/// The kind of a cell as seen by an editor or renderer: the stored [CellType] with the start
/// and end markers laid over it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Obstacle,
    Weight,
    Start,
    End,
}

impl From<CellType> for CellKind {
    fn from(cell_type: CellType) -> CellKind {
        match cell_type {
            CellType::Empty => CellKind::Empty,
            CellType::Obstacle => CellKind::Obstacle,
            CellType::Weight => CellKind::Weight,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub cell_type: CellType,
    /// Cost of entering the cell. 1 for every cell that is not a weight cell.
    pub weight: u32,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            cell_type: CellType::Empty,
            weight: 1,
        }
    }
}

impl Cell {
    pub fn obstacle() -> Cell {
        Cell {
            cell_type: CellType::Obstacle,
            weight: 1,
        }
    }
    pub fn weighted(weight: u32) -> Cell {
        Cell {
            cell_type: CellType::Weight,
            weight,
        }
    }
    /// A weight cell, or [GridError::InvalidWeight] unless `1 <= weight <= MAX_WEIGHT`.
    pub fn try_weighted(weight: u32) -> Result<Cell> {
        check_weight(weight).map(Cell::weighted)
    }
    pub fn is_obstacle(&self) -> bool {
        self.cell_type == CellType::Obstacle
    }
    /// Cost of stepping into this cell, [None] for obstacles.
    pub fn entry_cost(&self) -> Option<u32> {
        if self.is_obstacle() {
            None
        } else {
            Some(self.weight)
        }
    }
}

pub(crate) fn check_weight(weight: u32) -> Result<u32> {
    if (1..=MAX_WEIGHT).contains(&weight) {
        Ok(weight)
    } else {
        Err(GridError::InvalidWeight(weight))
    }
}
