//! Application state that turns user input into grid edits and search runs.
//!
//! Everything an input handler needs (the grid, the current mode, the drag gesture, the
//! playback in flight) lives in one [Editor] value that handlers receive explicitly.
use grid_util::point::Point;
use log::{info, warn};

use crate::cell::{check_weight, CellKind};
use crate::error::{GridError, Result};
use crate::pathing_grid::PathingGrid;
use crate::playback::{CancelToken, Playback, PlaybackConfig};
use crate::solver::GridSolver;
use crate::DEFAULT_WEIGHT;

/// What a click on a cell does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditMode {
    PlaceStart,
    PlaceEnd,
    #[default]
    ToggleObstacle,
    SetWeight,
    EraseObstacle,
}

#[derive(Clone, Debug)]
pub struct Editor {
    pub grid: PathingGrid,
    pub mode: EditMode,
    pub playback_config: PlaybackConfig,
    brush_weight: u32,
    erasing: bool,
    in_flight: Option<CancelToken>,
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new(PathingGrid::default())
    }
}

impl Editor {
    pub fn new(grid: PathingGrid) -> Editor {
        Editor {
            grid,
            mode: EditMode::default(),
            playback_config: PlaybackConfig::default(),
            brush_weight: DEFAULT_WEIGHT,
            erasing: false,
            in_flight: None,
        }
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
        self.erasing = false;
    }

    pub fn brush_weight(&self) -> u32 {
        self.brush_weight
    }

    /// Weight painted by [EditMode::SetWeight] clicks. Must lie in `1..=MAX_WEIGHT`.
    pub fn set_brush_weight(&mut self, weight: u32) -> Result<()> {
        self.brush_weight = check_weight(weight)?;
        Ok(())
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    /// Applies the current mode to `pos`. Returns whether the grid changed.
    pub fn click(&mut self, pos: Point) -> Result<bool> {
        match self.mode {
            EditMode::PlaceStart => self.grid.move_start(pos).map(|_| true),
            EditMode::PlaceEnd => self.grid.move_end(pos).map(|_| true),
            EditMode::ToggleObstacle => {
                let kind = match self.grid.kind_at(pos) {
                    None => return Err(GridError::OutOfBounds(pos)),
                    Some(CellKind::Obstacle) => CellKind::Empty,
                    Some(_) => CellKind::Obstacle,
                };
                self.grid.set_cell_kind(pos, kind, None)
            }
            EditMode::SetWeight => {
                self.grid
                    .set_cell_kind(pos, CellKind::Weight, Some(self.brush_weight))
            }
            EditMode::EraseObstacle => self.erase(pos),
        }
    }

    /// Mouse button pressed on `pos`. In [EditMode::EraseObstacle] pressing on an obstacle
    /// erases it and starts a drag that erases every obstacle entered until release.
    pub fn press(&mut self, pos: Point) -> Result<bool> {
        if self.mode != EditMode::EraseObstacle || self.grid.is_marker(pos) {
            return Ok(false);
        }
        self.erasing = self.grid.kind_at(pos) == Some(CellKind::Obstacle);
        self.erase(pos)
    }

    /// Pointer entered `pos` while the button may be held.
    pub fn enter(&mut self, pos: Point) -> Result<bool> {
        if !self.erasing || self.mode != EditMode::EraseObstacle {
            return Ok(false);
        }
        self.erase(pos)
    }

    pub fn release(&mut self) {
        self.erasing = false;
    }

    fn erase(&mut self, pos: Point) -> Result<bool> {
        match self.grid.kind_at(pos) {
            None => Err(GridError::OutOfBounds(pos)),
            Some(CellKind::Obstacle) => self.grid.set_cell_kind(pos, CellKind::Empty, None),
            Some(_) => Ok(false),
        }
    }

    /// Rebuilds the grid at `size`. A rejected size leaves the grid and any playback in
    /// flight untouched.
    pub fn resize(&mut self, size: usize) -> Result<()> {
        PathingGrid::check_size(size)?;
        self.cancel_in_flight();
        self.grid.resize(size)
    }

    pub fn clear(&mut self) {
        self.cancel_in_flight();
        self.grid.clear();
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            if !token.is_cancelled() {
                warn!("Abandoning playback in flight");
            }
            token.cancel();
        }
    }

    /// Searches a snapshot of the current grid and returns the playback for it. Any playback
    /// started by an earlier run is cancelled first; its marks are cleared when the new one
    /// plays.
    pub fn run<S: GridSolver + ?Sized>(&mut self, solver: &S) -> Playback {
        self.cancel_in_flight();
        let snapshot = self.grid.clone();
        info!(
            "Running search from {} to {} on {}x{} grid",
            snapshot.start(),
            snapshot.end(),
            snapshot.size(),
            snapshot.size()
        );
        let trace = solver.search(&snapshot);
        let token = CancelToken::new();
        self.in_flight = Some(token.clone());
        Playback::new(trace, self.playback_config, token)
    }
}
