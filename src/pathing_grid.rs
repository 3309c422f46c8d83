use core::fmt;

use grid_util::point::Point;
use itertools::{iproduct, Itertools};
use log::{debug, info, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, CellKind};
use crate::error::{GridError, Result};
use crate::{
    DEFAULT_GRID_SIZE, DEFAULT_WEIGHT, MAX_GRID_SIZE, MIN_GRID_SIZE, NEIGHBOUR_OFFSETS,
    N_SMALLVEC_SIZE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Terminal {
    Start,
    End,
}

/// [PathingGrid] is the editable square grid searched by the solvers. Cells are stored
/// row-major; the start and end markers are kept as positions next to them so that they can be
/// looked up without scanning.
///
/// The start and end always lie inside the grid on cells that are not obstacles, and the cells
/// under them hold an empty [CellType](crate::CellType). Edits that would break this are rejected.
///
/// Connectivity between passable cells is tracked with a [UnionFind] so that reachability can
/// be queried without searching.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub(crate) size: usize,
    pub(crate) cells: Vec<Cell>,
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::empty(DEFAULT_GRID_SIZE)
    }
}

impl PartialEq for PathingGrid {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.start == other.start
            && self.end == other.end
            && self.cells == other.cells
    }
}

impl Eq for PathingGrid {}

impl PathingGrid {
    /// Creates an empty grid of the given side length with the start in the top left corner and
    /// the end in the bottom right corner.
    pub fn new(size: usize) -> Result<PathingGrid> {
        Self::check_size(size)?;
        Ok(PathingGrid::empty(size))
    }

    pub(crate) fn empty(size: usize) -> PathingGrid {
        let last = size as i32 - 1;
        let mut grid = PathingGrid {
            size,
            cells: vec![Cell::default(); size * size],
            start: Point::new(0, 0),
            end: Point::new(last, last),
            components: UnionFind::new(size * size),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub(crate) fn check_size(size: usize) -> Result<()> {
        if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            Ok(())
        } else {
            Err(GridError::InvalidSize(size))
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn in_bounds(&self, pos: Point) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    /// Row-major index of an in-bounds position.
    pub(crate) fn get_ix_point(&self, pos: &Point) -> usize {
        pos.y as usize * self.size + pos.x as usize
    }

    pub fn cell(&self, pos: Point) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[self.get_ix_point(&pos)])
        } else {
            None
        }
    }

    /// The kind of the cell with the start and end markers taking precedence over the stored
    /// type. If start and end coincide the cell reports [CellKind::Start].
    pub fn kind_at(&self, pos: Point) -> Option<CellKind> {
        let cell = self.cell(pos)?;
        Some(if pos == self.start {
            CellKind::Start
        } else if pos == self.end {
            CellKind::End
        } else {
            cell.cell_type.into()
        })
    }

    pub fn weight_at(&self, pos: Point) -> Option<u32> {
        self.cell(pos).map(|c| c.weight)
    }

    pub fn is_marker(&self, pos: Point) -> bool {
        pos == self.start || pos == self.end
    }

    pub fn is_passable(&self, pos: Point) -> bool {
        self.cell(pos).is_some_and(|c| !c.is_obstacle())
    }

    /// In-bounds orthogonal neighbours of `pos`, in the order of [NEIGHBOUR_OFFSETS].
    pub fn neighborhood_points(&self, pos: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
            .filter(|p| self.in_bounds(*p))
            .collect()
    }

    /// Neighbours of `pos` that can be stepped into.
    pub fn passable_neighbours(&self, pos: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        self.neighborhood_points(pos)
            .into_iter()
            .filter(|p| self.is_passable(*p))
            .collect()
    }

    /// Sets the stored kind of a cell. Returns `Ok(false)` without changing anything if `pos`
    /// holds the start or end marker: markers cannot be painted over through this path.
    ///
    /// A weight cell without an explicit `weight` gets [DEFAULT_WEIGHT]; explicit weights must
    /// lie in `1..=MAX_WEIGHT`. Every other kind resets the weight to 1. [CellKind::Start]
    /// and [CellKind::End] move the marker instead.
    pub fn set_cell_kind(&mut self, pos: Point, kind: CellKind, weight: Option<u32>) -> Result<bool> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        match kind {
            CellKind::Start => return self.move_start(pos).map(|_| true),
            CellKind::End => return self.move_end(pos).map(|_| true),
            _ if self.is_marker(pos) => {
                debug!("Ignoring {:?} edit on marker cell {}", kind, pos);
                return Ok(false);
            }
            _ => {}
        }
        let cell = match kind {
            CellKind::Obstacle => Cell::obstacle(),
            CellKind::Weight => Cell::try_weighted(weight.unwrap_or(DEFAULT_WEIGHT))?,
            _ => Cell::default(),
        };
        self.set_cell(pos, cell);
        Ok(true)
    }

    /// Moves the start marker to `pos`. The previous start cell reverts to empty.
    pub fn move_start(&mut self, pos: Point) -> Result<()> {
        self.move_terminal(Terminal::Start, pos)
    }

    /// Moves the end marker to `pos`. The previous end cell reverts to empty.
    pub fn move_end(&mut self, pos: Point) -> Result<()> {
        self.move_terminal(Terminal::End, pos)
    }

    fn move_terminal(&mut self, terminal: Terminal, pos: Point) -> Result<()> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        if self.cells[self.get_ix_point(&pos)].is_obstacle() {
            warn!("Refusing to move {:?} onto obstacle {}", terminal, pos);
            return Err(GridError::InvalidPlacement(pos));
        }
        let old = match terminal {
            Terminal::Start => self.start,
            Terminal::End => self.end,
        };
        self.set_cell(old, Cell::default());
        self.set_cell(pos, Cell::default());
        match terminal {
            Terminal::Start => self.start = pos,
            Terminal::End => self.end = pos,
        }
        Ok(())
    }

    /// Rebuilds the grid with the new side length. All cells become empty, the start moves to
    /// the top left and the end to the bottom right corner. Invalid sizes leave the grid as is.
    pub fn resize(&mut self, new_size: usize) -> Result<()> {
        if let Err(e) = Self::check_size(new_size) {
            warn!("Rejecting resize from {} to {}", self.size, new_size);
            return Err(e);
        }
        info!("Resizing grid from {} to {}", self.size, new_size);
        *self = PathingGrid::empty(new_size);
        Ok(())
    }

    /// Empties every cell while keeping the size and the start and end positions.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = Cell::default());
        self.generate_components();
    }

    /// Writes a cell. Joins newly connected components and flags the components as dirty if
    /// they are (potentially) broken apart by a new obstacle.
    pub(crate) fn set_cell(&mut self, pos: Point, cell: Cell) {
        let ix = self.get_ix_point(&pos);
        let was_blocked = self.cells[ix].is_obstacle();
        self.cells[ix] = cell;
        if cell.is_obstacle() {
            if !was_blocked {
                self.components_dirty = true;
            }
        } else {
            for n in self.passable_neighbours(&pos) {
                let n_ix = self.get_ix_point(&n);
                self.components.union(ix, n_ix);
            }
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. The answer may be stale while
    /// [components_dirty](Self::components_dirty) is set; call [update](Self::update) first.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.components_dirty {
            warn!("Querying reachability on dirty components");
        }
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            !self
                .components
                .equiv(self.get_ix_point(start), self.get_ix_point(goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components for {0}x{0} grid", self.size);
        let n = self.size as i32;
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for (y, x) in iproduct!(0..n, 0..n) {
            let point = Point::new(x, y);
            if !self.is_passable(point) {
                continue;
            }
            let parent_ix = self.get_ix_point(&point);
            for p in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                if self.is_passable(p) {
                    let ix = self.get_ix_point(&p);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }

    fn symbol(&self, pos: Point) -> char {
        match self.kind_at(pos) {
            Some(CellKind::Start) => 'S',
            Some(CellKind::End) => 'E',
            Some(CellKind::Obstacle) => '#',
            Some(CellKind::Weight) => match self.weight_at(pos) {
                Some(w @ 0..=9) => char::from_digit(w, 10).unwrap_or('+'),
                _ => '+',
            },
            _ => '.',
        }
    }
}

impl fmt::Display for PathingGrid {
    /// One line per row; `S` start, `E` end, `#` obstacle, a digit for a weight cell (`+` above
    /// 9) and `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let n = self.size as i32;
        for y in 0..n {
            writeln!(f, "{}", (0..n).map(|x| self.symbol(Point::new(x, y))).join(""))?;
        }
        Ok(())
    }
}
