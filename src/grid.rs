use core::fmt;

use grid_util::Point;
use itertools::iproduct;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, CellStatus, Distance};
use crate::config::{ConfigError, GridConfig};
use crate::{CellId, N_SMALLVEC_SIZE};

/// The two cells a search runs between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    Start,
    Finish,
}

/// [Grid] owns the [Cell]s of a `rows` x `columns` board in row-major order and is the only
/// place where walls and endpoints are changed, so that at most one cell is the start, at
/// most one is the finish and the [start](Self::start)/[finish](Self::finish) accessors always
/// agree with the cell flags.
///
/// Like a pathing grid it also maintains a [UnionFind] of free cells to answer reachability
/// queries without searching.
#[derive(Debug)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    start: Option<CellId>,
    finish: Option<CellId>,
    allow_diagonal_move: bool,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Grid {
    /// Builds a grid without walls or endpoints using 4-directional adjacency.
    pub fn new(rows: usize, columns: usize) -> Result<Grid, ConfigError> {
        Grid::with_walls(rows, columns, &[], false)
    }

    /// Builds a grid, marking the cells in `walls` as walls. Ids outside of the grid are
    /// ignored.
    pub fn with_walls(
        rows: usize,
        columns: usize,
        walls: &[CellId],
        allow_diagonal_move: bool,
    ) -> Result<Grid, ConfigError> {
        let config = GridConfig::new(rows, columns)
            .with_walls(walls.iter().copied())
            .with_diagonal_move(allow_diagonal_move)
            .with_start(None)
            .with_finish(None);
        Grid::from_config(&config)
    }

    /// Builds a grid from a [GridConfig], including its start and finish placement.
    pub fn from_config(config: &GridConfig) -> Result<Grid, ConfigError> {
        config.validate()?;
        let (rows, columns) = (config.rows, config.columns);
        let mut cells = iproduct!(0..rows, 0..columns)
            .map(|(row, column)| Cell::new(row * columns + column, row, column))
            .collect::<Vec<Cell>>();
        for id in config.valid_walls() {
            cells[id].mark_as_wall(true);
        }
        for cell in cells.iter_mut() {
            let neighbors =
                neighbor_ids(cell.row(), cell.column(), rows, columns, config.allow_diagonal_move);
            cell.set_neighbors(neighbors);
        }
        let mut grid = Grid {
            rows,
            columns,
            cells,
            start: None,
            finish: None,
            allow_diagonal_move: config.allow_diagonal_move,
            components: UnionFind::new(rows * columns),
            components_dirty: false,
        };
        for (endpoint, id) in [(Endpoint::Start, config.start), (Endpoint::Finish, config.finish)] {
            if let Some(id) = id {
                if grid.cells[id].is_wall() {
                    debug!("Lifting initial wall {} to place the {:?}", id, endpoint);
                    grid.set_wall(id, false);
                }
                grid.set_endpoint(endpoint, Some(id));
            }
        }
        grid.generate_components();
        info!(
            "Built {}x{} grid with {} walls",
            rows,
            columns,
            grid.walls().len()
        );
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn columns(&self) -> usize {
        self.columns
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn allow_diagonal_move(&self) -> bool {
        self.allow_diagonal_move
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id)
    }
    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id)
    }
    pub fn cell_at(&self, row: usize, column: usize) -> Option<&Cell> {
        self.id_at(row, column).and_then(|id| self.cell(id))
    }
    pub fn id_at(&self, row: usize, column: usize) -> Option<CellId> {
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }
    /// Maps a point with `x` as column and `y` as row to a cell id.
    pub fn id_at_point(&self, point: Point) -> Option<CellId> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        self.id_at(point.y as usize, point.x as usize)
    }
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub fn start(&self) -> Option<CellId> {
        self.start
    }
    pub fn finish(&self) -> Option<CellId> {
        self.finish
    }
    pub fn endpoint(&self, endpoint: Endpoint) -> Option<CellId> {
        match endpoint {
            Endpoint::Start => self.start,
            Endpoint::Finish => self.finish,
        }
    }
    pub fn start_cell(&self) -> Option<&Cell> {
        self.start.and_then(|id| self.cell(id))
    }
    pub fn finish_cell(&self) -> Option<&Cell> {
        self.finish.and_then(|id| self.cell(id))
    }

    /// Ids of all wall cells in ascending order.
    pub fn walls(&self) -> Vec<CellId> {
        self.cells
            .iter()
            .filter(|c| c.is_wall())
            .map(Cell::id)
            .collect()
    }

    /// A free cell is neither a wall nor an endpoint.
    pub fn is_free(&self, id: CellId) -> bool {
        self.cell(id)
            .is_some_and(|c| !c.is_wall() && !c.is_endpoint())
    }

    pub fn set_start(&mut self, id: Option<CellId>) -> bool {
        self.set_endpoint(Endpoint::Start, id)
    }

    pub fn set_finish(&mut self, id: Option<CellId>) -> bool {
        self.set_endpoint(Endpoint::Finish, id)
    }

    /// Moves `endpoint` to `id`, unsetting the previous holder first. `None` only clears the
    /// previous holder. Unknown ids and walls are refused and leave the grid untouched.
    pub fn set_endpoint(&mut self, endpoint: Endpoint, id: Option<CellId>) -> bool {
        if let Some(id) = id {
            match self.cell(id) {
                Some(cell) if !cell.is_wall() => {}
                _ => {
                    debug!("Refusing to place {:?} on cell {}", endpoint, id);
                    return false;
                }
            }
        }
        match endpoint {
            Endpoint::Start => {
                if let Some(previous) = self.start.take() {
                    self.cells[previous].unset_as_start();
                }
                if let Some(id) = id {
                    // The cell may be losing the finish role to the start.
                    if self.finish == Some(id) {
                        self.finish = None;
                    }
                    self.cells[id].set_as_start();
                    self.start = Some(id);
                }
            }
            Endpoint::Finish => {
                if let Some(previous) = self.finish.take() {
                    self.cells[previous].unset_as_finish();
                }
                if let Some(id) = id {
                    if self.start == Some(id) {
                        self.start = None;
                    }
                    self.cells[id].set_as_finish();
                    self.finish = Some(id);
                }
            }
        }
        debug!("{:?} is now {:?}", endpoint, id);
        self.debug_assert_endpoints();
        true
    }

    /// Sets or clears the wall flag of a cell. The cell loses any endpoint role it had.
    /// Joins newly connected components and flags the components as dirty if components are
    /// (potentially) broken apart into multiple.
    pub fn set_wall(&mut self, id: CellId, is_wall: bool) {
        let Some(cell) = self.cells.get_mut(id) else {
            return;
        };
        let was_wall = cell.is_wall();
        cell.mark_as_wall(is_wall);
        if self.start == Some(id) {
            self.start = None;
        }
        if self.finish == Some(id) {
            self.finish = None;
        }
        if is_wall && !was_wall {
            self.components_dirty = true;
        } else if !is_wall && was_wall {
            for n in self.free_neighbors(id) {
                self.components.union(id, n);
            }
        }
        self.debug_assert_endpoints();
    }

    /// Clears the search state of every cell. Walls, endpoints and adjacency are kept and the
    /// start keeps its zero distance.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset();
        }
        if let Some(start) = self.start {
            self.cells[start].set_distance(Distance::Finite(0));
        }
    }

    fn free_neighbors(&self, id: CellId) -> SmallVec<[CellId; N_SMALLVEC_SIZE]> {
        self.cells[id]
            .neighbors()
            .iter()
            .copied()
            .filter(|&n| !self.cells[n].is_wall())
            .collect()
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: CellId, goal: CellId) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Walls are only connected to
    /// themselves.
    pub fn unreachable(&self, start: CellId, goal: CellId) -> bool {
        if start < self.len() && goal < self.len() {
            !self.components.equiv(start, goal)
        } else {
            true
        }
    }

    /// Whether a wall was painted since the components were last generated. Reachability
    /// answers may be stale until [update](Self::update) runs.
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.len());
        self.components_dirty = false;
        for id in 0..self.len() {
            if self.cells[id].is_wall() {
                continue;
            }
            for n in self.free_neighbors(id) {
                if n > id {
                    self.components.union(id, n);
                }
            }
        }
    }

    fn debug_assert_endpoints(&self) {
        debug_assert!(
            self.cells.iter().filter(|c| c.is_start()).count() <= 1,
            "more than one start cell"
        );
        debug_assert!(
            self.cells.iter().filter(|c| c.is_finish()).count() <= 1,
            "more than one finish cell"
        );
        debug_assert!(self.start.map_or(true, |id| self.cells[id].is_start()));
        debug_assert!(self.finish.map_or(true, |id| self.cells[id].is_finish()));
        debug_assert!(self
            .cells
            .iter()
            .all(|c| !c.is_start() || self.start == Some(c.id())));
        debug_assert!(self
            .cells
            .iter()
            .all(|c| !c.is_finish() || self.finish == Some(c.id())));
    }
}

/// Neighbour ids in the order above-left, above, above-right, right, below-left, below,
/// below-right, left. Diagonals are only included when `allow_diagonal_move` is set.
fn neighbor_ids(
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
    allow_diagonal_move: bool,
) -> SmallVec<[CellId; N_SMALLVEC_SIZE]> {
    let id = |r: usize, c: usize| r * columns + c;
    let has_left = column > 0;
    let has_right = column + 1 < columns;
    let mut neighbors = SmallVec::new();
    if row > 0 {
        if allow_diagonal_move && has_left {
            neighbors.push(id(row - 1, column - 1));
        }
        neighbors.push(id(row - 1, column));
        if allow_diagonal_move && has_right {
            neighbors.push(id(row - 1, column + 1));
        }
    }
    if has_right {
        neighbors.push(id(row, column + 1));
    }
    if row + 1 < rows {
        if allow_diagonal_move && has_left {
            neighbors.push(id(row + 1, column - 1));
        }
        neighbors.push(id(row + 1, column));
        if allow_diagonal_move && has_right {
            neighbors.push(id(row + 1, column + 1));
        }
    }
    if has_left {
        neighbors.push(id(row, column - 1));
    }
    neighbors
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            let line = row
                .iter()
                .map(|cell| {
                    if cell.is_start() {
                        'S'
                    } else if cell.is_finish() {
                        'F'
                    } else if cell.is_wall() {
                        '#'
                    } else {
                        match cell.status() {
                            CellStatus::Path => '*',
                            CellStatus::Visited => 'o',
                            CellStatus::Unvisited => '.',
                        }
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
