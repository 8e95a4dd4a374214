use crate::grid::Grid;
use crate::CellId;

pub mod dijkstra;
mod frontier;

/// What a single search step reports about a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    /// The cell's shortest distance is final.
    Visited,
    /// The cell lies on the reconstructed path.
    Path,
    /// The cell was selected with an infinite distance: nothing further is reachable.
    Unreachable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStep {
    pub cell: CellId,
    pub kind: StepKind,
}

impl SearchStep {
    pub fn is_path(&self) -> bool {
        self.kind == StepKind::Path
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    Running,
    Succeeded,
    Failed,
}

/// The outcome of a search that was run to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub success: bool,
    pub visited_in_order: Vec<CellId>,
    pub path: Option<Vec<CellId>>,
}

/// A lazy, resumable search. Every call to [step](Search::step) produces at most one event and
/// keeps all working state inside the search, so a driver can pause between calls or stop
/// pulling altogether.
pub trait Search {
    /// Advances the search by one event, or returns [None] once the search is over.
    fn step(&mut self, grid: &mut Grid) -> Option<SearchStep>;

    fn status(&self) -> SearchStatus;

    /// Finalized cells in the order they were finalized.
    fn visited(&self) -> &[CellId];

    /// The start-to-finish path, known as soon as the finish has been reached.
    fn path(&self) -> Option<&[CellId]>;

    fn is_done(&self) -> bool;

    /// Borrows the grid for the rest of the search and yields its steps as an [Iterator].
    fn steps<'a>(&'a mut self, grid: &'a mut Grid) -> Steps<'a, Self>
    where
        Self: Sized,
    {
        Steps { search: self, grid }
    }
}

pub struct Steps<'a, S: Search> {
    search: &'a mut S,
    grid: &'a mut Grid,
}

impl<S: Search> Iterator for Steps<'_, S> {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        self.search.step(self.grid)
    }
}

pub trait GridSolver {
    type Search: Search;

    /// Starts a search on the current state of `grid`. Callers reset the grid beforehand when
    /// they want a search from scratch.
    fn solve(&self, grid: &Grid) -> Self::Search;

    /// Runs a search to completion without animating it.
    fn solve_to_end(&self, grid: &mut Grid) -> Solution {
        let mut search = self.solve(grid);
        search.steps(grid).for_each(drop);
        Solution {
            success: search.status() == SearchStatus::Succeeded,
            visited_in_order: search.visited().to_vec(),
            path: search.path().map(<[CellId]>::to_vec),
        }
    }
}
