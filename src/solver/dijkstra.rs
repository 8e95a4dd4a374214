use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::{debug, info};
use smallvec::SmallVec;

use crate::cell::Distance;
use crate::grid::Grid;
use crate::solver::frontier::Frontier;
use crate::solver::{GridSolver, Search, SearchStatus, SearchStep, StepKind};
use crate::{CellId, N_SMALLVEC_SIZE};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Dijkstra's algorithm on a uniform-cost grid, emitted one step at a time.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Search = DijkstraSearch;

    fn solve(&self, grid: &Grid) -> DijkstraSearch {
        DijkstraSearch::new(grid)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Searching,
    Tracing { next: usize },
    Done,
}

/// The working state of one Dijkstra run.
///
/// Cells are finalized in order of tentative distance. Among equally distant cells the highest
/// id goes first, which makes the visiting order reproducible. Finalizing a cell writes its
/// visitation order and relaxed neighbour distances into the grid; cell status is left to
/// the driver.
#[derive(Clone, Debug)]
pub struct DijkstraSearch {
    frontier: Frontier,
    tentative: Vec<Distance>,
    visited: Vec<CellId>,
    predecessors: FxIndexMap<CellId, CellId>,
    path: Option<Vec<CellId>>,
    phase: Phase,
    status: SearchStatus,
}

impl DijkstraSearch {
    /// Queues every cell of `grid` at its current distance. Without a start the search is
    /// over before it begins.
    pub fn new(grid: &Grid) -> DijkstraSearch {
        let mut search = DijkstraSearch {
            frontier: Frontier::default(),
            tentative: Vec::with_capacity(grid.len()),
            visited: Vec::new(),
            predecessors: FxIndexMap::default(),
            path: None,
            phase: Phase::Done,
            status: SearchStatus::Failed,
        };
        let Some(start) = grid.start() else {
            info!("No start cell placed, nothing to search");
            return search;
        };
        for cell in grid.cells() {
            search.frontier.insert(cell.id(), cell.distance());
            search.tentative.push(cell.distance());
        }
        search.phase = Phase::Searching;
        search.status = SearchStatus::Running;
        info!(
            "Searching from {} to {:?} across {} cells",
            start,
            grid.finish(),
            search.frontier.len()
        );
        search
    }

    fn search_step(&mut self, grid: &mut Grid) -> Option<SearchStep> {
        while let Some((id, distance)) = self.frontier.pop_nearest() {
            let neighbors = match grid.cell(id) {
                Some(cell) if !cell.is_wall() => cell
                    .neighbors()
                    .iter()
                    .copied()
                    .collect::<SmallVec<[CellId; N_SMALLVEC_SIZE]>>(),
                _ => continue,
            };
            if !distance.is_finite() {
                info!(
                    "Cell {} cannot be reached: no path after visiting {} cells",
                    id,
                    self.visited.len()
                );
                self.phase = Phase::Done;
                self.status = SearchStatus::Failed;
                return Some(SearchStep {
                    cell: id,
                    kind: StepKind::Unreachable,
                });
            }
            if grid.finish() == Some(id) {
                let path = self.reconstruct_path(id);
                info!(
                    "Reached finish {} after visiting {} cells, path has {} cells",
                    id,
                    self.visited.len(),
                    path.len()
                );
                self.path = Some(path);
                self.status = SearchStatus::Succeeded;
                self.phase = Phase::Tracing { next: 0 };
                return self.trace_step();
            }

            self.visited.push(id);
            if let Some(cell) = grid.cell_mut(id) {
                cell.set_visitation_order(self.visited.len());
            }
            let through_current = distance.successor();
            for n in neighbors {
                let Some(neighbor) = grid.cell_mut(n) else {
                    continue;
                };
                if neighbor.is_wall() {
                    continue;
                }
                let Some(&current) = self.tentative.get(n) else {
                    continue;
                };
                if through_current < current && self.frontier.requeue(n, current, through_current)
                {
                    self.tentative[n] = through_current;
                    neighbor.set_distance(through_current);
                    self.predecessors.insert(n, id);
                }
            }
            return Some(SearchStep {
                cell: id,
                kind: StepKind::Visited,
            });
        }
        info!(
            "Exhausted the grid after visiting {} cells without reaching the finish",
            self.visited.len()
        );
        self.phase = Phase::Done;
        self.status = SearchStatus::Failed;
        None
    }

    fn trace_step(&mut self) -> Option<SearchStep> {
        let Phase::Tracing { next } = &mut self.phase else {
            return None;
        };
        let path = self.path.as_deref().unwrap_or_default();
        let cell = *path.get(*next)?;
        *next += 1;
        if *next >= path.len() {
            debug!("Path fully emitted");
            self.phase = Phase::Done;
        }
        Some(SearchStep {
            cell,
            kind: StepKind::Path,
        })
    }

    /// Follows predecessor links back from `finish` and returns the cells from start to finish.
    fn reconstruct_path(&self, finish: CellId) -> Vec<CellId> {
        let mut path = std::iter::successors(Some(finish), |id| self.predecessors.get(id).copied())
            .collect::<Vec<CellId>>();
        path.reverse();
        path
    }
}

impl Search for DijkstraSearch {
    fn step(&mut self, grid: &mut Grid) -> Option<SearchStep> {
        match self.phase {
            Phase::Searching => self.search_step(grid),
            Phase::Tracing { .. } => self.trace_step(),
            Phase::Done => None,
        }
    }

    fn status(&self) -> SearchStatus {
        self.status
    }

    fn visited(&self) -> &[CellId] {
        &self.visited
    }

    fn path(&self) -> Option<&[CellId]> {
        self.path.as_deref()
    }

    fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }
}
