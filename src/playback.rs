use std::time::Duration;

use log::{info, warn};

use crate::grid::Grid;
use crate::solver::dijkstra::DijkstraSearch;
use crate::solver::{Search, SearchStatus, SearchStep, StepKind};

pub const DEFAULT_ANIMATION_DELAY: Duration = Duration::from_millis(10);

/// Paints the steps of a [Search] onto the grid at a fixed pace.
///
/// Visited and path steps update the status of their cell, except for the start and finish,
/// which keep their own look. Time is fed in by the caller through [advance](Self::advance),
/// so the same driver works for frame loops, timers and tests.
#[derive(Debug)]
pub struct Playback<S: Search = DijkstraSearch> {
    search: S,
    delay: Duration,
    pending: Duration,
    paused: bool,
    applied: usize,
}

impl<S: Search> Playback<S> {
    pub fn new(search: S) -> Playback<S> {
        Playback::with_delay(search, DEFAULT_ANIMATION_DELAY)
    }

    pub fn with_delay(search: S, delay: Duration) -> Playback<S> {
        Playback {
            search,
            delay,
            pending: Duration::ZERO,
            paused: false,
            applied: 0,
        }
    }

    pub fn search(&self) -> &S {
        &self.search
    }
    pub fn delay(&self) -> Duration {
        self.delay
    }
    /// Number of steps pulled so far.
    pub fn applied(&self) -> usize {
        self.applied
    }
    pub fn is_paused(&self) -> bool {
        self.paused
    }
    pub fn is_done(&self) -> bool {
        self.search.is_done()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes the animation. Time that passed while paused is not caught up on.
    pub fn resume(&mut self) {
        self.paused = false;
        self.pending = Duration::ZERO;
    }

    /// Pulls and paints a single step, paused or not.
    pub fn step(&mut self, grid: &mut Grid) -> Option<SearchStep> {
        let step = self.search.step(grid)?;
        self.applied += 1;
        apply(grid, step);
        if self.search.is_done() {
            self.log_outcome(grid);
        }
        Some(step)
    }

    /// Lets `elapsed` pass and pulls one step for every full delay accumulated. Returns the
    /// number of steps painted.
    pub fn advance(&mut self, grid: &mut Grid, elapsed: Duration) -> usize {
        if self.paused || self.is_done() {
            return 0;
        }
        if self.delay.is_zero() {
            return self.finish(grid);
        }
        self.pending += elapsed;
        let mut painted = 0;
        while self.pending >= self.delay {
            self.pending -= self.delay;
            if self.step(grid).is_none() {
                self.pending = Duration::ZERO;
                break;
            }
            painted += 1;
        }
        painted
    }

    /// Paints every remaining step at once.
    pub fn finish(&mut self, grid: &mut Grid) -> usize {
        let mut painted = 0;
        while self.step(grid).is_some() {
            painted += 1;
        }
        painted
    }

    fn log_outcome(&self, grid: &Grid) {
        match self.search.status() {
            SearchStatus::Succeeded => info!(
                "Animation finished: {} visited, {} on the path",
                self.search.visited().len(),
                self.search.path().map_or(0, <[_]>::len)
            ),
            SearchStatus::Failed => {
                info!(
                    "Animation finished: finish not reached, {} visited",
                    self.search.visited().len()
                );
                if let (Some(start), Some(finish)) = (grid.start(), grid.finish()) {
                    if !grid.components_dirty() && grid.reachable(start, finish) {
                        warn!("Finish {} shares a component with start {}", finish, start);
                    }
                }
            }
            SearchStatus::Running => warn!("Search reported done while still running"),
        }
    }
}

fn apply(grid: &mut Grid, step: SearchStep) {
    let Some(cell) = grid.cell_mut(step.cell) else {
        warn!("Step for unknown cell {}", step.cell);
        return;
    };
    if cell.is_endpoint() {
        return;
    }
    match step.kind {
        StepKind::Visited => cell.mark_as_visited(),
        StepKind::Path => cell.mark_as_path(),
        StepKind::Unreachable => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellStatus;
    use crate::config::GridConfig;
    use crate::solver::dijkstra::DijkstraSolver;
    use crate::solver::GridSolver;

    fn three_by_three() -> Grid {
        Grid::from_config(&GridConfig::new(3, 3)).unwrap()
    }

    fn count(grid: &Grid, status: CellStatus) -> usize {
        grid.cells().filter(|c| c.status() == status).count()
    }

    #[test]
    fn paints_one_step_per_delay() {
        let mut grid = three_by_three();
        let mut playback = Playback::new(DijkstraSolver.solve(&grid));
        assert_eq!(playback.advance(&mut grid, Duration::from_millis(5)), 0);
        assert_eq!(playback.advance(&mut grid, Duration::from_millis(5)), 1);
        assert_eq!(playback.advance(&mut grid, Duration::from_millis(25)), 2);
        assert_eq!(playback.applied(), 3);
        // the start was the first step but is never repainted
        assert_eq!(grid.start_cell().unwrap().status(), CellStatus::Unvisited);
        assert_eq!(count(&grid, CellStatus::Visited), 2);
    }

    #[test]
    fn pause_stops_time_but_not_single_steps() {
        let mut grid = three_by_three();
        let search = DijkstraSolver.solve(&grid);
        let mut playback = Playback::with_delay(search, Duration::from_millis(1));
        playback.pause();
        assert!(playback.is_paused());
        assert_eq!(playback.advance(&mut grid, Duration::from_secs(1)), 0);
        assert!(playback.step(&mut grid).is_some());
        assert!(playback.step(&mut grid).is_some());
        assert_eq!(count(&grid, CellStatus::Visited), 1);
        playback.resume();
        assert_eq!(playback.advance(&mut grid, Duration::from_millis(2)), 2);
    }

    #[test]
    fn finish_paints_visited_then_path() {
        let mut grid = three_by_three();
        let mut playback = Playback::new(DijkstraSolver.solve(&grid));
        assert_eq!(playback.finish(&mut grid), 8 + 5);
        assert!(playback.is_done());
        assert_eq!(playback.advance(&mut grid, Duration::from_secs(1)), 0);
        // path 0, 3, 6, 7, 8 without its endpoints
        let path = grid
            .cells()
            .filter(|c| c.is_path())
            .map(|c| c.id())
            .collect::<Vec<_>>();
        assert_eq!(path, vec![3, 6, 7]);
        assert_eq!(count(&grid, CellStatus::Visited), 4);
        assert_eq!(grid.finish_cell().unwrap().status(), CellStatus::Unvisited);
    }

    #[test]
    fn unreachable_finish_paints_reachable_cells() {
        let mut grid = Grid::from_config(&GridConfig::new(1, 5).with_walls([2])).unwrap();
        let mut playback = Playback::new(DijkstraSolver.solve(&grid));
        playback.finish(&mut grid);
        assert_eq!(playback.search().status(), SearchStatus::Failed);
        assert!(grid.cell(1).unwrap().is_visited());
        assert!(grid.cells().all(|c| !c.is_path()));
        assert_eq!(count(&grid, CellStatus::Visited), 1);
    }

    #[test]
    fn zero_delay_drains_at_once() {
        let mut grid = three_by_three();
        let mut playback = Playback::with_delay(DijkstraSolver.solve(&grid), Duration::ZERO);
        assert_eq!(playback.advance(&mut grid, Duration::ZERO), 13);
        assert!(playback.is_done());
    }
}
