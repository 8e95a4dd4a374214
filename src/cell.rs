use core::fmt;
use core::ops::Add;

use grid_util::Point;
use num_traits::Zero;
use smallvec::SmallVec;

use crate::observable::Observable;
use crate::{CellId, N_SMALLVEC_SIZE};

/// Tentative distance from the start. [Distance::Infinite] orders after every finite value, so
/// the derived ordering is the one Dijkstra's algorithm needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distance {
    Finite(u32),
    Infinite,
}

impl Distance {
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// The distance one uniform-cost step further away.
    pub fn successor(self) -> Distance {
        self + Distance::Finite(1)
    }
}

impl Default for Distance {
    fn default() -> Distance {
        Distance::Infinite
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Distance) -> Distance {
        match (self, rhs) {
            (Distance::Finite(a), Distance::Finite(b)) => Distance::Finite(a.saturating_add(b)),
            _ => Distance::Infinite,
        }
    }
}

impl Zero for Distance {
    fn zero() -> Distance {
        Distance::Finite(0)
    }
    fn is_zero(&self) -> bool {
        *self == Distance::Finite(0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Infinite => write!(f, "∞"),
        }
    }
}

/// Visual search status of a [Cell].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    #[default]
    Unvisited,
    Visited,
    Path,
}

/// One addressable grid position. Identity is fixed at construction; the wall, endpoint and
/// status fields are [Observable] so a renderer can follow them without polling.
///
/// Wall and endpoint flags are changed through [Grid](crate::grid::Grid), which keeps its start
/// and finish accessors consistent with them.
#[derive(Debug)]
pub struct Cell {
    id: CellId,
    row: usize,
    column: usize,
    distance: Distance,
    visitation_order: usize,
    neighbors: SmallVec<[CellId; N_SMALLVEC_SIZE]>,
    is_wall: Observable<bool>,
    is_start: Observable<bool>,
    is_finish: Observable<bool>,
    status: Observable<CellStatus>,
}

impl Cell {
    pub fn new(id: CellId, row: usize, column: usize) -> Cell {
        Cell {
            id,
            row,
            column,
            distance: Distance::Infinite,
            visitation_order: 0,
            neighbors: SmallVec::new(),
            is_wall: Observable::new(false),
            is_start: Observable::new(false),
            is_finish: Observable::new(false),
            status: Observable::new(CellStatus::Unvisited),
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }
    pub fn row(&self) -> usize {
        self.row
    }
    pub fn column(&self) -> usize {
        self.column
    }
    /// Position with `x` as column and `y` as row.
    pub fn point(&self) -> Point {
        Point::new(self.column as i32, self.row as i32)
    }
    pub fn distance(&self) -> Distance {
        self.distance
    }
    pub fn visitation_order(&self) -> usize {
        self.visitation_order
    }
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }
    pub fn is_wall(&self) -> bool {
        *self.is_wall.get()
    }
    pub fn is_start(&self) -> bool {
        *self.is_start.get()
    }
    pub fn is_finish(&self) -> bool {
        *self.is_finish.get()
    }
    pub fn is_endpoint(&self) -> bool {
        self.is_start() || self.is_finish()
    }
    pub fn status(&self) -> CellStatus {
        *self.status.get()
    }
    pub fn is_visited(&self) -> bool {
        self.status() == CellStatus::Visited
    }
    pub fn is_path(&self) -> bool {
        self.status() == CellStatus::Path
    }

    pub fn wall_observable(&mut self) -> &mut Observable<bool> {
        &mut self.is_wall
    }
    pub fn start_observable(&mut self) -> &mut Observable<bool> {
        &mut self.is_start
    }
    pub fn finish_observable(&mut self) -> &mut Observable<bool> {
        &mut self.is_finish
    }
    pub fn status_observable(&mut self) -> &mut Observable<CellStatus> {
        &mut self.status
    }

    pub fn mark_as_visited(&mut self) {
        self.status.set(CellStatus::Visited);
    }

    pub fn mark_as_path(&mut self) {
        self.status.set(CellStatus::Path);
    }

    /// Clears search state; wall, endpoint flags and neighbours are kept.
    pub fn reset(&mut self) {
        self.distance = Distance::Infinite;
        self.visitation_order = 0;
        self.status.set(CellStatus::Unvisited);
    }

    /// A wall is never an endpoint, so both endpoint flags are dropped whatever `is_wall` is.
    pub(crate) fn mark_as_wall(&mut self, is_wall: bool) {
        self.is_wall.set(is_wall);
        self.unset_as_finish();
        self.unset_as_start();
    }

    pub(crate) fn set_as_start(&mut self) {
        self.is_start.set(true);
        self.unset_as_finish();
        self.distance = Distance::zero();
    }

    pub(crate) fn set_as_finish(&mut self) {
        self.is_finish.set(true);
        self.unset_as_start();
    }

    pub(crate) fn unset_as_start(&mut self) {
        self.is_start.set(false);
        self.distance = Distance::Infinite;
    }

    pub(crate) fn unset_as_finish(&mut self) {
        self.is_finish.set(false);
    }

    pub(crate) fn set_distance(&mut self, distance: Distance) {
        self.distance = distance;
    }

    pub(crate) fn set_visitation_order(&mut self, order: usize) {
        self.visitation_order = order;
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: SmallVec<[CellId; N_SMALLVEC_SIZE]>) {
        self.neighbors = neighbors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn wall_clears_endpoint_flags() {
        let mut cell = Cell::new(0, 0, 0);
        cell.set_as_start();
        cell.mark_as_wall(true);
        assert!(cell.is_wall());
        assert!(!cell.is_start() && !cell.is_finish());
        assert_eq!(cell.distance(), Distance::Infinite);

        cell.mark_as_wall(false);
        cell.set_as_finish();
        cell.mark_as_wall(false);
        assert!(!cell.is_finish());
    }

    #[test]
    fn start_and_finish_exclude_each_other() {
        let mut cell = Cell::new(4, 1, 1);
        cell.set_as_finish();
        cell.set_as_start();
        assert!(cell.is_start() && !cell.is_finish());
        assert_eq!(cell.distance(), Distance::Finite(0));
        cell.set_as_finish();
        assert!(cell.is_finish() && !cell.is_start());
        assert_eq!(cell.distance(), Distance::Infinite);
    }

    #[test]
    fn reset_keeps_placement() {
        let mut cell = Cell::new(2, 0, 2);
        cell.mark_as_wall(true);
        cell.set_distance(Distance::Finite(3));
        cell.set_visitation_order(7);
        cell.mark_as_path();
        cell.reset();
        assert!(cell.is_wall());
        assert_eq!(cell.status(), CellStatus::Unvisited);
        assert_eq!(cell.distance(), Distance::Infinite);
        assert_eq!(cell.visitation_order(), 0);
    }

    #[test]
    fn status_marks_do_not_clear_each_other() {
        let mut cell = Cell::new(0, 0, 0);
        cell.mark_as_visited();
        assert!(cell.is_visited());
        cell.mark_as_path();
        assert!(cell.is_path() && !cell.is_visited());
    }

    #[test]
    fn every_mutation_is_observed() {
        let mut cell = Cell::new(0, 0, 0);
        let starts = Rc::new(RefCell::new(Vec::new()));
        let statuses = Rc::new(RefCell::new(Vec::new()));
        let sink = starts.clone();
        cell.start_observable().subscribe(move |v| sink.borrow_mut().push(*v));
        let sink = statuses.clone();
        cell.status_observable()
            .subscribe_changes(move |s| sink.borrow_mut().push(*s));

        cell.set_as_start();
        cell.mark_as_wall(true);
        cell.mark_as_visited();
        cell.reset();

        // initial value, set_as_start, then mark_as_wall's unset_as_start
        assert_eq!(*starts.borrow(), vec![false, true, false]);
        assert_eq!(
            *statuses.borrow(),
            vec![CellStatus::Visited, CellStatus::Unvisited]
        );
    }

    #[test]
    fn distance_ordering() {
        assert!(Distance::Finite(u32::MAX) < Distance::Infinite);
        assert!(Distance::Finite(1) < Distance::Finite(2));
        assert_eq!(Distance::Finite(2).successor(), Distance::Finite(3));
        assert_eq!(Distance::Infinite.successor(), Distance::Infinite);
        assert!(Distance::zero().is_zero());
        assert_eq!(Distance::Infinite.to_string(), "∞");
    }
}
