//! # grid_dijkstra
//!
//! The model behind an interactive shortest-path visualizer. A [Grid] of [Cell]s with walls,
//! a start and a finish is edited through pointer gestures ([EditSession]) and solved with
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) one step at
//! a time, so that a driver such as [Playback] can animate the search. Note that this assumes
//! a uniform-cost grid. Like a pathing grid, the [Grid] keeps
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) to answer
//! reachability without searching.
//!
//! Cells expose their visual state through [Observable] fields, which is all a renderer
//! needs to subscribe to.
pub mod cell;
pub mod config;
pub mod edit;
pub mod grid;
pub mod observable;
pub mod playback;
pub mod solver;

/// Cells are addressed by their row-major index.
pub type CellId = usize;

/// Inline capacity for neighbour lists: the Moore neighbourhood of a cell.
pub const N_SMALLVEC_SIZE: usize = 8;

pub use cell::{Cell, CellStatus, Distance};
pub use config::{ConfigError, GridConfig};
pub use edit::{EditEffect, EditSession, PointerEvent};
pub use grid::{Endpoint, Grid};
pub use observable::Observable;
pub use playback::{Playback, DEFAULT_ANIMATION_DELAY};
pub use solver::dijkstra::{DijkstraSearch, DijkstraSolver};
pub use solver::{GridSolver, Search, SearchStatus, SearchStep, Solution, StepKind};
