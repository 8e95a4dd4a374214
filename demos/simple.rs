use grid_dijkstra::{DijkstraSolver, Grid, GridConfig, GridSolver, Playback, Search};
use std::time::Duration;

// In this example a path is found on a grid with shape
// S....
// .###.
// ...#.
// .#...
// ....F
// S marks the start
// F marks the finish
fn main() {
    env_logger::init();
    let config = GridConfig::new(5, 5).with_walls([6, 7, 8, 13, 16]);
    let mut grid = Grid::from_config(&config).unwrap();
    let mut playback = Playback::new(DijkstraSolver.solve(&grid));
    while !playback.is_done() {
        if playback.advance(&mut grid, Duration::from_millis(40)) > 0 {
            println!("{grid}");
        }
    }
    if let Some(path) = playback.search().path() {
        println!("A path has been found:");
        for id in path {
            let cell = grid.cell(*id).unwrap();
            println!("{:?} at distance {}", cell.point(), cell.distance());
        }
    }
}
