use grid_dijkstra::{DijkstraSolver, Grid, GridConfig, GridSolver, Playback, Search};

// The finish is walled off, so the search visits every cell it can reach and gives up.
// Grid descriptors use the form rows&columns&wall:wall:...
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config: GridConfig = "6&8&21:22:23:29:37:45".parse().unwrap();
    let mut grid = Grid::from_config(&config).unwrap();
    let start = grid.start().unwrap();
    let finish = grid.finish().unwrap();
    grid.set_wall(46, true);
    grid.set_wall(38, true);
    grid.update();
    println!("{grid}");
    println!("reachable according to components: {}", grid.reachable(start, finish));

    let mut playback = Playback::new(DijkstraSolver.solve(&grid));
    let painted = playback.finish(&mut grid);
    println!("{grid}");
    println!(
        "{painted} steps, {} cells visited, status {:?}",
        playback.search().visited().len(),
        playback.search().status()
    );
}
