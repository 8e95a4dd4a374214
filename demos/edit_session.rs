use grid_dijkstra::{
    DijkstraSolver, EditSession, Grid, GridConfig, GridSolver, PointerEvent, Solution,
};

// Paints a wall across the grid with a drag, moves the finish and solves after each gesture.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    let mut grid = Grid::from_config(&GridConfig::new(5, 7)).unwrap();
    let mut session = EditSession::new();

    let wall_drag = [
        PointerEvent::Down(3),
        PointerEvent::Enter(10),
        PointerEvent::Enter(17),
        PointerEvent::Enter(24),
        PointerEvent::Up(24),
    ];
    for event in wall_drag {
        session.handle(&mut grid, event);
    }
    report(&mut grid);

    let finish = grid.finish().unwrap();
    let finish_drag = [
        PointerEvent::Down(finish),
        PointerEvent::Enter(finish - 1),
        PointerEvent::Up(5),
    ];
    for event in finish_drag {
        let effect = session.handle(&mut grid, event);
        println!("{event:?} -> {effect:?}");
    }
    grid.reset();
    report(&mut grid);
}

fn report(grid: &mut Grid) {
    let Solution { success, visited_in_order, path } = DijkstraSolver.solve_to_end(grid);
    println!("{grid}");
    println!(
        "success: {success}, visited {} cells, path {:?}",
        visited_in_order.len(),
        path.unwrap_or_default()
    );
}
