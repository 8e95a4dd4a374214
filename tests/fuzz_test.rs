/// Fuzzes the solver on many random grids: a path is found exactly when the finish shares a
/// connected component with the start, paths are valid and shortest, and the visiting order
/// matches a naive scan-and-sort rendition of the same selection rule.
use grid_dijkstra::{
    CellId, DijkstraSolver, Distance, EditSession, Grid, GridConfig, GridSolver, PointerEvent,
    Solution,
};
use rand::prelude::*;

fn random_grid(rows: usize, columns: usize, rng: &mut StdRng, diagonal: bool) -> Grid {
    let n = rows * columns;
    let walls = (0..n).filter(|_| rng.gen_bool(0.35)).collect::<Vec<CellId>>();
    let start = rng.gen_range(0..n);
    let mut finish = rng.gen_range(0..n);
    while finish == start {
        finish = rng.gen_range(0..n);
    }
    let config = GridConfig::new(rows, columns)
        .with_walls(walls)
        .with_diagonal_move(diagonal)
        .with_start(Some(start))
        .with_finish(Some(finish));
    Grid::from_config(&config).unwrap()
}

/// Rescans every unfinalized cell for each selection, ordering by distance, then by the higher
/// id.
fn reference_solve(grid: &Grid) -> Solution {
    let n = grid.len();
    let mut distance = grid.cells().map(|c| c.distance()).collect::<Vec<Distance>>();
    let mut unvisited = (0..n).collect::<Vec<CellId>>();
    let mut predecessor: Vec<Option<CellId>> = vec![None; n];
    let mut visited = Vec::new();
    if grid.start().is_none() {
        return Solution {
            success: false,
            visited_in_order: visited,
            path: None,
        };
    }
    let finish = grid.finish();
    while !unvisited.is_empty() {
        unvisited.sort_by_key(|&id| (distance[id], std::cmp::Reverse(id)));
        let id = unvisited.remove(0);
        let cell = grid.cell(id).unwrap();
        if cell.is_wall() {
            continue;
        }
        if !distance[id].is_finite() {
            break;
        }
        if Some(id) == finish {
            let mut path = vec![id];
            while let Some(p) = predecessor[*path.last().unwrap()] {
                path.push(p);
            }
            path.reverse();
            return Solution {
                success: true,
                visited_in_order: visited,
                path: Some(path),
            };
        }
        visited.push(id);
        for &neighbor in cell.neighbors() {
            if grid.cell(neighbor).unwrap().is_wall() || !unvisited.contains(&neighbor) {
                continue;
            }
            let through = distance[id].successor();
            if through < distance[neighbor] {
                distance[neighbor] = through;
                predecessor[neighbor] = Some(id);
            }
        }
    }
    Solution {
        success: false,
        visited_in_order: visited,
        path: None,
    }
}

#[test]
fn fuzz() {
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for diagonal in [false, true] {
        for _ in 0..N_GRIDS {
            let rows = rng.gen_range(1..10);
            let columns = rng.gen_range(2..10);
            let mut grid = random_grid(rows, columns, &mut rng, diagonal);
            let (start, finish) = (grid.start().unwrap(), grid.finish().unwrap());
            let reachable = grid.reachable(start, finish);
            let solution = DijkstraSolver.solve_to_end(&mut grid);
            // Show the grid if the outcome disagrees with the components
            if solution.success != reachable {
                println!("{grid}");
            }
            assert_eq!(solution.success, reachable);
        }
    }
}

#[test]
fn fuzz_paths() {
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    for diagonal in [false, true] {
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(8, 8, &mut rng, diagonal);
            let solution = DijkstraSolver.solve_to_end(&mut grid);
            let Some(path) = solution.path else {
                continue;
            };
            assert_eq!(path.first().copied(), grid.start());
            assert_eq!(path.last().copied(), grid.finish());
            for pair in path.windows(2) {
                let cell = grid.cell(pair[0]).unwrap();
                assert!(cell.neighbors().contains(&pair[1]));
                assert!(!grid.cell(pair[1]).unwrap().is_wall());
            }
            let finish_distance = grid.finish_cell().unwrap().distance();
            assert_eq!(finish_distance, Distance::Finite(path.len() as u32 - 1));
        }
    }
}

#[test]
fn fuzz_reference_order() {
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(2);
    for diagonal in [false, true] {
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(7, 9, &mut rng, diagonal);
            let expected = reference_solve(&grid);
            let solution = DijkstraSolver.solve_to_end(&mut grid);
            if solution != expected {
                println!("{grid}");
            }
            assert_eq!(solution, expected);
        }
    }
}

#[test]
fn fuzz_determinism() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let mut grid = random_grid(12, 12, &mut rng, false);
        let first = DijkstraSolver.solve_to_end(&mut grid);
        grid.reset();
        let second = DijkstraSolver.solve_to_end(&mut grid);
        assert_eq!(first, second);
    }
}

#[test]
fn fuzz_edits_keep_endpoints_unique() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut grid = Grid::from_config(&GridConfig::new(6, 6)).unwrap();
    let mut session = EditSession::new();
    for _ in 0..20_000 {
        let id = rng.gen_range(0..grid.len());
        let event = match rng.gen_range(0..10) {
            0..=1 => PointerEvent::Down(id),
            2..=7 => PointerEvent::Enter(id),
            8 => PointerEvent::Up(id),
            _ => PointerEvent::Leave,
        };
        session.handle(&mut grid, event);
        assert!(grid.cells().filter(|c| c.is_start()).count() <= 1);
        assert!(grid.cells().filter(|c| c.is_finish()).count() <= 1);
        assert!(grid.cells().all(|c| !(c.is_wall() && c.is_endpoint())));
        assert_eq!(grid.start(), grid.cells().find(|c| c.is_start()).map(|c| c.id()));
        assert_eq!(grid.finish(), grid.cells().find(|c| c.is_finish()).map(|c| c.id()));
    }
    grid.update();
    let start_and_finish = grid.start().zip(grid.finish());
    let solution = DijkstraSolver.solve_to_end(&mut grid);
    if let Some((start, finish)) = start_and_finish {
        assert_eq!(solution.success, grid.reachable(start, finish));
    }
}
