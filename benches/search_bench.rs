use criterion::{criterion_group, criterion_main, Criterion};
use grid_pathtrace::solver::{
    dijkstra::DijkstraSolver, weighted::WeightedDijkstraSolver, GridSolver,
};
use grid_pathtrace::{at, CellKind, PathingGrid, MAX_GRID_SIZE};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn random_grids(count: usize, density: f64) -> Vec<PathingGrid> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..count)
        .map(|_| {
            let mut grid = PathingGrid::new(MAX_GRID_SIZE).unwrap();
            for row in 0..MAX_GRID_SIZE as i32 {
                for col in 0..MAX_GRID_SIZE as i32 {
                    let pos = at(row, col);
                    if grid.is_marker(pos) {
                        continue;
                    }
                    if rng.gen_bool(density) {
                        grid.set_cell_kind(pos, CellKind::Obstacle, None).unwrap();
                    } else if rng.gen_bool(0.2) {
                        let w = rng.gen_range(2..=9);
                        grid.set_cell_kind(pos, CellKind::Weight, Some(w)).unwrap();
                    }
                }
            }
            grid
        })
        .collect()
}

fn bench_solver<S: GridSolver>(c: &mut Criterion, solver_name: &str, solver: S) {
    for density in [0.0, 0.2, 0.35] {
        let grids = random_grids(16, density);
        c.bench_function(
            format!("{solver_name}, {MAX_GRID_SIZE}x{MAX_GRID_SIZE}, density {density}").as_str(),
            |b| {
                b.iter(|| {
                    for grid in &grids {
                        black_box(solver.search(grid));
                    }
                })
            },
        );
    }
}

fn search_bench(c: &mut Criterion) {
    bench_solver(c, "Dijkstra", DijkstraSolver);
    bench_solver(c, "Weighted Dijkstra", WeightedDijkstraSolver);
}

criterion_group!(benches, search_bench);
criterion_main!(benches);
