use criterion::{criterion_group, criterion_main, Criterion};
use torus_life::{GenerationDriver, Grid};

fn bench_advance(c: &mut Criterion) {
    const N: usize = 1 << 7;
    let mut grid = Grid::blank(N, N).unwrap();
    grid.random_seed(N * N * 3 / 10, Some(42)).unwrap();
    let mut driver = GenerationDriver::new(grid);
    c.bench_function("advance_128x128", |b| b.iter(|| driver.advance()));
}

fn bench_random_seed(c: &mut Criterion) {
    const N: usize = 1 << 9;
    c.bench_function("random_seed_512x512", |b| {
        b.iter(|| {
            let mut grid = Grid::blank(N, N).unwrap();
            grid.random_seed(N * N / 2, Some(42)).unwrap();
            grid
        })
    });
}

criterion_group!(benches, bench_advance, bench_random_seed);
criterion_main!(benches);
