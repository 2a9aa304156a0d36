//! Criterion micro-benchmarks for distance propagation and wall observation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use maze_bench::{open_grid, perfect_maze, BENCH_SEED};
use maze_core::{Cell, Heading, Pose};
use maze_propagators::{
    DistancePropagator, FloodFill, ManhattanHeuristic, RangeReadings, WallObserver,
};

const SIDES: [u32; 3] = [10, 16, 32];

/// Benchmark: flood fill toward the centre of an open grid.
fn bench_flood_fill_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill_open");
    for side in SIDES {
        let mut grid = open_grid(side).unwrap();
        let target = Cell::new(side / 2, side / 2);
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter(|| {
                let stats = FloodFill::default().propagate(&mut grid, target).unwrap();
                black_box(stats);
            });
        });
    }
    group.finish();
}

/// Benchmark: flood fill toward the centre of a seeded perfect maze.
///
/// Long winding corridors need many relaxation passes.
fn bench_flood_fill_perfect(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill_perfect");
    for side in SIDES {
        let mut grid = perfect_maze(side, BENCH_SEED).unwrap();
        let target = Cell::new(side / 2, side / 2);
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter(|| {
                let stats = FloodFill::default().propagate(&mut grid, target).unwrap();
                black_box(stats);
            });
        });
    }
    group.finish();
}

/// Benchmark: Manhattan seeding of a 32x32 grid.
fn bench_manhattan_32(c: &mut Criterion) {
    let mut grid = open_grid(32).unwrap();
    c.bench_function("manhattan_32", |b| {
        b.iter(|| {
            let stats = ManhattanHeuristic
                .propagate(&mut grid, Cell::new(16, 16))
                .unwrap();
            black_box(stats);
        });
    });
}

/// Benchmark: observe one set of readings at every cell of a 16x16 grid.
fn bench_observe_16(c: &mut Criterion) {
    let observer = WallObserver::new(15.0);
    let readings = RangeReadings {
        front: 7.0,
        left: 25.0,
        right: 7.0,
        rear: None,
    };
    c.bench_function("observe_16", |b| {
        b.iter(|| {
            let mut grid = open_grid(16).unwrap();
            for cell in (0..16).flat_map(|y| (0..16).map(move |x| Cell::new(x, y))) {
                let seen = observer.observe(&mut grid, Pose::new(cell, Heading::North), readings);
                black_box(seen);
            }
            black_box(grid.wall_bit_count());
        });
    });
}

criterion_group!(
    benches,
    bench_flood_fill_open,
    bench_flood_fill_perfect,
    bench_manhattan_32,
    bench_observe_16
);
criterion_main!(benches);
