use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cubetris::core::{catalog_shape, collide, ghost_position, GameSnapshot, GameState, Grid};
use cubetris::types::{Axis, PieceKind, Position};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut now = 0u64;

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            now += 16;
            if !state.is_playing() {
                state.start();
            }
            state.tick(black_box(now));
        })
    });
}

fn bench_sweep(c: &mut Criterion) {
    c.bench_function("sweep_4_layers", |b| {
        b.iter(|| {
            let mut grid = Grid::new(5, 12, 5);
            for y in 0..4 {
                grid.fill_layer(y);
            }
            grid.set(2, 4, 2, true);
            black_box(grid.sweep());
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let shape = catalog_shape(PieceKind::T);

    c.bench_function("rotate_all_axes", |b| {
        b.iter(|| {
            for axis in Axis::ALL {
                black_box(shape.rotated(axis, black_box(1)));
            }
        })
    });
}

fn bench_collide(c: &mut Criterion) {
    let mut grid = Grid::new(5, 12, 5);
    for y in 0..6 {
        grid.set(y % 5, y as i32, 2, true);
    }
    let shape = catalog_shape(PieceKind::L);

    c.bench_function("collide", |b| {
        b.iter(|| collide(&grid, Some(&shape), black_box(Position::new(1, 5, 1))))
    });
}

fn bench_ghost(c: &mut Criterion) {
    let grid = Grid::new(5, 12, 5);
    let shape = catalog_shape(PieceKind::I);

    c.bench_function("ghost_position", |b| {
        b.iter(|| ghost_position(&grid, &shape, black_box(Position::new(0, 11, 2))))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.hard_drop().is_none() {
                state.start();
            }
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_sweep,
    bench_rotate,
    bench_collide,
    bench_ghost,
    bench_hard_drop,
    bench_snapshot_into
);
criterion_main!(benches);
