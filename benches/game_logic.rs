use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{canonical_shape, check_collision, GameState, Grid, Position};
use blockfall::types::{GameAction, PieceKind};

fn bench_descent(c: &mut Criterion) {
    let state = GameState::new(12345);

    c.bench_function("soft_drop", |b| {
        b.iter(|| black_box(state.apply(black_box(GameAction::SoftDrop))))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut grid = Grid::new(20, 10);
    // Fill bottom 4 rows
    for y in 16..20 {
        for x in 0..10 {
            grid.set(x, y, Some(PieceKind::I));
        }
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| black_box(grid.clear_full_rows()))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let state = GameState::new(12345);

    c.bench_function("hard_drop_lock_spawn", |b| {
        b.iter(|| black_box(state.apply(GameAction::HardDrop)))
    });
}

fn bench_collision(c: &mut Criterion) {
    let grid = Grid::new(20, 10);
    let shape = canonical_shape(PieceKind::T);

    c.bench_function("check_collision", |b| {
        b.iter(|| check_collision(black_box(Position::new(4, 10)), &shape, &grid))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let state = GameState::new(12345);

    c.bench_function("rotate", |b| {
        b.iter(|| black_box(state.apply(GameAction::Rotate)))
    });
}

criterion_group!(
    benches,
    bench_descent,
    bench_line_clear,
    bench_hard_drop,
    bench_collision,
    bench_rotate
);
criterion_main!(benches);
