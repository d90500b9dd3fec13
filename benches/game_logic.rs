use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stackfall::core::{Board, Engine, GameSnapshot};
use stackfall::types::PieceKind;

fn bench_tick(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);

    c.bench_function("engine_tick_16ms", |b| {
        b.iter(|| {
            engine.tick(black_box(16));
            if !engine.running() {
                engine.reset_with_seed(12345);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                board.fill_row(y, PieceKind::I, None);
            }
            black_box(board.scan_and_clear());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);

    c.bench_function("hard_drop_and_spawn", |b| {
        b.iter(|| {
            if !engine.hard_drop() {
                engine.reset_with_seed(12345);
            }
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);
    let mut dx = 1;

    c.bench_function("move_piece", |b| {
        b.iter(|| {
            if !engine.move_piece(black_box(dx), 0) {
                dx = -dx;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            engine.rotate(black_box(1));
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let engine = Engine::with_seed(12345);
    let mut snapshot = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            engine.snapshot_into(black_box(&mut snapshot));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move,
    bench_rotate,
    bench_snapshot_into
);
criterion_main!(benches);
