use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stackfall::core::{catalog, clear, Board, Cascade, Engine, Registry};
use stackfall::types::Command;

fn bench_tick(c: &mut Criterion) {
    let mut engine = Engine::new(12345);

    c.bench_function("engine_step", |b| {
        b.iter(|| {
            if engine.is_game_over() {
                engine = Engine::new(12345);
            }
            engine.step();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows_and_cascade", |b| {
        b.iter(|| {
            let mut board = Board::new();
            let mut registry = Registry::new();
            registry.register(1, 40);
            for row in 16..20 {
                for col in 0..10 {
                    board.set(row, col, 1);
                }
            }
            let cleared = clear::clear_full_rows(&mut board, &mut registry);
            let mut cascade = Cascade::new();
            cascade.begin(&cleared);
            while cascade.close_one(&mut board) > 0 {}
            black_box(board.occupied())
        })
    });
}

fn bench_move(c: &mut Criterion) {
    c.bench_function("move_left_right", |b| {
        let mut engine = Engine::new(1);
        engine.spawn_at(0, 3);
        b.iter(|| {
            engine.enqueue_command(black_box(Command::MoveLeft));
            engine.enqueue_command(black_box(Command::MoveRight));
            engine.step();
            if engine.active().is_none() {
                engine = Engine::new(1);
                engine.spawn_at(0, 3);
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    c.bench_function("rotate", |b| {
        let mut engine = Engine::new(1);
        engine.spawn_at(catalog::BAR, 3);
        engine.enqueue_command(Command::SoftDrop);
        engine.step();
        b.iter(|| {
            engine.enqueue_command(black_box(Command::Rotate));
            engine.step();
            if engine.active().is_none() {
                engine = Engine::new(1);
                engine.spawn_at(catalog::BAR, 3);
                engine.enqueue_command(Command::SoftDrop);
                engine.step();
            }
        })
    });
}

criterion_group!(benches, bench_tick, bench_line_clear, bench_move, bench_rotate);
criterion_main!(benches);
