use criterion::{criterion_group, criterion_main, Criterion};

use swarmate::board::{Board, Color};
use swarmate::comm::SerialGroup;
use swarmate::search::find_best;

fn bench_search(c: &mut Criterion) {
    let board = Board::starting_position();
    let group = SerialGroup;

    c.bench_function("search_depth_2_startpos", |b| {
        b.iter(|| find_best(&board, Color::White, 2, &group))
    });

    c.bench_function("search_depth_3_startpos", |b| {
        b.iter(|| find_best(&board, Color::White, 3, &group))
    });
}

fn bench_movegen(c: &mut Criterion) {
    use swarmate::movegen::generate_all;

    let board = Board::starting_position();
    c.bench_function("movegen_startpos", |b| {
        b.iter(|| generate_all(&board, Color::White).len())
    });
}

criterion_group!(benches, bench_search, bench_movegen);
criterion_main!(benches);
