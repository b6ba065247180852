// Benchmarks do gerador de lances, perft e busca

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pelanca_power::engine::perft;
use pelanca_power::rules::generate_legal_moves;
use pelanca_power::search::{evaluate, Engine, SearchConfig};
use pelanca_power::*;

const POWERS: &str = "r3k2r/pp1n(q)1ppp/2n5/3pP3/2N(q)2b(p)2/5B(r)2/PP3PPP/R3K2R w KQkq d6 0 1";

fn bench_legal_moves(c: &mut Criterion) {
    let start = Board::new();
    let powers = Board::from_fen(POWERS).unwrap();

    c.bench_function("legal_moves_start", |b| {
        b.iter(|| black_box(generate_legal_moves(&start, Color::White, None)))
    });
    c.bench_function("legal_moves_powers", |b| {
        b.iter(|| black_box(generate_legal_moves(&powers.board, powers.turn, powers.en_passant)))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let powers = Board::from_fen(POWERS).unwrap();
    c.bench_function("evaluate_powers", |b| {
        b.iter(|| black_box(evaluate(&powers.board, Color::White)))
    });
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);
    group.bench_function("start_depth_3", |b| {
        b.iter(|| black_box(perft(&Board::new(), Color::White, None, 3)))
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let powers = Board::from_fen(POWERS).unwrap();
    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    group.bench_function("powers_depth_3", |b| {
        b.iter(|| {
            let mut engine = Engine::new(SearchConfig::default());
            black_box(engine.search(&powers.board, powers.turn, powers.en_passant, 3, |_, _| {}))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_legal_moves, bench_evaluate, bench_perft, bench_search);
criterion_main!(benches);
