use chandy_core::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const TIERS: [(&str, Coord, Kind); 3] = [("small", 6, 4), ("classic", 8, 6), ("large", 12, 7)];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, size, kinds) in TIERS {
        let config = Match3Config::new(size, kinds, INITIAL_MOVES);
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(RandomBoardGenerator::new(seed).generate(config))
            })
        });
    }
    group.finish();
}

fn bench_valid_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_any_valid_move");
    for (name, size, kinds) in TIERS {
        let config = Match3Config::new(size, kinds, INITIAL_MOVES);
        let board = RandomBoardGenerator::new(7).generate(&config);
        group.bench_with_input(BenchmarkId::from_parameter(name), &board, |b, board| {
            b.iter(|| black_box(has_any_valid_move(board)))
        });
    }
    group.finish();
}

fn bench_sliding_shuffle(c: &mut Criterion) {
    c.bench_function("sliding/new_game", |b| {
        let mut puzzle = SlidingPuzzle::new(SlidingConfig::default(), 3).unwrap();
        b.iter(|| {
            puzzle.new_game();
            black_box(puzzle.empty())
        })
    });
}

criterion_group!(benches, bench_generate, bench_valid_move, bench_sliding_shuffle);
criterion_main!(benches);
