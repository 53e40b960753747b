use chandy_core::*;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

const TIERS: [(&str, Coord, Kind); 3] = [("small", 6, 4), ("classic", 8, 6), ("large", 12, 7)];

fn bench_find_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_matches");
    for (name, size, kinds) in TIERS {
        let config = Match3Config::new(size, kinds, INITIAL_MOVES);
        let board = RandomBoardGenerator::new(11).generate(&config);
        group.bench_with_input(BenchmarkId::from_parameter(name), &board, |b, board| {
            b.iter(|| black_box(find_matches(board)))
        });
    }
    group.finish();
}

/// Plays the first hinted swap on a fresh board, cascade included.
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_swap");
    for (name, size, kinds) in TIERS {
        let config = Match3Config::new(size, kinds, INITIAL_MOVES);
        let board = RandomBoardGenerator::new(5).generate(&config);
        let Some((a, b)) = find_valid_move(&board) else {
            continue;
        };
        group.bench_function(BenchmarkId::from_parameter(name), |bench| {
            bench.iter_batched(
                || (board.clone(), SmallRng::seed_from_u64(1), SessionState::default()),
                |(mut board, mut rng, mut session)| {
                    board.swap(a, b);
                    let found = find_matches(&board);
                    let report =
                        CascadeResolver::new(&mut board, &mut rng, &config, &mut NullRenderer)
                            .resolve(&mut session, found, Some((a, b)));
                    black_box(report)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_shuffle(c: &mut Criterion) {
    let config = Match3Config::default();
    let board = RandomBoardGenerator::new(2).generate(&config);
    c.bench_function("shuffle_board/classic", |bench| {
        bench.iter_batched(
            || (board.clone(), SmallRng::seed_from_u64(9)),
            |(mut board, mut rng)| {
                shuffle_board(&mut board, config.kinds, config.shuffle_passes, &mut rng);
                black_box(board)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_find_matches, bench_resolve, bench_shuffle);
criterion_main!(benches);
