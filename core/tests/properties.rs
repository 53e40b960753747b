use chandy_core::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

const SEEDS: u64 = 16;

fn classic(seed: u64) -> Match3Engine {
    Match3Engine::new(Match3Config::default(), seed, MemoryStore::default()).unwrap()
}

#[test]
fn generated_boards_have_no_matches() {
    for seed in 0..SEEDS {
        let engine = classic(seed);
        assert!(find_matches(engine.board()).is_empty(), "seed {seed}");
        assert_eq!(engine.board().empty_count(), 0);
    }
}

#[test]
fn hinted_swaps_spend_one_move_and_never_lower_score() {
    for seed in 0..SEEDS {
        let mut engine = classic(seed);
        let mut turns = 0;

        while let Some((a, b)) = engine.hint() {
            let score = engine.score();
            let moves = engine.moves_remaining();

            let outcome = engine.swap(a, b, &mut NullRenderer);

            assert!(matches!(outcome, SwapOutcome::Resolved(_)), "seed {seed}");
            assert_eq!(engine.moves_remaining(), moves - 1, "seed {seed}");
            assert!(engine.score() > score, "seed {seed}");
            assert!(engine.best() >= engine.score());
            assert_eq!(engine.board().empty_count(), 0);
            assert!(find_matches(engine.board()).is_empty(), "seed {seed}");
            turns += 1;
        }

        assert!(engine.is_over(), "seed {seed} stalled after {turns} turns");
        assert_eq!(turns, usize::from(INITIAL_MOVES));
    }
}

#[test]
fn settled_board_always_offers_a_move() {
    for seed in 0..SEEDS {
        let mut engine = classic(seed);
        for _ in 0..5 {
            let Some((a, b)) = engine.hint() else {
                break;
            };
            engine.swap(a, b, &mut NullRenderer);
            if !engine.is_over() {
                assert!(has_any_valid_move(engine.board()), "seed {seed}");
            }
        }
    }
}

#[test]
fn swapping_back_and_forth_restores_the_grid() {
    for seed in 0..SEEDS {
        let engine = classic(seed);
        let mut board = engine.board().clone();
        let before = board.clone();

        for coords in before.iter_coords() {
            for neighbor in before.iter_neighbors(coords) {
                board.swap(coords, neighbor);
                board.swap(coords, neighbor);
            }
        }

        assert_eq!(board, before);
    }
}

#[test]
fn non_matching_swaps_cost_nothing() {
    for seed in 0..SEEDS {
        let mut engine = classic(seed);
        let board = engine.board().clone();
        let Some((a, b)) = board.iter_coords().find_map(|a| {
            board.iter_neighbors(a).find_map(|b| {
                let mut scratch = board.clone();
                scratch.swap(a, b);
                find_matches(&scratch).is_empty().then_some((a, b))
            })
        }) else {
            continue;
        };

        assert_eq!(engine.swap(a, b, &mut NullRenderer), SwapOutcome::Reverted);
        assert_eq!(engine.board(), &board);
        assert_eq!(engine.moves_remaining(), INITIAL_MOVES);
    }
}

#[test]
fn sliding_shuffles_reach_back_to_solved() {
    for seed in 0..SEEDS {
        let mut puzzle = SlidingPuzzle::new(SlidingConfig::default(), seed).unwrap();
        puzzle.shuffle();

        let labels: Vec<u8> = puzzle.grid().iter().collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<u8>>());
        assert_eq!(puzzle.label_at(puzzle.empty()), Some(0));
        assert!(puzzle.is_active());
    }
}
