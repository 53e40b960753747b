use rand::Rng;
use rand::seq::SliceRandom;

use crate::*;

/// First swap, in row-major order of its first cell, that would produce a match.
///
/// Every cell is tried against its right and lower neighbour on a scratch copy of the board.
pub fn find_valid_move(board: &Board) -> Option<(Coord2, Coord2)> {
    let mut scratch = board.clone();

    for here in board.iter_coords() {
        let (row, col) = here;
        for there in [(row, col + 1), (row + 1, col)] {
            if !scratch.swap(here, there) {
                continue;
            }
            let hit = !find_matches(&scratch).is_empty();
            scratch.swap(here, there);
            if hit {
                return Some((here, there));
            }
        }
    }

    None
}

pub fn has_any_valid_move(board: &Board) -> bool {
    find_valid_move(board).is_some()
}

/// Permutes every cell of the board, then clears accidental matches for at most `passes`
/// rounds of clear, collapse and refill. Returns whether the board ended up match-free.
pub fn shuffle_board<R: Rng + ?Sized>(
    board: &mut Board,
    kinds: Kind,
    passes: u32,
    rng: &mut R,
) -> bool {
    match board.as_slice_mut() {
        Some(cells) => cells.shuffle(rng),
        None => log::warn!("Board is not in standard layout, skipped permutation"),
    }

    for pass in 0..=passes {
        let found = find_matches(board);
        if found.is_empty() {
            return true;
        }
        if pass == passes {
            break;
        }
        log::trace!("Shuffle pass {} clearing {} matched cells", pass, found.len());
        for coords in found.coords {
            board.set(coords, Cell::Empty);
        }
        collapse(board);
        refill(board, kinds, rng);
    }

    log::warn!("Shuffled board still has matches after {} passes", passes);
    false
}

/// Shuffles until a legal move exists, trying at most `attempts` times but always at least once.
pub(crate) fn reshuffle_until_playable<R: Rng + ?Sized>(
    board: &mut Board,
    config: &Match3Config,
    attempts: u32,
    rng: &mut R,
) -> bool {
    let attempts = attempts.max(1);
    for _ in 0..attempts {
        shuffle_board(board, config.kinds, config.shuffle_passes, rng);
        if has_any_valid_move(board) {
            return true;
        }
    }
    log::warn!("No legal move after {} shuffles, giving up", attempts);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn board(rows: &[&[Kind]]) -> Board {
        Board::from_kinds(rows).unwrap()
    }

    #[test]
    fn finds_the_swap_that_completes_a_row() {
        let board = board(&[
            &[0, 0, 1, 0], //
            &[1, 2, 3, 4],
            &[2, 3, 4, 5],
            &[3, 4, 5, 1],
        ]);

        assert_eq!(find_valid_move(&board), Some(((0, 2), (0, 3))));
        assert!(has_any_valid_move(&board));
    }

    #[test]
    fn detects_deadlock() {
        let board = board(&[
            &[0, 1, 2, 3], //
            &[1, 2, 3, 0],
            &[2, 3, 0, 1],
            &[3, 0, 1, 2],
        ]);

        assert!(!has_any_valid_move(&board));
    }

    #[test]
    fn validator_leaves_board_untouched() {
        let board = board(&[
            &[0, 0, 1, 0], //
            &[1, 2, 3, 4],
            &[2, 3, 4, 5],
        ]);
        let before = board.clone();

        find_valid_move(&board);

        assert_eq!(board, before);
    }

    #[test]
    fn shuffle_keeps_board_full_and_kinds_in_range() {
        let mut board = board(&[
            &[0, 1, 2, 3], //
            &[1, 2, 3, 0],
            &[2, 3, 0, 1],
            &[3, 0, 1, 2],
        ]);
        let mut rng = SmallRng::seed_from_u64(42);

        let clean = shuffle_board(&mut board, 4, 10, &mut rng);

        assert_eq!(board.empty_count(), 0);
        assert!(board.iter().all(|cell| cell.kind().is_some_and(|kind| kind < 4)));
        assert_eq!(clean, find_matches(&board).is_empty());
    }

    #[test]
    fn shuffle_without_passes_only_permutes() {
        let mut board = board(&[&[0, 1, 2], &[3, 4, 5], &[0, 1, 2]]);
        let mut rng = SmallRng::seed_from_u64(1);

        shuffle_board(&mut board, 6, 0, &mut rng);

        let mut kinds: alloc::vec::Vec<_> = board.iter().filter_map(Cell::kind).collect();
        kinds.sort_unstable();
        assert_eq!(kinds, [0, 0, 1, 1, 2, 2, 3, 4, 5]);
    }

    #[test]
    fn reshuffle_runs_at_least_once() {
        let mut board = board(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8]]);
        let before = board.clone();
        let config = Match3Config {
            size: 3,
            kinds: 9,
            shuffle_passes: 0,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(5);

        let playable = reshuffle_until_playable(&mut board, &config, 0, &mut rng);

        assert!(!playable);
        assert_ne!(board, before);
        let mut kinds: alloc::vec::Vec<_> = board.iter().filter_map(Cell::kind).collect();
        kinds.sort_unstable();
        assert_eq!(kinds, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
