use rand::prelude::*;
use smallvec::SmallVec;

use super::*;
use crate::matcher::completes_backward_run;

/// Deals boards with no run of three, re-dealing until at least one swap scores.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: &Match3Config) -> Board {
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut board = deal(config, &mut rng);
        let mut attempts = 1;
        while !has_any_valid_move(&board) {
            if attempts >= config.generation_retries {
                log::warn!(
                    "Dealt {} boards without a legal move, keeping the last one",
                    attempts
                );
                break;
            }
            board = deal(config, &mut rng);
            attempts += 1;
        }

        log::debug!("Generated board after {} deal(s)", attempts);
        board
    }
}

/// Fills the board row by row, drawing each tile among the kinds that would not complete a
/// run with the pair to its left or the pair above it.
fn deal<R: Rng + ?Sized>(config: &Match3Config, rng: &mut R) -> Board {
    let mut board = Board::new(config.board_size());

    for coords in board.iter_coords() {
        let allowed: SmallVec<[Kind; 8]> = (0..config.kinds)
            .filter(|&kind| !completes_backward_run(&board, coords, kind))
            .collect();
        let kind = match allowed.choose(rng) {
            Some(&kind) => kind,
            None => rng.random_range(0..config.kinds),
        };
        board.set(coords, Cell::Tile(kind));
    }

    board
}
