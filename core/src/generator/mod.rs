use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: &Match3Config) -> Board;
}

/// Hands out a fixed layout, for scripted levels and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetBoardGenerator {
    board: Board,
}

impl PresetBoardGenerator {
    pub fn new(board: Board) -> Self {
        Self { board }
    }
}

impl BoardGenerator for PresetBoardGenerator {
    fn generate(self, config: &Match3Config) -> Board {
        if self.board.size() != config.board_size() {
            log::warn!(
                "Preset board is {:?} but config expects {:?}",
                self.board.size(),
                config.board_size()
            );
        }
        self.board
    }
}
