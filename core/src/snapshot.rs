use serde::{Deserialize, Serialize};

use crate::*;

/// Restorable copy of the parts of a session that a scoring action changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub score: u32,
    pub moves_remaining: u16,
    pub hammers: u8,
    pub level: Option<Level>,
}

impl Snapshot {
    pub fn from_engine<S: ScoreStore>(engine: &Match3Engine<S>) -> Self {
        let session = engine.session();
        Self {
            board: engine.board().clone(),
            score: session.score,
            moves_remaining: session.moves_remaining,
            hammers: session.hammers,
            level: session.level,
        }
    }

    /// Writes the snapshot back, leaving the best score and the cascade counter alone.
    pub(crate) fn restore(self, board: &mut Board, session: &mut SessionState) {
        *board = self.board;
        session.score = self.score;
        session.moves_remaining = self.moves_remaining;
        session.hammers = self.hammers;
        session.level = self.level;
    }
}
