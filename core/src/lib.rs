#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cascade::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use input::*;
pub use matcher::*;
pub use moves::*;
pub use render::*;
pub use sliding::*;
pub use snapshot::*;
pub use special::*;
pub use stopwatch::*;
pub use storage::*;
pub use tile::*;
pub use types::*;

mod cascade;
mod engine;
mod error;
mod generator;
mod grid;
mod input;
mod matcher;
mod moves;
mod render;
mod sliding;
mod snapshot;
mod special;
mod stopwatch;
mod storage;
mod tile;
mod types;

pub const BOARD_SIZE: Coord = 8;
pub const TILE_KINDS: Kind = 6;
pub const INITIAL_MOVES: u16 = 24;
pub const SCORE_PER_TILE: u32 = 10;
/// +25% per cascade step beyond the first.
pub const CASCADE_BONUS_PER_STEP: f64 = 0.25;
pub const MAX_CASCADE_DEPTH: u32 = 64;
pub const GENERATION_RETRIES: u32 = 20;
pub const SHUFFLE_PASSES: u32 = 10;
pub const UNDO_DEPTH: u8 = 5;
pub const HAMMERS: u8 = 3;

pub const SLIDING_SIZE: Coord = 4;
pub const SLIDING_SHUFFLE_MOVES: u32 = 1000;

/// Score goal for a level, and how much it grows once reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub target: u32,
    pub target_step: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Match3Config {
    /// Board side, boards are always square.
    pub size: Coord,
    pub kinds: Kind,
    pub moves: u16,
    pub points_per_tile: u32,
    pub cascade_bonus_per_step: f64,
    pub max_cascade_depth: u32,
    pub generation_retries: u32,
    pub shuffle_passes: u32,
    pub undo_depth: u8,
    pub hammers: u8,
    pub level: Option<LevelConfig>,
}

impl Match3Config {
    pub fn new(size: Coord, kinds: Kind, moves: u16) -> Self {
        Self {
            size: size.clamp(3, Coord::MAX),
            kinds: kinds.max(3),
            moves,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|err| GameError::ConfigParse {
            line: err.line(),
            column: err.column(),
        })?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self> {
        if self.size < 3 {
            return Err(GameError::InvalidConfig("board must be at least 3x3"));
        }
        if self.kinds < 3 {
            return Err(GameError::InvalidConfig("at least 3 tile kinds are needed"));
        }
        if self.moves == 0 {
            return Err(GameError::InvalidConfig("at least one move is needed"));
        }
        if !self.cascade_bonus_per_step.is_finite() || self.cascade_bonus_per_step < 0.0 {
            return Err(GameError::InvalidConfig("cascade bonus must be a non-negative number"));
        }
        if self.max_cascade_depth == 0 {
            return Err(GameError::InvalidConfig("cascade depth cap must be positive"));
        }
        if self.generation_retries == 0 {
            return Err(GameError::InvalidConfig("generation retries must be positive"));
        }
        if let Some(level) = self.level
            && level.target == 0
        {
            return Err(GameError::InvalidConfig("level target must be positive"));
        }
        Ok(self)
    }

    pub const fn board_size(&self) -> Coord2 {
        (self.size, self.size)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

impl Default for Match3Config {
    fn default() -> Self {
        Self {
            size: BOARD_SIZE,
            kinds: TILE_KINDS,
            moves: INITIAL_MOVES,
            points_per_tile: SCORE_PER_TILE,
            cascade_bonus_per_step: CASCADE_BONUS_PER_STEP,
            max_cascade_depth: MAX_CASCADE_DEPTH,
            generation_retries: GENERATION_RETRIES,
            shuffle_passes: SHUFFLE_PASSES,
            undo_depth: UNDO_DEPTH,
            hammers: HAMMERS,
            level: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlidingConfig {
    pub size: Coord,
    /// Random legal moves made by a shuffle.
    pub shuffle_moves: u32,
}

impl SlidingConfig {
    pub fn new(size: Coord) -> Self {
        Self {
            size: size.clamp(2, 16),
            ..Default::default()
        }
    }

    pub fn validate(self) -> Result<Self> {
        // labels are u8, so 16x16 is the largest board
        if !(2..=16).contains(&self.size) {
            return Err(GameError::InvalidConfig("sliding board must be 2x2 to 16x16"));
        }
        Ok(self)
    }

    pub const fn board_size(&self) -> Coord2 {
        (self.size, self.size)
    }
}

impl Default for SlidingConfig {
    fn default() -> Self {
        Self {
            size: SLIDING_SIZE,
            shuffle_moves: SLIDING_SHUFFLE_MOVES,
        }
    }
}

/// Why an input was dropped without touching the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A cascade or shuffle is in flight.
    Busy,
    GameOver,
    OutOfBounds,
    NotAdjacent,
    NoHammers,
}

/// What a scoring action did besides the cascade itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub cascade: CascadeReport,
    pub level_up: bool,
    pub reshuffled: bool,
    pub game_over: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    Ignored(IgnoreReason),
    /// No match, the swap was undone and no move was spent.
    Reverted,
    Resolved(TurnReport),
}

impl SwapOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Ignored(_) => false,
            Self::Reverted => true,
            Self::Resolved(_) => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Ignored(IgnoreReason),
    Selected(Coord2),
    Deselected,
    Swapped(SwapOutcome),
}

impl TapOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Ignored(_) => false,
            Self::Selected(_) => true,
            Self::Deselected => true,
            Self::Swapped(outcome) => outcome.has_update(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlideOutcome {
    NoChange,
    Moved,
    Won,
}

impl SlideOutcome {
    pub const fn has_update(self) -> bool {
        use SlideOutcome::*;
        match self {
            NoChange => false,
            Moved => true,
            Won => true,
        }
    }
}
