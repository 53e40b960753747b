use serde::{Deserialize, Serialize};

use crate::Kind;

/// Area of effect carried by a special tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    RowClear,
    ColumnClear,
    Bomb,
}

/// One match-3 board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Cleared, waiting for gravity and refill.
    Empty,
    Tile(Kind),
    /// Matches like a plain tile of its kind, fires its effect when cleared.
    Special(Kind, Effect),
}

impl Cell {
    pub const fn kind(self) -> Option<Kind> {
        match self {
            Self::Empty => None,
            Self::Tile(kind) | Self::Special(kind, _) => Some(kind),
        }
    }

    pub const fn effect(self) -> Option<Effect> {
        match self {
            Self::Special(_, effect) => Some(effect),
            _ => None,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_special(self) -> bool {
        matches!(self, Self::Special(..))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<Kind> for Cell {
    fn from(kind: Kind) -> Self {
        Self::Tile(kind)
    }
}
