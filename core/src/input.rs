use serde::{Deserialize, Serialize};

use crate::*;
use crate::types::apply_delta;

/// A cardinal direction, as produced by a swipe or an arrow key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// `(row, col)` step; rows grow downwards.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The neighbour of `from` in this direction, if it is inside `bounds`.
    pub fn step(self, from: Coord2, bounds: Coord2) -> Option<Coord2> {
        apply_delta(from, self.delta(), bounds)
    }

    /// Resolves a pointer drag in screen space (y grows downwards) to its dominant axis.
    ///
    /// Drags shorter than `threshold` on both axes are taps, not swipes.
    pub fn from_drag(dx: f32, dy: f32, threshold: f32) -> Option<Self> {
        let (ax, ay) = (abs(dx), abs(dy));
        if ax < threshold && ay < threshold {
            return None;
        }
        Some(if ax >= ay {
            if dx > 0.0 { Self::Right } else { Self::Left }
        } else if dy > 0.0 {
            Self::Down
        } else {
            Self::Up
        })
    }

    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_arrow_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    /// Direction leading from `from` to the adjacent cell `to`.
    pub fn between(from: Coord2, to: Coord2) -> Option<Self> {
        if !is_adjacent(from, to) {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|dir| dir.step(from, (Coord::MAX, Coord::MAX)) == Some(to))
    }
}

// f32::abs needs std
fn abs(value: f32) -> f32 {
    if value < 0.0 { -value } else { value }
}
