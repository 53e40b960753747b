use alloc::vec;
use core::time::Duration;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Label of the empty slot.
pub const EMPTY_LABEL: u8 = 0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleState {
    /// Solved layout on display, nothing moves until a shuffle.
    Ready,
    Active,
    Won,
}

impl Default for PuzzleState {
    fn default() -> Self {
        Self::Ready
    }
}

/// An N x N sliding number puzzle.
///
/// The labels are always a permutation of `0..N*N` with 0 as the empty slot, and every
/// layout reached through [`SlidingPuzzle::shuffle`] can be solved because it is made
/// only of legal moves.
#[derive(Clone, Debug)]
pub struct SlidingPuzzle {
    config: SlidingConfig,
    grid: Grid<u8>,
    empty: Coord2,
    moves: u32,
    state: PuzzleState,
    rng: SmallRng,
    stopwatch: Stopwatch,
}

impl SlidingPuzzle {
    /// A solved puzzle, waiting for a shuffle.
    pub fn new(config: SlidingConfig, seed: u64) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            config,
            grid: solved_grid(config.size),
            empty: solved_empty(config.size),
            moves: 0,
            state: PuzzleState::Ready,
            rng: SmallRng::seed_from_u64(seed),
            stopwatch: Stopwatch::default(),
        })
    }

    /// Resumes a given layout. Solvability is not checked, only that the labels form a
    /// permutation of a square board.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R], seed: u64) -> Result<Self> {
        let grid = Grid::from_rows(rows)?;
        let (size, cols) = grid.size();
        if size != cols {
            return Err(GameError::InvalidBoardShape);
        }
        let config = SlidingConfig {
            size,
            ..Default::default()
        }
        .validate()?;

        let mut seen = vec![false; grid.total_cells().into()];
        for label in grid.iter() {
            match seen.get_mut(usize::from(label)) {
                Some(seen) if !*seen => *seen = true,
                _ => return Err(GameError::InvalidPermutation),
            }
        }
        let empty = grid
            .position(EMPTY_LABEL)
            .ok_or(GameError::InvalidPermutation)?;

        let mut puzzle = Self {
            config,
            grid,
            empty,
            moves: 0,
            state: PuzzleState::Active,
            rng: SmallRng::seed_from_u64(seed),
            stopwatch: Stopwatch::default(),
        };
        if puzzle.check_win() {
            puzzle.state = PuzzleState::Ready;
        } else {
            puzzle.stopwatch.start();
        }
        Ok(puzzle)
    }

    pub fn config(&self) -> &SlidingConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid<u8> {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn label_at(&self, coords: Coord2) -> Option<u8> {
        self.grid.get(coords)
    }

    pub fn empty(&self) -> Coord2 {
        self.empty
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn state(&self) -> PuzzleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, PuzzleState::Active)
    }

    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }

    /// Whether the tile at `coords` touches the empty slot along a row or column.
    pub fn can_move(&self, coords: Coord2) -> bool {
        self.grid.in_bounds(coords) && is_adjacent(coords, self.empty)
    }

    pub fn movable_tiles(&self) -> SmallVec<[Coord2; 4]> {
        self.grid.iter_neighbors(self.empty).collect()
    }

    /// Slides the tile at `coords` into the empty slot.
    pub fn move_tile(&mut self, coords: Coord2) -> SlideOutcome {
        if !self.is_active() || !self.can_move(coords) {
            return SlideOutcome::NoChange;
        }

        self.slide_from(coords);
        self.moves += 1;

        if self.check_win() {
            self.state = PuzzleState::Won;
            self.stopwatch.stop();
            log::debug!(
                "Puzzle solved in {} moves, {:?}",
                self.moves,
                self.stopwatch.elapsed()
            );
            SlideOutcome::Won
        } else {
            SlideOutcome::Moved
        }
    }

    /// Arrow key: the tile on the far side of the empty slot moves the way the arrow points.
    pub fn press(&mut self, direction: Direction) -> SlideOutcome {
        match direction.opposite().step(self.empty, self.grid.size()) {
            Some(coords) => self.move_tile(coords),
            None => SlideOutcome::NoChange,
        }
    }

    /// Random walk of the empty slot from the current layout, then starts the clock.
    pub fn shuffle(&mut self) {
        for _ in 0..self.config.shuffle_moves {
            let options = self.movable_tiles();
            if let Some(&coords) = options.choose(&mut self.rng) {
                self.slide_from(coords);
            }
        }

        self.moves = 0;
        self.state = PuzzleState::Active;
        self.stopwatch.start();
        log::debug!(
            "Shuffled with {} random moves, empty slot at {:?}",
            self.config.shuffle_moves,
            self.empty
        );
    }

    /// Labels ascend in row-major order and the empty slot is last.
    pub fn check_win(&self) -> bool {
        let size = self.config.size;
        self.grid
            .iter_coords()
            .all(|coords| self.grid[coords] == solved_label(coords, size))
    }

    /// Tiles worth highlighting: every tile that can move right now.
    pub fn hint(&self) -> SmallVec<[Coord2; 4]> {
        if self.is_active() {
            self.movable_tiles()
        } else {
            SmallVec::new()
        }
    }

    /// Gives up: shows the solved layout and stops the clock. Not counted as a win.
    pub fn auto_solve(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.grid = solved_grid(self.config.size);
        self.empty = solved_empty(self.config.size);
        self.state = PuzzleState::Ready;
        self.stopwatch.stop();
        true
    }

    pub fn reset(&mut self) {
        self.grid = solved_grid(self.config.size);
        self.empty = solved_empty(self.config.size);
        self.moves = 0;
        self.state = PuzzleState::Ready;
        self.stopwatch.reset();
    }

    pub fn new_game(&mut self) {
        self.reset();
        self.shuffle();
    }

    fn slide_from(&mut self, coords: Coord2) {
        self.grid.swap(coords, self.empty);
        self.empty = coords;
    }
}

fn solved_label((row, col): Coord2, size: Coord) -> u8 {
    let total = mult(size, size);
    // the last cell wraps round to the empty label
    ((mult(row, size) + CellCount::from(col) + 1) % total) as u8
}

fn solved_grid(size: Coord) -> Grid<u8> {
    Grid::from_fn((size, size), |coords| solved_label(coords, size))
}

const fn solved_empty(size: Coord) -> Coord2 {
    (size - 1, size - 1)
}
