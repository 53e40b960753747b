use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Shortest run that counts as a match.
pub const MIN_RUN: Coord = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Maximal run of equal-kind tiles along one axis.
///
/// `fixed` is the row for horizontal runs and the column for vertical ones, `start` is the
/// first index along the run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub axis: Axis,
    pub fixed: Coord,
    pub start: Coord,
    pub len: Coord,
    pub kind: Kind,
}

impl Run {
    pub const fn at(&self, offset: Coord) -> Coord2 {
        let along = self.start + offset;
        match self.axis {
            Axis::Horizontal => (self.fixed, along),
            Axis::Vertical => (along, self.fixed),
        }
    }

    pub const fn first(&self) -> Coord2 {
        self.at(0)
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord2> + use<> {
        let run = *self;
        (0..run.len).map(move |offset| run.at(offset))
    }

    pub const fn contains(&self, (row, col): Coord2) -> bool {
        let (fixed, along) = match self.axis {
            Axis::Horizontal => (row, col),
            Axis::Vertical => (col, row),
        };
        fixed == self.fixed && along >= self.start && along < self.start + self.len
    }
}

/// Result of a full-board scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchSet {
    pub coords: BTreeSet<Coord2>,
    pub runs: Vec<Run>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.coords.contains(&coords)
    }
}

/// Scans every row, then every column, for runs of at least [`MIN_RUN`] tiles.
pub fn find_matches(board: &Board) -> MatchSet {
    let (rows, cols) = board.size();
    let mut found = MatchSet::default();

    for row in 0..rows {
        scan_line(board, Axis::Horizontal, row, cols, &mut found);
    }
    for col in 0..cols {
        scan_line(board, Axis::Vertical, col, rows, &mut found);
    }

    found
}

fn scan_line(board: &Board, axis: Axis, fixed: Coord, len: Coord, found: &mut MatchSet) {
    let coords_at = |along: Coord| match axis {
        Axis::Horizontal => (fixed, along),
        Axis::Vertical => (along, fixed),
    };

    let mut flush = |kind: Option<Kind>, start: Coord, run_len: Coord| {
        if let Some(kind) = kind
            && run_len >= MIN_RUN
        {
            let run = Run {
                axis,
                fixed,
                start,
                len: run_len,
                kind,
            };
            found.coords.extend(run.cells());
            found.runs.push(run);
        }
    };

    let mut run_kind = None;
    let mut run_start = 0;
    let mut run_len = 0;
    for along in 0..len {
        let kind = board[coords_at(along)].kind();
        if kind.is_some() && kind == run_kind {
            run_len += 1;
        } else {
            flush(run_kind, run_start, run_len);
            run_kind = kind;
            run_start = along;
            run_len = 1;
        }
    }
    flush(run_kind, run_start, run_len);
}

/// Whether the tile at `coords` completes a run with the two cells to its left or the two
/// cells above it. Only looks backwards, which is all row-major generation needs.
pub fn creates_immediate_match(board: &Board, coords: Coord2) -> bool {
    let Some(kind) = board.get(coords).and_then(Cell::kind) else {
        return false;
    };
    completes_backward_run(board, coords, kind)
}

pub(crate) fn completes_backward_run(board: &Board, (row, col): Coord2, kind: Kind) -> bool {
    let same = |coords: Coord2| board.get(coords).and_then(Cell::kind) == Some(kind);

    let left = col >= 2 && same((row, col - 1)) && same((row, col - 2));
    let up = row >= 2 && same((row - 1, col)) && same((row - 2, col));
    left || up
}
