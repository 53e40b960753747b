use alloc::collections::BTreeSet;
use core::ops::Bound::{Excluded, Unbounded};
use smallvec::SmallVec;

use crate::*;

/// A special tile to be written over a cell of the run that earned it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub at: Coord2,
    pub cell: Cell,
}

/// Specials that fired during one expansion pass, and the ones left primed for the next.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionPass {
    pub fired: SmallVec<[(Coord2, Effect); 4]>,
    pub primed: BTreeSet<Coord2>,
}

/// Four in a line clears that line, five or more makes a bomb.
pub const fn effect_for_run(run: &Run) -> Option<Effect> {
    match run.len {
        0..=3 => None,
        4 => Some(match run.axis {
            Axis::Horizontal => Effect::RowClear,
            Axis::Vertical => Effect::ColumnClear,
        }),
        _ => Some(Effect::Bomb),
    }
}

/// Chooses where each long run leaves its special.
///
/// A swap endpoint inside the run wins, otherwise the first cell of the run. Two runs never
/// share a placement: the later one moves on to its next free cell.
pub fn plan_specials(runs: &[Run], swap: Option<(Coord2, Coord2)>) -> SmallVec<[Placement; 4]> {
    let mut placements: SmallVec<[Placement; 4]> = SmallVec::new();

    for run in runs {
        let Some(effect) = effect_for_run(run) else {
            continue;
        };

        let taken = |coords: Coord2| placements.iter().any(|placement| placement.at == coords);
        let at = swap
            .into_iter()
            .flat_map(|(a, b)| [a, b])
            .find(|&end| run.contains(end) && !taken(end))
            .or_else(|| run.cells().find(|&coords| !taken(coords)));

        if let Some(at) = at {
            log::trace!("{:?} run of {} earns {:?} at {:?}", run.axis, run.len, effect, at);
            placements.push(Placement {
                at,
                cell: Cell::Special(run.kind, effect),
            });
        }
    }

    placements
}

/// Cells hit when `effect` fires at `at`, clipped to the board.
pub fn area_of_effect(
    effect: Effect,
    (row, col): Coord2,
    (rows, cols): Coord2,
) -> impl Iterator<Item = Coord2> {
    let (row_range, col_range) = match effect {
        Effect::RowClear => (row..row + 1, 0..cols),
        Effect::ColumnClear => (0..rows, col..col + 1),
        Effect::Bomb => (
            row.saturating_sub(1)..row.saturating_add(2).min(rows),
            col.saturating_sub(1)..col.saturating_add(2).min(cols),
        ),
    };
    row_range.flat_map(move |r| col_range.clone().map(move |c| (r, c)))
}

/// Adds the area of every special in `clear` to `clear`, in a single row-major pass.
///
/// A special caught ahead of the scan position fires in the same pass. One caught behind it
/// stays out of `clear` and is returned as primed, to fire on the next cascade iteration.
pub fn expand_effects(board: &Board, clear: &mut BTreeSet<Coord2>) -> ExpansionPass {
    let mut pass = ExpansionPass::default();
    let mut triggers: BTreeSet<Coord2> = clear
        .iter()
        .copied()
        .filter(|&coords| board.get(coords).is_some_and(Cell::is_special))
        .collect();

    let mut cursor = None;
    loop {
        let next = match cursor {
            None => triggers.first().copied(),
            Some(at) => triggers.range((Excluded(at), Unbounded)).next().copied(),
        };
        let Some(at) = next else {
            break;
        };
        cursor = Some(at);

        let Some(effect) = board[at].effect() else {
            continue;
        };
        pass.fired.push((at, effect));

        for hit in area_of_effect(effect, at, board.size()) {
            if clear.contains(&hit) || board[hit].is_empty() {
                continue;
            }
            if !board[hit].is_special() {
                clear.insert(hit);
            } else if hit > at {
                pass.primed.remove(&hit);
                clear.insert(hit);
                triggers.insert(hit);
            } else {
                pass.primed.insert(hit);
            }
        }
    }

    pass
}
