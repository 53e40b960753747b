use alloc::collections::BTreeSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Totals for one resolver run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    /// Clearing iterations performed, 1 for a plain match.
    pub depth: u32,
    pub cleared: u32,
    pub score: u32,
    pub specials_created: u16,
    pub specials_fired: u16,
    /// The iteration cap stopped the loop before the board settled.
    pub halted: bool,
}

/// `round(cleared * points_per_tile * (1 + (depth - 1) * bonus_per_step))`
pub fn score_gain(cleared: u32, depth: u32, points_per_tile: u32, bonus_per_step: f64) -> u32 {
    let multiplier = 1.0 + f64::from(depth.saturating_sub(1)) * bonus_per_step;
    let raw = f64::from(cleared) * f64::from(points_per_tile) * multiplier;
    // never negative, so adding a half and truncating rounds half up
    (raw + 0.5) as u32
}

/// Lets every column fall: non-empty cells sink to the highest row, keeping their order.
pub fn collapse(board: &mut Board) {
    let (rows, cols) = board.size();
    for col in 0..cols {
        let mut write_row = rows;
        for row in (0..rows).rev() {
            let cell = board[(row, col)];
            if cell.is_empty() {
                continue;
            }
            write_row -= 1;
            if write_row != row {
                board.set((write_row, col), cell);
                board.set((row, col), Cell::Empty);
            }
        }
    }
}

/// Fills every empty cell with a random plain tile, returning how many were drawn.
pub fn refill<R: Rng + ?Sized>(board: &mut Board, kinds: Kind, rng: &mut R) -> CellCount {
    let mut filled = 0;
    for coords in board.iter_coords() {
        if board[coords].is_empty() {
            board.set(coords, Cell::Tile(rng.random_range(0..kinds)));
            filled += 1;
        }
    }
    filled
}

/// Where the cell at `coords` ends up once [`collapse`] runs.
fn landing_row(board: &Board, (row, col): Coord2) -> Coord2 {
    let drop = (row + 1..board.rows())
        .filter(|&below| board[(below, col)].is_empty())
        .count();
    (row + drop as Coord, col)
}

/// Drives clear, collapse, refill and re-match until the board settles.
pub struct CascadeResolver<'a, R: ?Sized, V: ?Sized> {
    board: &'a mut Board,
    rng: &'a mut R,
    config: &'a Match3Config,
    renderer: &'a mut V,
}

impl<'a, R, V> CascadeResolver<'a, R, V>
where
    R: Rng + ?Sized,
    V: Renderer + ?Sized,
{
    pub fn new(
        board: &'a mut Board,
        rng: &'a mut R,
        config: &'a Match3Config,
        renderer: &'a mut V,
    ) -> Self {
        Self {
            board,
            rng,
            config,
            renderer,
        }
    }

    /// Resolves `initial` and everything it sets off.
    ///
    /// `swap` holds the endpoints of the move that produced `initial`, if any; it only
    /// steers special placement on the first iteration. Score and best score in `session`
    /// are updated after every iteration.
    pub fn resolve(
        self,
        session: &mut SessionState,
        initial: MatchSet,
        swap: Option<(Coord2, Coord2)>,
    ) -> CascadeReport {
        let Self {
            board,
            rng,
            config,
            renderer,
        } = self;

        let mut report = CascadeReport::default();
        let mut swap = swap;
        let mut found = initial;
        let mut primed = BTreeSet::new();
        session.cascade_depth = 0;

        loop {
            let mut clear = core::mem::take(&mut found.coords);
            clear.append(&mut primed);
            if clear.is_empty() {
                break;
            }
            if report.depth >= config.max_cascade_depth {
                log::warn!(
                    "Cascade stopped after {} iterations with {} cells still matched",
                    report.depth,
                    clear.len()
                );
                report.halted = true;
                break;
            }

            report.depth += 1;
            session.cascade_depth = report.depth;

            let mut placements = plan_specials(&found.runs, swap.take());
            let pass = expand_effects(board, &mut clear);
            placements.retain(|placement| !pass.primed.contains(&placement.at));
            for placement in &placements {
                clear.remove(&placement.at);
            }

            let mut cleared = 0;
            for &coords in &clear {
                if !board[coords].is_empty() {
                    board.set(coords, Cell::Empty);
                    cleared += 1;
                }
            }
            for placement in &placements {
                board.set(placement.at, placement.cell);
            }

            let gained = score_gain(
                cleared,
                report.depth,
                config.points_per_tile,
                config.cascade_bonus_per_step,
            );
            session.score = session.score.saturating_add(gained);
            session.best = session.best.max(session.score);
            report.cleared += cleared;
            report.score = report.score.saturating_add(gained);
            report.specials_created = report
                .specials_created
                .saturating_add(u16::try_from(placements.len()).unwrap_or(u16::MAX));
            report.specials_fired = report
                .specials_fired
                .saturating_add(u16::try_from(pass.fired.len()).unwrap_or(u16::MAX));
            log::trace!(
                "Cascade step {}: cleared {}, fired {:?}, scored {}",
                report.depth,
                cleared,
                pass.fired,
                gained
            );

            renderer.cue(Cue::Clear);
            render(renderer, board, session);
            renderer.settle(Phase::Cleared);

            primed = pass
                .primed
                .iter()
                .map(|&coords| landing_row(board, coords))
                .collect();

            collapse(board);
            render(renderer, board, session);
            renderer.settle(Phase::Collapsed);

            refill(board, config.kinds, rng);
            render(renderer, board, session);
            renderer.settle(Phase::Refilled);

            found = find_matches(board);
        }

        log::debug!(
            "Cascade finished: depth {}, cleared {}, scored {}",
            report.depth,
            report.cleared,
            report.score
        );
        report
    }
}

fn render<V: Renderer + ?Sized>(renderer: &mut V, board: &Board, session: &SessionState) {
    renderer.render(&View {
        board,
        session,
        selected: None,
        resolving: true,
    });
}
