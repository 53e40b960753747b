use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::moves::reshuffle_until_playable;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Waiting for input.
    Idle,
    /// A swap, hammer or shuffle is being resolved, input is dropped.
    Resolving,
    /// Out of moves.
    Over,
}

impl EngineState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    pub target: u32,
}

/// Counters shown next to the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    pub moves_remaining: u16,
    pub best: u32,
    /// Iterations of the last or current cascade.
    pub cascade_depth: u32,
    pub level: Option<Level>,
    pub hammers: u8,
}

impl SessionState {
    fn fresh(config: &Match3Config, best: u32) -> Self {
        Self {
            score: 0,
            moves_remaining: config.moves,
            best,
            cascade_depth: 0,
            level: config.level.map(|level| Level {
                number: 1,
                target: level.target,
            }),
            hammers: config.hammers,
        }
    }
}

/// A match-3 session: board, selection, counters and undo history.
#[derive(Clone, Debug)]
pub struct Match3Engine<S: ScoreStore = MemoryStore> {
    config: Match3Config,
    board: Board,
    rng: SmallRng,
    session: SessionState,
    selected: Option<Coord2>,
    state: EngineState,
    history: VecDeque<Snapshot>,
    store: S,
}

impl<S: ScoreStore> Match3Engine<S> {
    pub fn new(config: Match3Config, seed: u64, store: S) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let generator = RandomBoardGenerator::new(rng.random());
        Self::from_parts(config, generator, rng, store)
    }

    /// Starts on the board `generator` produces, which must be full and sized as configured.
    pub fn with_generator<G: BoardGenerator>(
        config: Match3Config,
        generator: G,
        seed: u64,
        store: S,
    ) -> Result<Self> {
        Self::from_parts(config, generator, SmallRng::seed_from_u64(seed), store)
    }

    fn from_parts<G: BoardGenerator>(
        config: Match3Config,
        generator: G,
        rng: SmallRng,
        store: S,
    ) -> Result<Self> {
        let config = config.validate()?;
        let board = generator.generate(&config);
        if board.size() != config.board_size() || board.empty_count() != 0 {
            return Err(GameError::InvalidBoardShape);
        }
        if board.iter().any(|cell| cell.kind().is_some_and(|kind| kind >= config.kinds)) {
            return Err(GameError::InvalidConfig("board uses more kinds than configured"));
        }

        let session = SessionState::fresh(&config, store.load_best());
        log::debug!(
            "New {}x{} session with {} moves, best {}",
            config.size,
            config.size,
            session.moves_remaining,
            session.best
        );

        Ok(Self {
            config,
            board,
            rng,
            session,
            selected: None,
            state: EngineState::Idle,
            history: VecDeque::with_capacity(config.undo_depth.into()),
            store,
        })
    }

    pub fn config(&self) -> &Match3Config {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn selected(&self) -> Option<Coord2> {
        self.selected
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn best(&self) -> u32 {
        self.session.best
    }

    pub fn moves_remaining(&self) -> u16 {
        self.session.moves_remaining
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> View<'_> {
        View {
            board: &self.board,
            session: &self.session,
            selected: self.selected,
            resolving: matches!(self.state, EngineState::Resolving),
        }
    }

    /// Click or tap on a cell.
    ///
    /// The first tap selects, tapping the selection again clears it, tapping a neighbour
    /// of the selection swaps the two, and tapping anywhere else moves the selection.
    pub fn tap<V: Renderer + ?Sized>(&mut self, at: Coord2, renderer: &mut V) -> TapOutcome {
        if let Some(reason) = self.input_blocked() {
            return TapOutcome::Ignored(reason);
        }
        if !self.board.in_bounds(at) {
            return TapOutcome::Ignored(IgnoreReason::OutOfBounds);
        }

        let outcome = match self.selected {
            Some(prev) if prev == at => {
                self.selected = None;
                TapOutcome::Deselected
            }
            Some(prev) if is_adjacent(prev, at) => {
                self.selected = None;
                return TapOutcome::Swapped(self.swap(prev, at, renderer));
            }
            _ => {
                self.selected = Some(at);
                TapOutcome::Selected(at)
            }
        };

        renderer.render(&self.view());
        outcome
    }

    /// Drag starting on `from` towards `direction`.
    pub fn swipe<V: Renderer + ?Sized>(
        &mut self,
        from: Coord2,
        direction: Direction,
        renderer: &mut V,
    ) -> SwapOutcome {
        if let Some(reason) = self.input_blocked() {
            return SwapOutcome::Ignored(reason);
        }
        if !self.board.in_bounds(from) {
            return SwapOutcome::Ignored(IgnoreReason::OutOfBounds);
        }
        match direction.step(from, self.board.size()) {
            Some(to) => self.swap(from, to, renderer),
            None => SwapOutcome::Ignored(IgnoreReason::OutOfBounds),
        }
    }

    /// Swaps two adjacent tiles and resolves everything the swap sets off.
    ///
    /// A swap that makes no match is swapped back and costs nothing. Otherwise one move
    /// is spent and the cascade runs to completion before this returns.
    pub fn swap<V: Renderer + ?Sized>(
        &mut self,
        a: Coord2,
        b: Coord2,
        renderer: &mut V,
    ) -> SwapOutcome {
        if let Some(reason) = self.input_blocked() {
            return SwapOutcome::Ignored(reason);
        }
        if !self.board.in_bounds(a) || !self.board.in_bounds(b) {
            return SwapOutcome::Ignored(IgnoreReason::OutOfBounds);
        }
        if !is_adjacent(a, b) {
            return SwapOutcome::Ignored(IgnoreReason::NotAdjacent);
        }

        let before = Snapshot::from_engine(self);
        self.selected = None;
        self.state = EngineState::Resolving;

        self.board.swap(a, b);
        renderer.render(&self.view());
        renderer.settle(Phase::Swapped);

        let found = find_matches(&self.board);
        if found.is_empty() {
            self.board.swap(a, b);
            self.state = EngineState::Idle;
            renderer.cue(Cue::Bad);
            renderer.render(&self.view());
            renderer.settle(Phase::Reverted);
            log::debug!("Swap {:?} <-> {:?} made no match, reverted", a, b);
            return SwapOutcome::Reverted;
        }

        renderer.cue(Cue::Ok);
        self.push_history(before);
        self.session.moves_remaining = self.session.moves_remaining.saturating_sub(1);
        log::debug!(
            "Swap {:?} <-> {:?} matched {} cells, {} moves left",
            a,
            b,
            found.len(),
            self.session.moves_remaining
        );

        let cascade = CascadeResolver::new(&mut self.board, &mut self.rng, &self.config, renderer)
            .resolve(&mut self.session, found, Some((a, b)));
        SwapOutcome::Resolved(self.finish_turn(cascade, renderer))
    }

    /// Smashes one tile without spending a move. A special tile fires as it breaks.
    pub fn use_hammer<V: Renderer + ?Sized>(
        &mut self,
        at: Coord2,
        renderer: &mut V,
    ) -> SwapOutcome {
        if let Some(reason) = self.input_blocked() {
            return SwapOutcome::Ignored(reason);
        }
        if !self.board.in_bounds(at) {
            return SwapOutcome::Ignored(IgnoreReason::OutOfBounds);
        }
        if self.session.hammers == 0 {
            return SwapOutcome::Ignored(IgnoreReason::NoHammers);
        }

        let before = Snapshot::from_engine(self);
        self.push_history(before);
        self.session.hammers -= 1;
        self.selected = None;
        self.state = EngineState::Resolving;
        log::debug!(
            "Hammer on {:?}, {} hammers left",
            at,
            self.session.hammers
        );

        let initial = MatchSet {
            coords: BTreeSet::from([at]),
            runs: Vec::new(),
        };
        let cascade = CascadeResolver::new(&mut self.board, &mut self.rng, &self.config, renderer)
            .resolve(&mut self.session, initial, None);
        SwapOutcome::Resolved(self.finish_turn(cascade, renderer))
    }

    /// Player-requested reshuffle. Scores nothing and costs nothing.
    pub fn shuffle<V: Renderer + ?Sized>(&mut self, renderer: &mut V) -> bool {
        if self.input_blocked().is_some() {
            return false;
        }

        self.selected = None;
        self.state = EngineState::Resolving;
        shuffle_board(
            &mut self.board,
            self.config.kinds,
            self.config.shuffle_passes,
            &mut self.rng,
        );
        if !has_any_valid_move(&self.board) {
            reshuffle_until_playable(
                &mut self.board,
                &self.config,
                self.config.generation_retries,
                &mut self.rng,
            );
        }
        self.state = EngineState::Idle;

        renderer.render(&self.view());
        renderer.settle(Phase::Shuffled);
        true
    }

    /// Rolls back the last swap or hammer. The best score stays where it is.
    pub fn undo<V: Renderer + ?Sized>(&mut self, renderer: &mut V) -> bool {
        if self.input_blocked().is_some() {
            return false;
        }
        let Some(snapshot) = self.history.pop_back() else {
            return false;
        };

        snapshot.restore(&mut self.board, &mut self.session);
        self.session.cascade_depth = 0;
        self.selected = None;
        log::debug!("Undo, {} steps left in history", self.history.len());

        renderer.render(&self.view());
        true
    }

    /// A swap that would score, if any.
    pub fn hint(&self) -> Option<(Coord2, Coord2)> {
        if self.state != EngineState::Idle {
            return None;
        }
        find_valid_move(&self.board)
    }

    /// Deals a new board with fresh counters. The best score is kept.
    pub fn reset<V: Renderer + ?Sized>(&mut self, renderer: &mut V) {
        let generator = RandomBoardGenerator::new(self.rng.random());
        self.board = generator.generate(&self.config);
        self.session = SessionState::fresh(&self.config, self.session.best);
        self.selected = None;
        self.state = EngineState::Idle;
        self.history.clear();
        log::debug!("Session reset");

        renderer.render(&self.view());
    }

    fn finish_turn<V: Renderer + ?Sized>(
        &mut self,
        cascade: CascadeReport,
        renderer: &mut V,
    ) -> TurnReport {
        let mut report = TurnReport {
            cascade,
            ..Default::default()
        };

        self.session.best = record_best(&mut self.store, self.session.score);

        if let (Some(level), Some(levels)) = (self.session.level.as_mut(), self.config.level)
            && self.session.score >= level.target
        {
            level.number += 1;
            level.target = level.target.saturating_add(levels.target_step);
            self.session.moves_remaining = self.config.moves;
            report.level_up = true;
            log::debug!("Reached level {}, next target {}", level.number, level.target);
        }

        if self.session.moves_remaining == 0 {
            self.state = EngineState::Over;
            report.game_over = true;
            log::debug!("Out of moves, final score {}", self.session.score);
        } else {
            if !has_any_valid_move(&self.board) {
                log::debug!("No legal move left, reshuffling");
                reshuffle_until_playable(
                    &mut self.board,
                    &self.config,
                    self.config.generation_retries,
                    &mut self.rng,
                );
                report.reshuffled = true;
                renderer.render(&self.view());
                renderer.settle(Phase::Shuffled);
            }
            self.state = EngineState::Idle;
        }

        renderer.render(&self.view());
        report
    }

    fn push_history(&mut self, snapshot: Snapshot) {
        let depth = usize::from(self.config.undo_depth);
        if depth == 0 {
            return;
        }
        while self.history.len() >= depth {
            self.history.pop_front();
        }
        self.history.push_back(snapshot);
    }

    fn input_blocked(&self) -> Option<IgnoreReason> {
        match self.state {
            EngineState::Idle => None,
            EngineState::Resolving => Some(IgnoreReason::Busy),
            EngineState::Over => Some(IgnoreReason::GameOver),
        }
    }
}
