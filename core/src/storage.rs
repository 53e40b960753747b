/// Key the browser host stores the best score under.
pub const BEST_SCORE_KEY: &str = "chandy_best_score";

/// Where the best score survives between sessions.
pub trait ScoreStore {
    fn load_best(&self) -> u32;
    fn save_best(&mut self, best: u32);
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    best: u32,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&self) -> u32 {
        self.best
    }

    fn save_best(&mut self, best: u32) {
        self.best = best;
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn load_best(&self) -> u32 {
        (**self).load_best()
    }

    fn save_best(&mut self, best: u32) {
        (**self).save_best(best)
    }
}

/// Keeps the larger of the stored and the given score, returning it.
pub fn record_best<S: ScoreStore + ?Sized>(store: &mut S, score: u32) -> u32 {
    let best = store.load_best();
    if score > best {
        log::debug!("New best score {} (was {})", score, best);
        store.save_best(score);
        score
    } else {
        best
    }
}
