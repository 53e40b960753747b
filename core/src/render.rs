use crate::*;

/// Short feedback events a host may turn into sounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    Ok,
    Bad,
    Clear,
}

/// Points where the board has visibly changed and a host may pause to animate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Swapped,
    Reverted,
    Cleared,
    Collapsed,
    Refilled,
    Shuffled,
}

/// Everything needed to draw one frame.
#[derive(Copy, Clone, Debug)]
pub struct View<'a> {
    pub board: &'a Board,
    pub session: &'a SessionState,
    pub selected: Option<Coord2>,
    pub resolving: bool,
}

pub trait Renderer {
    fn render(&mut self, view: &View<'_>);

    fn cue(&mut self, _cue: Cue) {}

    /// Called after each visible step. Returning straight away must not change the outcome.
    fn settle(&mut self, _phase: Phase) {}
}

/// Renderer for headless play and tests.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _view: &View<'_>) {}
}

impl<V: Renderer + ?Sized> Renderer for &mut V {
    fn render(&mut self, view: &View<'_>) {
        (**self).render(view)
    }

    fn cue(&mut self, cue: Cue) {
        (**self).cue(cue)
    }

    fn settle(&mut self, phase: Phase) {
        (**self).settle(phase)
    }
}
