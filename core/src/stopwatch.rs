use core::time::Duration;
use web_time::Instant;

/// Wall-clock timer for a puzzle attempt.
#[derive(Copy, Clone, Debug, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    stopped_after: Option<Duration>,
}

impl Stopwatch {
    /// Starts from zero, discarding any previous reading.
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.stopped_after = None;
    }

    /// Freezes the reading. Does nothing if the watch is not running.
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.stopped_after = Some(started_at.elapsed());
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.stopped_after) {
            (Some(started_at), _) => started_at.elapsed(),
            (None, Some(stopped_after)) => stopped_after,
            (None, None) => Duration::ZERO,
        }
    }
}
