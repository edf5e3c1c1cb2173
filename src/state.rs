use std::{convert::TryFrom, fmt::Debug, time::Duration};

/// A detector's phase label. Each exercise has its own closed set.
pub trait Stage: Copy + Debug + PartialEq {
    fn label(self) -> &'static str;
}

/// Continuous valid-form time for isometric exercises.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Hold {
    /// Unset until valid form is first reached.
    pub start: Option<Duration>,
    pub duration: Duration,
}

/// Per-session state owned by exactly one detector.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseState<S> {
    pub stage: Option<S>,
    /// Completed reps, or whole seconds held for timed exercises.
    pub rep_count: u32,
    pub hold: Hold,
    /// Set only while a hold is paused inside its grace window.
    pub pause_start: Option<Duration>,
}

impl<S> Default for ExerciseState<S> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<S> ExerciseState<S> {
    pub fn new(stage: Option<S>) -> Self {
        Self {
            stage,
            rep_count: 0,
            hold: Hold::default(),
            pause_start: None,
        }
    }

    pub fn reset(&mut self, stage: Option<S>) {
        *self = Self::new(stage);
    }

    pub(crate) fn complete_rep(&mut self) -> u32 {
        self.rep_count = self.rep_count.saturating_add(1);
        self.rep_count
    }

    pub(crate) fn clear_hold(&mut self) {
        self.hold = Hold::default();
        self.rep_count = 0;
    }

    /// Update the hold duration and the seconds-held count, starting the hold
    /// at `now` if it has not started yet.
    pub(crate) fn record_hold(&mut self, now: Duration) -> Duration {
        let start = *self.hold.start.get_or_insert(now);
        let held = now.saturating_sub(start);
        self.hold.duration = held;
        self.rep_count = u32::try_from(held.as_secs()).unwrap_or(u32::MAX);
        held
    }
}
