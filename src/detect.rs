use crate::{
    error::Error,
    exercise::Exercise,
    state::{self, ExerciseState, Stage},
    view::LandmarkView,
};
use std::{borrow::Cow, time::Duration};
use tracing::debug;

mod arm_circles;
mod burpee;
mod high_knees;
mod jumping_jack;
mod leg_raise;
mod lunge;
mod plank;
mod push_up;
mod sit_up;
mod squat;
mod tricep_dip;
mod wall_sit;

pub use arm_circles::{ArmCircles, CircleStage};
pub use burpee::{Burpee, BurpeeStage};
pub use high_knees::HighKnees;
pub use jumping_jack::{JumpStage, JumpingJack};
pub use leg_raise::{LegRaise, LegRaiseStage};
pub use lunge::{Lunge, LungeStage};
pub use plank::{HoldStage, Plank, GRACE_WINDOW};
pub use push_up::PushUp;
pub use sit_up::SitUp;
pub use squat::Squat;
pub use tricep_dip::TricepDip;
pub use wall_sit::WallSit;

pub(crate) const INSUFFICIENT_SIGNAL: &str = "HOLD STILL - BODY NOT CLEARLY VISIBLE";

/// What a detector concluded about one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub rep_completed: bool,
    pub feedback: Cow<'static, str>,
}

impl Detection {
    pub(crate) fn new(rep_completed: bool, feedback: impl Into<Cow<'static, str>>) -> Self {
        Self {
            rep_completed,
            feedback: feedback.into(),
        }
    }

    pub(crate) fn feedback(feedback: impl Into<Cow<'static, str>>) -> Self {
        Self::new(false, feedback)
    }
}

pub trait Detector {
    type Stage: state::Stage;

    /// Stage a fresh or reset session starts in.
    fn initial_stage(&self) -> Option<Self::Stage> {
        None
    }

    /// Classify one frame, mutating `state` in place.
    ///
    /// Implementations compute every angle before touching `state`, so an
    /// [`Error::InsufficientSignal`] leaves the state as it was.
    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<Self::Stage>,
        now: Duration,
    ) -> Result<Detection, Error>;
}

/// Two-phase stage shared by the simple up/down exercises.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Up,
    Down,
}

impl Stage for Phase {
    fn label(self) -> &'static str {
        match self {
            Phase::Up => "up",
            Phase::Down => "down",
        }
    }
}

/// Move a two-phase exercise into `phase`, counting a rep on `Down -> Up`.
pub(crate) fn enter_phase(state: &mut ExerciseState<Phase>, phase: Phase) -> bool {
    let rep_completed = phase == Phase::Up && state.stage == Some(Phase::Down);
    if state.stage != Some(phase) {
        debug!(message = "stage transition", from = ?state.stage, to = ?phase);
        state.stage = Some(phase);
    }
    if rep_completed {
        let reps = state.complete_rep();
        debug!(message = "rep completed", reps);
    }
    rep_completed
}

#[inline]
pub(crate) fn average(a: f32, b: f32) -> f32 {
    (a + b) / 2.0
}

/// A detector paired with the state it owns.
#[derive(Debug, Clone)]
pub struct Tracked<D: Detector> {
    detector: D,
    state: ExerciseState<D::Stage>,
}

impl<D: Detector> Tracked<D> {
    pub fn new(detector: D) -> Self {
        let state = ExerciseState::new(detector.initial_stage());
        Self { detector, state }
    }

    /// Degenerate geometry becomes corrective feedback; the state is untouched.
    pub fn process(
        &mut self,
        view: &LandmarkView<'_>,
        now: Duration,
    ) -> Result<Detection, Error> {
        match self.detector.detect(view, &mut self.state, now) {
            Err(Error::InsufficientSignal) => {
                debug!(message = "insufficient signal, frame suppressed");
                Ok(Detection::feedback(INSUFFICIENT_SIGNAL))
            }
            result => result,
        }
    }

    pub fn reset(&mut self) {
        self.state.reset(self.detector.initial_stage());
    }

    pub fn state(&self) -> &ExerciseState<D::Stage> {
        &self.state
    }
}

macro_rules! trackers {
    ($($variant:ident => $detector:ty),+ $(,)?) => {
        /// The detector selected for a session, resolved once from an
        /// [`Exercise`].
        #[derive(Debug, Clone)]
        pub enum Tracker {
            $($variant(Tracked<$detector>),)+
        }

        impl Tracker {
            pub fn new(exercise: Exercise) -> Self {
                match exercise {
                    $(Exercise::$variant => Self::$variant(Tracked::new(<$detector>::default())),)+
                }
            }

            pub fn exercise(&self) -> Exercise {
                match self {
                    $(Self::$variant(_) => Exercise::$variant,)+
                }
            }

            pub fn process(
                &mut self,
                view: &LandmarkView<'_>,
                now: Duration,
            ) -> Result<Detection, Error> {
                match self {
                    $(Self::$variant(tracked) => tracked.process(view, now),)+
                }
            }

            pub fn reset(&mut self) {
                match self {
                    $(Self::$variant(tracked) => tracked.reset(),)+
                }
            }

            pub fn rep_count(&self) -> u32 {
                match self {
                    $(Self::$variant(tracked) => tracked.state().rep_count,)+
                }
            }

            pub fn stage_label(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant(tracked) => tracked.state().stage.map(Stage::label),)+
                }
            }
        }
    };
}

trackers! {
    PushUp => PushUp,
    Squat => Squat,
    JumpingJack => JumpingJack,
    SitUp => SitUp,
    Lunge => Lunge,
    Plank => Plank,
    ArmCircles => ArmCircles,
    WallSit => WallSit,
    TricepDip => TricepDip,
    Burpee => Burpee,
    HighKnees => HighKnees,
    LegRaise => LegRaise,
}
