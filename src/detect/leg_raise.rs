use crate::{
    detect::{average, Detection, Detector},
    error::Error,
    geometry::joint_angle,
    state::{ExerciseState, Stage},
    view::{LandmarkView, Side},
};
use std::time::Duration;
use tracing::debug;

const LEGS_STRAIGHT: f32 = 150.0;
/// Largest shoulder/hip height difference of a body lying flat.
const LYING_FLAT: f32 = 0.35;
const LEGS_LOWERED: f32 = 150.0;
const LEGS_RAISED: f32 = 105.0;
const RESTING_ON_FLOOR: f32 = 175.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LegRaiseStage {
    Up,
    Down,
    /// Legs were already raised when tracking started.
    Unknown,
}

impl Stage for LegRaiseStage {
    fn label(self) -> &'static str {
        match self {
            LegRaiseStage::Up => "up",
            LegRaiseStage::Down => "down",
            LegRaiseStage::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct LegRaise;

impl LegRaise {
    fn transition(state: &mut ExerciseState<LegRaiseStage>, to: LegRaiseStage) {
        debug!(message = "stage transition", from = ?state.stage, to = ?to);
        state.stage = Some(to);
    }
}

impl Detector for LegRaise {
    type Stage = LegRaiseStage;

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<LegRaiseStage>,
        _now: Duration,
    ) -> Result<Detection, Error> {
        let leg = |side| joint_angle(view.hip(side), view.knee(side), view.ankle(side));
        let straightness = average(leg(Side::Left)?, leg(Side::Right)?);

        let shoulder = view.shoulder(Side::Left).midpoint(view.shoulder(Side::Right));
        let hip = view.hip(Side::Left).midpoint(view.hip(Side::Right));
        let ankle = view.ankle(Side::Left).midpoint(view.ankle(Side::Right));
        let flexion = joint_angle(shoulder, hip, ankle)?;

        if straightness <= LEGS_STRAIGHT {
            state.stage = None;
            return Ok(Detection::feedback("STRAIGHTEN LEGS - NO KNEE TUCKS"));
        }
        if (shoulder.y() - hip.y()).abs() >= LYING_FLAT {
            state.stage = None;
            return Ok(Detection::feedback("LIE FLAT ON YOUR BACK"));
        }

        let stage = match state.stage {
            Some(stage) => stage,
            None if flexion > LEGS_LOWERED => {
                Self::transition(state, LegRaiseStage::Down);
                LegRaiseStage::Down
            }
            None => {
                Self::transition(state, LegRaiseStage::Unknown);
                return Ok(Detection::feedback("LOWER LEGS TO START POSITION"));
            }
        };

        match stage {
            LegRaiseStage::Down if flexion < LEGS_RAISED => {
                Self::transition(state, LegRaiseStage::Up);
                let reps = state.complete_rep();
                debug!(message = "rep completed", reps);
                Ok(Detection::new(true, "L-SHAPE - NOW LOWER SLOWLY"))
            }
            LegRaiseStage::Down if flexion > RESTING_ON_FLOOR => {
                Ok(Detection::feedback("DON'T REST - HOVER YOUR HEELS"))
            }
            LegRaiseStage::Down => Ok(Detection::feedback("RAISE LEGS TO AN L-SHAPE")),
            LegRaiseStage::Up if flexion > LEGS_LOWERED => {
                Self::transition(state, LegRaiseStage::Down);
                Ok(Detection::feedback("GOOD CONTROL - RAISE AGAIN"))
            }
            LegRaiseStage::Up => Ok(Detection::feedback("LOWER SLOWLY - CONTROL THE DESCENT")),
            LegRaiseStage::Unknown if flexion > LEGS_LOWERED => {
                Self::transition(state, LegRaiseStage::Down);
                Ok(Detection::feedback("GOOD START - NOW RAISE YOUR LEGS"))
            }
            LegRaiseStage::Unknown => Ok(Detection::feedback("LOWER LEGS TO THE FLOOR TO BEGIN")),
        }
    }
}
