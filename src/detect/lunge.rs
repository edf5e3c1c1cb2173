use crate::{
    detect::{Detection, Detector},
    error::Error,
    geometry::joint_angle,
    state::{ExerciseState, Stage},
    view::{LandmarkView, Side},
};
use std::time::Duration;
use tracing::debug;

const KNEES_BENT: f32 = 120.0;
const KNEES_STRAIGHT: f32 = 160.0;
const FULL_DEPTH: f32 = 90.0;
/// Ankle spread, in shoulder widths, that counts as a split stance.
const SPLIT_STANCE: f32 = 1.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LungeStage {
    Standing,
    Lunge,
}

impl Stage for LungeStage {
    fn label(self) -> &'static str {
        match self {
            LungeStage::Standing => "standing",
            LungeStage::Lunge => "lunge",
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct Lunge;

impl Detector for Lunge {
    type Stage = LungeStage;

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<LungeStage>,
        _now: Duration,
    ) -> Result<Detection, Error> {
        let leg = |side| joint_angle(view.hip(side), view.knee(side), view.ankle(side));
        let left_leg = leg(Side::Left)?;
        let right_leg = leg(Side::Right)?;

        let ankle_spread = (view.ankle(Side::Left).x() - view.ankle(Side::Right).x()).abs();
        if ankle_spread <= view.shoulder_width() * SPLIT_STANCE {
            return Ok(Detection::feedback(
                "GET INTO LUNGE POSITION - STEP ONE LEG FORWARD",
            ));
        }

        let both_bent = left_leg < KNEES_BENT && right_leg < KNEES_BENT;
        let both_straight = left_leg > KNEES_STRAIGHT && right_leg > KNEES_STRAIGHT;

        let stage = *state.stage.get_or_insert(LungeStage::Standing);
        match stage {
            LungeStage::Standing if both_bent => {
                debug!(message = "stage transition", from = ?stage, to = ?LungeStage::Lunge);
                state.stage = Some(LungeStage::Lunge);
                if left_leg < FULL_DEPTH || right_leg < FULL_DEPTH {
                    Ok(Detection::feedback("PERFECT DEPTH"))
                } else {
                    Ok(Detection::feedback("GOOD LUNGE - LOWER A BIT MORE FOR FULL DEPTH"))
                }
            }
            LungeStage::Lunge if both_straight => {
                debug!(message = "stage transition", from = ?stage, to = ?LungeStage::Standing);
                state.stage = Some(LungeStage::Standing);
                let reps = state.complete_rep();
                debug!(message = "rep completed", reps);
                Ok(Detection::new(true, "REP COMPLETE"))
            }
            LungeStage::Lunge => Ok(Detection::feedback("HOLD THE LUNGE - THEN STAND UP")),
            LungeStage::Standing if !both_straight => {
                Ok(Detection::feedback("STAND UP FULLY BETWEEN REPS"))
            }
            LungeStage::Standing => Ok(Detection::feedback("GOOD STANCE - NOW LOWER INTO LUNGE")),
        }
    }
}
