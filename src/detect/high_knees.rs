use crate::{
    detect::{enter_phase, Detection, Detector, Phase},
    error::Error,
    geometry::joint_angle,
    state::ExerciseState,
    view::LandmarkView,
};
use std::time::Duration;
use tracing::debug;

const KNEE_DRIVEN: f32 = 90.0;
const LEG_HANGING: f32 = 150.0;

/// Side-on running in place, tracked on whichever leg faces the camera.
#[derive(Debug, Default, Copy, Clone)]
pub struct HighKnees;

impl Detector for HighKnees {
    type Stage = Phase;

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<Phase>,
        _now: Duration,
    ) -> Result<Detection, Error> {
        let side = view.more_visible_side();
        let (hip, knee) = (view.hip(side), view.knee(side));
        let knee_angle = joint_angle(hip, knee, view.ankle(side))?;

        // Image y grows downwards.
        let leg_up = knee_angle < KNEE_DRIVEN && knee.y() < hip.y();
        let leg_down = knee_angle > LEG_HANGING;

        if state.stage.is_none() {
            debug!(message = "stage transition", from = ?state.stage, to = ?Phase::Down);
            state.stage = Some(Phase::Down);
            return Ok(Detection::feedback("STAND SIDEWAYS - DRIVE YOUR KNEES UP"));
        }

        if leg_up {
            let rep_completed = enter_phase(state, Phase::Up);
            if rep_completed {
                Ok(Detection::new(true, "KNEE UP - SWITCH LEGS"))
            } else {
                Ok(Detection::feedback("NOW BRING IT DOWN"))
            }
        } else if leg_down {
            enter_phase(state, Phase::Down);
            Ok(Detection::feedback("DRIVE THAT KNEE HIGHER"))
        } else {
            Ok(Detection::feedback("SWITCH LEGS FAST"))
        }
    }
}
