use crate::{
    detect::{average, enter_phase, Detection, Detector, Phase},
    error::Error,
    geometry::joint_angle,
    state::ExerciseState,
    view::{LandmarkView, Side},
};
use std::time::Duration;

const LEGS_STRAIGHT: f32 = 160.0;
const LEGS_BENT: f32 = 100.0;
const FULL_DEPTH: f32 = 80.0;
const MAX_LEG_DIFFERENCE: f32 = 30.0;

#[derive(Debug, Default, Copy, Clone)]
pub struct Squat;

impl Detector for Squat {
    type Stage = Phase;

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<Phase>,
        _now: Duration,
    ) -> Result<Detection, Error> {
        let leg = |side| joint_angle(view.hip(side), view.knee(side), view.ankle(side));
        let left_leg = leg(Side::Left)?;
        let right_leg = leg(Side::Right)?;

        if (left_leg - right_leg).abs() > MAX_LEG_DIFFERENCE {
            return Ok(Detection::feedback(
                "KEEP LEGS EVEN - BOTH KNEES SHOULD BEND TOGETHER",
            ));
        }

        let knee_angle = average(left_leg, right_leg);
        if knee_angle > LEGS_STRAIGHT {
            let rep_completed = enter_phase(state, Phase::Up);
            Ok(Detection::new(rep_completed, "STANDING - SQUAT DOWN"))
        } else if knee_angle < LEGS_BENT {
            enter_phase(state, Phase::Down);
            if knee_angle < FULL_DEPTH {
                Ok(Detection::feedback("PERFECT DEPTH - NOW STAND UP"))
            } else {
                Ok(Detection::feedback("GOOD SQUAT"))
            }
        } else {
            Ok(Detection::feedback("GOOD FORM"))
        }
    }
}
