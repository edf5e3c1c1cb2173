use crate::{
    detect::{average, enter_phase, Detection, Detector, Phase},
    error::Error,
    geometry::joint_angle,
    state::ExerciseState,
    view::{LandmarkView, Side},
};
use std::time::Duration;

const BODY_STRAIGHT_MIN: f32 = 160.0;
const BODY_STRAIGHT_MAX: f32 = 200.0;
const MAX_SHOULDER_HIP_DROP: f32 = 0.15;
const ARMS_EXTENDED: f32 = 160.0;
const ARMS_BENT: f32 = 90.0;
const CHEST_TO_GROUND: f32 = 70.0;
const MAX_ARM_DIFFERENCE: f32 = 20.0;

#[derive(Debug, Default, Copy, Clone)]
pub struct PushUp;

impl Detector for PushUp {
    type Stage = Phase;

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<Phase>,
        _now: Duration,
    ) -> Result<Detection, Error> {
        let arm = |side| joint_angle(view.shoulder(side), view.elbow(side), view.wrist(side));
        let left_arm = arm(Side::Left)?;
        let right_arm = arm(Side::Right)?;
        let body = joint_angle(
            view.shoulder(Side::Left),
            view.hip(Side::Left),
            view.ankle(Side::Left),
        )?;

        let is_horizontal = body > BODY_STRAIGHT_MIN && body < BODY_STRAIGHT_MAX;
        let shoulders_level_with_hips =
            (view.shoulder(Side::Left).y() - view.hip(Side::Left).y()).abs() < MAX_SHOULDER_HIP_DROP;
        let wrists_below_shoulders = [Side::Left, Side::Right]
            .iter()
            .all(|&side| view.wrist(side).y() > view.shoulder(side).y());

        if !(is_horizontal && shoulders_level_with_hips && wrists_below_shoulders) {
            return Ok(Detection::feedback(
                "GET IN PLANK POSITION - BODY STRAIGHT, HANDS BELOW SHOULDERS",
            ));
        }

        if (left_arm - right_arm).abs() > MAX_ARM_DIFFERENCE {
            return Ok(Detection::feedback("KEEP ARMS EVEN"));
        }

        let arm_angle = average(left_arm, right_arm);
        if arm_angle > ARMS_EXTENDED {
            let rep_completed = enter_phase(state, Phase::Up);
            Ok(Detection::new(rep_completed, "ARMS STRAIGHT - LOWER YOUR CHEST"))
        } else if arm_angle < ARMS_BENT {
            enter_phase(state, Phase::Down);
            if arm_angle < CHEST_TO_GROUND {
                Ok(Detection::feedback("CHEST TO GROUND - NOW PUSH UP"))
            } else {
                Ok(Detection::feedback("GOOD DEPTH - PUSH UP"))
            }
        } else {
            Ok(Detection::feedback("KEEP GOING - FULL RANGE OF MOTION"))
        }
    }
}
