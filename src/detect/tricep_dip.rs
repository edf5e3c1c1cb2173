use crate::{
    detect::{average, enter_phase, Detection, Detector, Phase},
    error::Error,
    geometry::joint_angle,
    state::ExerciseState,
    view::{LandmarkView, Side},
};
use std::time::Duration;
use tracing::debug;

const ARMS_EXTENDED: f32 = 160.0;
const ARMS_BENT: f32 = 100.0;
const FULL_DEPTH: f32 = 80.0;
const HANDS_BEHIND_HIPS: f32 = 0.05;

#[derive(Debug, Default, Copy, Clone)]
pub struct TricepDip;

impl Detector for TricepDip {
    type Stage = Phase;

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<Phase>,
        _now: Duration,
    ) -> Result<Detection, Error> {
        let arm = |side| joint_angle(view.shoulder(side), view.elbow(side), view.wrist(side));
        let elbow_angle = average(arm(Side::Left)?, arm(Side::Right)?);

        let wrist_x = average(view.wrist(Side::Left).x(), view.wrist(Side::Right).x());
        if wrist_x <= view.hip(Side::Left).x() + HANDS_BEHIND_HIPS {
            if state.stage.take().is_some() {
                debug!(message = "hands left dip position, stage cleared");
            }
            return Ok(Detection::feedback("HANDS BEHIND YOU ON THE EDGE"));
        }

        if elbow_angle > ARMS_EXTENDED {
            let rep_completed = enter_phase(state, Phase::Up);
            Ok(Detection::new(rep_completed, "ARMS STRAIGHT - LOWER DOWN"))
        } else if elbow_angle < ARMS_BENT {
            enter_phase(state, Phase::Down);
            if elbow_angle < FULL_DEPTH {
                Ok(Detection::feedback("FULL DEPTH - PUSH UP"))
            } else {
                Ok(Detection::feedback("GOOD DIP"))
            }
        } else {
            Ok(Detection::feedback("KEEP GOING"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TricepDip;
    use crate::{
        detect::Phase,
        pose::{Joint, Pose},
        state::ExerciseState,
        testing::{bend, secs, step, PoseBuilder},
    };

    const SHOULDER: (f32, f32) = (0.45, 0.35);
    const ELBOW: (f32, f32) = (0.55, 0.45);

    fn dip(elbows: f32) -> Pose {
        let wrist = bend(SHOULDER, ELBOW, elbows, 0.15);
        PoseBuilder::standing()
            .both(Joint::LeftShoulder, Joint::RightShoulder, SHOULDER)
            .both(Joint::LeftElbow, Joint::RightElbow, ELBOW)
            .both(Joint::LeftWrist, Joint::RightWrist, wrist)
            .at(Joint::LeftHip, 0.40, 0.60)
            .build()
    }

    #[test]
    fn down_up_down_counts_once() {
        let mut state = ExerciseState::default();
        assert!(!step(&TricepDip, &mut state, &dip(90.0), secs(0.0)).rep_completed);
        assert!(step(&TricepDip, &mut state, &dip(170.0), secs(1.0)).rep_completed);
        assert!(!step(&TricepDip, &mut state, &dip(75.0), secs(2.0)).rep_completed);
        assert_eq!(state.rep_count, 1);
        assert_eq!(state.stage, Some(Phase::Down));
    }

    #[test]
    fn leaving_position_clears_stage() {
        let mut state = ExerciseState::default();
        step(&TricepDip, &mut state, &dip(90.0), secs(0.0));
        let hands_forward = PoseBuilder::standing()
            .both(Joint::LeftShoulder, Joint::RightShoulder, SHOULDER)
            .both(Joint::LeftElbow, Joint::RightElbow, ELBOW)
            .both(Joint::LeftWrist, Joint::RightWrist, (0.30, 0.50))
            .at(Joint::LeftHip, 0.40, 0.60)
            .build();
        step(&TricepDip, &mut state, &hands_forward, secs(1.0));
        assert_eq!(state.stage, None);

        // The half rep before the break cannot be finished after it.
        let detection = step(&TricepDip, &mut state, &dip(170.0), secs(2.0));
        assert!(!detection.rep_completed);
        assert_eq!(state.rep_count, 0);
    }
}
