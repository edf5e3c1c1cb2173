use crate::{
    detect::{average, Detection, Detector},
    error::Error,
    geometry::joint_angle,
    state::{ExerciseState, Stage},
    view::{LandmarkView, Side},
};
use std::time::Duration;
use tracing::debug;

const ARMS_EXTENDED: f32 = 140.0;
/// Half-height of the band around shoulder level that counts as neither up
/// nor down.
const SHOULDER_BAND: f32 = 0.05;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CircleStage {
    Up,
    Middle,
    Down,
}

impl Stage for CircleStage {
    fn label(self) -> &'static str {
        match self {
            CircleStage::Up => "up",
            CircleStage::Middle => "middle",
            CircleStage::Down => "down",
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct ArmCircles;

impl Detector for ArmCircles {
    type Stage = CircleStage;

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<CircleStage>,
        _now: Duration,
    ) -> Result<Detection, Error> {
        let arm = |side| joint_angle(view.shoulder(side), view.elbow(side), view.wrist(side));
        let left_arm = arm(Side::Left)?;
        let right_arm = arm(Side::Right)?;

        if left_arm <= ARMS_EXTENDED || right_arm <= ARMS_EXTENDED {
            if state.stage.take().is_some() {
                debug!(message = "arms bent, stage cleared");
            }
            return Ok(Detection::feedback("EXTEND ARMS STRAIGHT OUT"));
        }

        let shoulder_y = average(view.shoulder(Side::Left).y(), view.shoulder(Side::Right).y());
        let wrist_y = average(view.wrist(Side::Left).y(), view.wrist(Side::Right).y());
        let position = if wrist_y < shoulder_y - SHOULDER_BAND {
            CircleStage::Up
        } else if wrist_y > shoulder_y + SHOULDER_BAND {
            CircleStage::Down
        } else {
            CircleStage::Middle
        };

        let stage = match state.stage {
            Some(stage) => stage,
            None => {
                debug!(message = "stage transition", from = ?state.stage, to = ?position);
                state.stage = Some(position);
                return Ok(Detection::feedback("START ROTATING - MAKE BIG CIRCLES"));
            }
        };

        // Shoulder level is only a starting point. Passing back through it
        // does not reset the cycle; the stage holds until the opposite
        // extreme, which is what rules out double counting.
        if position == CircleStage::Middle || position == stage {
            return Ok(Detection::feedback("KEEP ROTATING"));
        }

        debug!(message = "stage transition", from = ?stage, to = ?position);
        state.stage = Some(position);
        if stage == CircleStage::Down && position == CircleStage::Up {
            let reps = state.complete_rep();
            debug!(message = "rep completed", reps);
            Ok(Detection::new(true, format!("CIRCLE {} COMPLETE", reps)))
        } else if position == CircleStage::Down {
            Ok(Detection::feedback("HALFWAY - KEEP ROTATING"))
        } else {
            Ok(Detection::feedback("ARMS UP - KEEP GOING"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ArmCircles, CircleStage};
    use crate::{
        pose::{Joint, Pose},
        state::ExerciseState,
        testing::{secs, step, PoseBuilder},
    };

    /// Straight arms with the wrists `dy` below the shoulders.
    fn arms(dy: f32) -> Pose {
        PoseBuilder::standing()
            .at(Joint::LeftElbow, 0.75, 0.25 + dy / 2.0)
            .at(Joint::LeftWrist, 0.90, 0.25 + dy)
            .at(Joint::RightElbow, 0.25, 0.25 + dy / 2.0)
            .at(Joint::RightWrist, 0.10, 0.25 + dy)
            .build()
    }

    fn up() -> Pose {
        arms(-0.2)
    }

    fn middle() -> Pose {
        arms(0.0)
    }

    fn down() -> Pose {
        arms(0.2)
    }

    #[test]
    fn down_up_counts_once_per_cycle() {
        let mut state = ExerciseState::default();
        let frames = [down(), middle(), up(), middle(), up(), down(), middle(), up()];
        let reps: Vec<bool> = frames
            .iter()
            .enumerate()
            .map(|(i, pose)| step(&ArmCircles, &mut state, pose, secs(i as f64)).rep_completed)
            .collect();
        assert_eq!(
            reps,
            vec![false, false, true, false, false, false, false, true]
        );
        assert_eq!(state.rep_count, 2);
        assert_eq!(state.stage, Some(CircleStage::Up));
    }

    #[test]
    fn shoulder_level_does_not_reset_an_extreme() {
        let mut state = ExerciseState::default();
        step(&ArmCircles, &mut state, &up(), secs(0.0));
        step(&ArmCircles, &mut state, &middle(), secs(1.0));
        assert_eq!(state.stage, Some(CircleStage::Up));
        assert!(!step(&ArmCircles, &mut state, &up(), secs(2.0)).rep_completed);

        step(&ArmCircles, &mut state, &down(), secs(3.0));
        step(&ArmCircles, &mut state, &middle(), secs(4.0));
        assert_eq!(state.stage, Some(CircleStage::Down));
        assert!(step(&ArmCircles, &mut state, &up(), secs(5.0)).rep_completed);
        assert_eq!(state.rep_count, 1);
    }

    #[test]
    fn starting_at_shoulder_level_is_middle() {
        let mut state = ExerciseState::default();
        step(&ArmCircles, &mut state, &middle(), secs(0.0));
        assert_eq!(state.stage, Some(CircleStage::Middle));
        assert!(!step(&ArmCircles, &mut state, &up(), secs(1.0)).rep_completed);
        assert_eq!(state.stage, Some(CircleStage::Up));
    }

    #[test]
    fn bent_arms_clear_progress() {
        let mut state = ExerciseState::default();
        step(&ArmCircles, &mut state, &down(), secs(0.0));
        let bent = PoseBuilder::standing()
            .at(Joint::LeftWrist, 0.70, 0.30)
            .at(Joint::RightWrist, 0.30, 0.30)
            .build();
        step(&ArmCircles, &mut state, &bent, secs(1.0));
        assert_eq!(state.stage, None);

        assert!(!step(&ArmCircles, &mut state, &up(), secs(2.0)).rep_completed);
        assert_eq!(state.rep_count, 0);
    }
}
