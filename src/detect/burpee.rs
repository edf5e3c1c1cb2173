use crate::{
    detect::{Detection, Detector},
    error::Error,
    geometry::joint_angle,
    state::{ExerciseState, Stage},
    view::{LandmarkView, Side},
};
use std::time::Duration;
use tracing::debug;

const BODY_STRAIGHT: f32 = 160.0;
/// Largest shoulder/hip height difference of a body lying horizontally.
const HORIZONTAL: f32 = 0.15;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BurpeeStage {
    Standing,
    Plank,
}

impl Stage for BurpeeStage {
    fn label(self) -> &'static str {
        match self {
            BurpeeStage::Standing => "standing",
            BurpeeStage::Plank => "plank",
        }
    }
}

/// Stand, drop to a plank, stand again.
///
/// A straight body counts as a plank only while it is horizontal, so an
/// upright body cannot satisfy both positions at once.
#[derive(Debug, Default, Copy, Clone)]
pub struct Burpee;

impl Detector for Burpee {
    type Stage = BurpeeStage;

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<BurpeeStage>,
        _now: Duration,
    ) -> Result<Detection, Error> {
        let (shoulder, hip, ankle) = (
            view.shoulder(Side::Left),
            view.hip(Side::Left),
            view.ankle(Side::Left),
        );
        let body = joint_angle(shoulder, hip, ankle)?;

        let straight = body > BODY_STRAIGHT;
        let horizontal = (shoulder.y() - hip.y()).abs() < HORIZONTAL;
        let is_plank = straight && horizontal && shoulder.y() < ankle.y();
        let is_standing = straight && !horizontal;

        let stage = *state.stage.get_or_insert(BurpeeStage::Standing);
        match stage {
            BurpeeStage::Standing if is_plank => {
                debug!(message = "stage transition", from = ?stage, to = ?BurpeeStage::Plank);
                state.stage = Some(BurpeeStage::Plank);
                Ok(Detection::feedback("IN PLANK - NOW JUMP UP"))
            }
            BurpeeStage::Standing => Ok(Detection::feedback("DROP TO PLANK POSITION")),
            BurpeeStage::Plank if is_standing => {
                debug!(message = "stage transition", from = ?stage, to = ?BurpeeStage::Standing);
                state.stage = Some(BurpeeStage::Standing);
                let reps = state.complete_rep();
                debug!(message = "rep completed", reps);
                Ok(Detection::new(true, format!("BURPEE {}", reps)))
            }
            BurpeeStage::Plank => Ok(Detection::feedback("JUMP BACK UP TO STANDING")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Burpee, BurpeeStage};
    use crate::{
        pose::{Joint, Pose},
        state::ExerciseState,
        testing::{secs, step, PoseBuilder},
    };

    fn standing() -> Pose {
        PoseBuilder::standing().build()
    }

    fn plank() -> Pose {
        PoseBuilder::standing()
            .at(Joint::LeftShoulder, 0.30, 0.50)
            .at(Joint::LeftHip, 0.55, 0.52)
            .at(Joint::LeftAnkle, 0.80, 0.55)
            .build()
    }

    fn crouch() -> Pose {
        PoseBuilder::standing()
            .at(Joint::LeftShoulder, 0.70, 0.60)
            .at(Joint::LeftHip, 0.56, 0.75)
            .at(Joint::LeftAnkle, 0.70, 0.95)
            .build()
    }

    #[test]
    fn stand_plank_stand_counts_once() {
        let mut state = ExerciseState::default();
        assert!(!step(&Burpee, &mut state, &standing(), secs(0.0)).rep_completed);
        assert_eq!(state.stage, Some(BurpeeStage::Standing));
        assert!(!step(&Burpee, &mut state, &crouch(), secs(0.5)).rep_completed);
        assert!(!step(&Burpee, &mut state, &plank(), secs(1.0)).rep_completed);
        assert_eq!(state.stage, Some(BurpeeStage::Plank));
        assert!(!step(&Burpee, &mut state, &crouch(), secs(1.5)).rep_completed);
        assert!(step(&Burpee, &mut state, &standing(), secs(2.0)).rep_completed);
        assert_eq!(state.rep_count, 1);
        assert_eq!(state.stage, Some(BurpeeStage::Standing));
    }

    #[test]
    fn standing_still_never_counts() {
        let mut state = ExerciseState::default();
        for i in 0..10 {
            assert!(!step(&Burpee, &mut state, &standing(), secs(f64::from(i))).rep_completed);
        }
        assert_eq!(state.rep_count, 0);
        assert_eq!(state.stage, Some(BurpeeStage::Standing));
    }
}
