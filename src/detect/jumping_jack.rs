use crate::{
    detect::{Detection, Detector},
    error::Error,
    state::{ExerciseState, Stage},
    view::{LandmarkView, Side},
};
use std::time::Duration;
use tracing::debug;

/// Wrist spread, in shoulder widths, for arms to count as out wide.
const ARMS_SPREAD: f32 = 1.8;
/// Ankle spread, in shoulder widths, for legs to count as apart.
const LEGS_SPREAD: f32 = 1.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JumpStage {
    Init,
    Together,
    Apart,
}

impl Stage for JumpStage {
    fn label(self) -> &'static str {
        match self {
            JumpStage::Init => "init",
            JumpStage::Together => "together",
            JumpStage::Apart => "apart",
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct JumpingJack;

impl JumpingJack {
    fn transition(state: &mut ExerciseState<JumpStage>, to: JumpStage) {
        debug!(message = "stage transition", from = ?state.stage, to = ?to);
        state.stage = Some(to);
    }
}

impl Detector for JumpingJack {
    type Stage = JumpStage;

    fn initial_stage(&self) -> Option<JumpStage> {
        Some(JumpStage::Init)
    }

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<JumpStage>,
        _now: Duration,
    ) -> Result<Detection, Error> {
        let shoulder_width = view.shoulder_width();
        let arms_raised = [Side::Left, Side::Right]
            .iter()
            .all(|&side| view.wrist(side).y() < view.shoulder(side).y());
        let arms_spread = (view.wrist(Side::Left).x() - view.wrist(Side::Right).x()).abs()
            > shoulder_width * ARMS_SPREAD;
        let legs_spread = (view.ankle(Side::Left).x() - view.ankle(Side::Right).x()).abs()
            > shoulder_width * LEGS_SPREAD;
        let is_neutral = !arms_raised && !legs_spread;

        let stage = match state.stage {
            Some(stage) => stage,
            None => {
                Self::transition(state, JumpStage::Init);
                return Ok(Detection::feedback("GET READY - ARMS DOWN, LEGS TOGETHER"));
            }
        };

        match stage {
            JumpStage::Init if is_neutral => {
                Self::transition(state, JumpStage::Together);
                Ok(Detection::feedback("READY - JUMP AND SPREAD"))
            }
            JumpStage::Init => Ok(Detection::feedback("START WITH ARMS DOWN AND LEGS TOGETHER")),
            JumpStage::Together if arms_raised && arms_spread && legs_spread => {
                Self::transition(state, JumpStage::Apart);
                Ok(Detection::feedback("GOOD SPREAD - NOW RETURN"))
            }
            JumpStage::Together if is_neutral => {
                Ok(Detection::feedback("JUMP - SPREAD ARMS AND LEGS WIDER"))
            }
            JumpStage::Together => Ok(Detection::feedback("SPREAD ARMS AND LEGS WIDER")),
            JumpStage::Apart if is_neutral => {
                Self::transition(state, JumpStage::Together);
                let reps = state.complete_rep();
                debug!(message = "rep completed", reps);
                Ok(Detection::new(true, "REP COMPLETE"))
            }
            JumpStage::Apart if !arms_raised => Ok(Detection::feedback("BRING LEGS TOGETHER")),
            JumpStage::Apart if !legs_spread => Ok(Detection::feedback("BRING ARMS DOWN")),
            JumpStage::Apart => Ok(Detection::feedback("RETURN TO START POSITION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{JumpStage, JumpingJack};
    use crate::{
        detect::Detector,
        pose::{Joint, Pose},
        state::ExerciseState,
        testing::{secs, step, PoseBuilder},
    };

    fn neutral() -> Pose {
        PoseBuilder::standing().build()
    }

    fn apart() -> Pose {
        PoseBuilder::standing()
            .at(Joint::LeftWrist, 0.85, 0.05)
            .at(Joint::RightWrist, 0.15, 0.05)
            .at(Joint::LeftAnkle, 0.75, 0.95)
            .at(Joint::RightAnkle, 0.25, 0.95)
            .build()
    }

    fn arms_only() -> Pose {
        PoseBuilder::standing()
            .at(Joint::LeftWrist, 0.85, 0.05)
            .at(Joint::RightWrist, 0.15, 0.05)
            .build()
    }

    fn fresh() -> ExerciseState<JumpStage> {
        ExerciseState::new(JumpingJack.initial_stage())
    }

    #[test]
    fn full_cycle_counts_once() {
        let mut state = fresh();
        assert!(!step(&JumpingJack, &mut state, &neutral(), secs(0.0)).rep_completed);
        assert_eq!(state.stage, Some(JumpStage::Together));
        assert!(!step(&JumpingJack, &mut state, &apart(), secs(0.5)).rep_completed);
        assert_eq!(state.stage, Some(JumpStage::Apart));
        assert!(step(&JumpingJack, &mut state, &neutral(), secs(1.0)).rep_completed);
        assert_eq!(state.rep_count, 1);
        assert_eq!(state.stage, Some(JumpStage::Together));
    }

    #[test]
    fn staying_apart_does_not_double_count() {
        let mut state = fresh();
        step(&JumpingJack, &mut state, &neutral(), secs(0.0));
        for i in 1..5 {
            assert!(!step(&JumpingJack, &mut state, &apart(), secs(f64::from(i))).rep_completed);
        }
        assert!(step(&JumpingJack, &mut state, &neutral(), secs(5.0)).rep_completed);
        assert!(!step(&JumpingJack, &mut state, &neutral(), secs(6.0)).rep_completed);
        assert_eq!(state.rep_count, 1);
    }

    #[test]
    fn spread_before_neutral_is_ignored() {
        let mut state = fresh();
        step(&JumpingJack, &mut state, &apart(), secs(0.0));
        assert_eq!(state.stage, Some(JumpStage::Init));
        step(&JumpingJack, &mut state, &neutral(), secs(1.0));
        assert_eq!(state.rep_count, 0);
        assert_eq!(state.stage, Some(JumpStage::Together));
    }

    #[test]
    fn arms_without_legs_is_not_a_spread() {
        let mut state = fresh();
        step(&JumpingJack, &mut state, &neutral(), secs(0.0));
        step(&JumpingJack, &mut state, &arms_only(), secs(0.5));
        assert_eq!(state.stage, Some(JumpStage::Together));
    }

    #[test]
    fn cleared_stage_reinitializes_first() {
        let mut state = ExerciseState::default();
        step(&JumpingJack, &mut state, &neutral(), secs(0.0));
        assert_eq!(state.stage, Some(JumpStage::Init));
    }
}
