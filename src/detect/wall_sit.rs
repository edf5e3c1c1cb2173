use crate::{
    detect::{Detection, Detector, HoldStage},
    error::Error,
    geometry::joint_angle,
    state::ExerciseState,
    view::{LandmarkView, Side},
};
use std::time::Duration;
use tracing::debug;

const KNEE_MIN: f32 = 80.0;
const KNEE_MAX: f32 = 110.0;
/// Largest horizontal shoulder/hip offset of a back flat against the wall.
const UPRIGHT: f32 = 0.1;

/// Isometric squat against a wall. Unlike the plank there is no rest
/// allowance: leaving the position stops the timer, and the next entry starts
/// a new hold.
#[derive(Debug, Default, Copy, Clone)]
pub struct WallSit;

impl Detector for WallSit {
    type Stage = HoldStage;

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<HoldStage>,
        now: Duration,
    ) -> Result<Detection, Error> {
        let (shoulder, hip) = (view.shoulder(Side::Left), view.hip(Side::Left));
        let knee_angle = joint_angle(hip, view.knee(Side::Left), view.ankle(Side::Left))?;

        let is_sitting = knee_angle > KNEE_MIN && knee_angle < KNEE_MAX;
        let is_upright = (shoulder.x() - hip.x()).abs() < UPRIGHT;

        if !(is_sitting && is_upright) {
            if state.hold.start.take().is_some() {
                debug!(message = "wall sit broken", held = state.rep_count);
                state.stage = None;
            }
            return Ok(if !is_upright {
                Detection::feedback("LEAN BACK AGAINST THE WALL")
            } else if knee_angle >= KNEE_MAX {
                Detection::feedback("SLIDE DOWN - KNEES AT 90 DEGREES")
            } else {
                Detection::feedback("LIFT UP SLIGHTLY - 90 DEGREE ANGLE")
            });
        }

        if state.hold.start.is_none() {
            debug!(message = "stage transition", from = ?state.stage, to = ?HoldStage::Holding);
            state.stage = Some(HoldStage::Holding);
        }
        let held = state.record_hold(now).as_secs();
        Ok(if held < 10 {
            Detection::feedback(format!("HOLD IT - {}s", held))
        } else if held < 30 {
            Detection::feedback(format!("STRONG - {}s", held))
        } else {
            Detection::feedback(format!("AMAZING - {}s", held))
        })
    }
}
