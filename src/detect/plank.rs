use crate::{
    detect::{average, Detection, Detector},
    error::Error,
    geometry::joint_angle,
    state::{ExerciseState, Stage},
    view::{LandmarkView, Side},
};
use std::time::Duration;
use tracing::{debug, warn};

/// How long a paused plank may rest before the hold is discarded.
pub const GRACE_WINDOW: Duration = Duration::from_secs(20);

const BODY_STRAIGHT_MIN: f32 = 160.0;
const BODY_STRAIGHT_MAX: f32 = 200.0;
const MAX_SHOULDER_HIP_DROP: f32 = 0.15;
const ELBOWS_MIN: f32 = 80.0;
const ELBOWS_MAX: f32 = 100.0;

/// Stage of a timed hold.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HoldStage {
    Holding,
    Paused,
}

impl Stage for HoldStage {
    fn label(self) -> &'static str {
        match self {
            HoldStage::Holding => "holding",
            HoldStage::Paused => "paused",
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct Plank;

impl Plank {
    fn resume(state: &mut ExerciseState<HoldStage>, now: Duration) -> &'static str {
        let feedback = match state.pause_start.take() {
            Some(paused_at) => {
                let paused = now.saturating_sub(paused_at);
                if paused <= GRACE_WINDOW {
                    // Shift the start so the rest is not credited as hold time.
                    state.hold.start = state.hold.start.map(|start| start + paused);
                    debug!(message = "plank resumed", paused_ms = paused.as_millis() as u64);
                    "WELCOME BACK - PLANK RESUMED"
                } else {
                    warn!(
                        message = "rest exceeded grace window, plank reset",
                        paused_ms = paused.as_millis() as u64
                    );
                    state.clear_hold();
                    "REST TIME EXCEEDED - PLANK RESET"
                }
            }
            None => "PLANK STARTED - HOLD IT",
        };
        debug!(message = "stage transition", from = ?state.stage, to = ?HoldStage::Holding);
        state.stage = Some(HoldStage::Holding);
        feedback
    }
}

impl Detector for Plank {
    type Stage = HoldStage;

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<HoldStage>,
        now: Duration,
    ) -> Result<Detection, Error> {
        let (shoulder, hip, ankle) = (
            view.shoulder(Side::Left),
            view.hip(Side::Left),
            view.ankle(Side::Left),
        );
        let body = joint_angle(shoulder, hip, ankle)?;
        let arm = |side| joint_angle(view.shoulder(side), view.elbow(side), view.wrist(side));
        let elbows = average(arm(Side::Left)?, arm(Side::Right)?);

        let is_body_straight = body > BODY_STRAIGHT_MIN && body < BODY_STRAIGHT_MAX;
        let is_horizontal = (shoulder.y() - hip.y()).abs() < MAX_SHOULDER_HIP_DROP;
        let is_facing_down = shoulder.y() < ankle.y();
        let has_bent_arms = elbows > ELBOWS_MIN && elbows < ELBOWS_MAX;
        let wrists_below_shoulders = [Side::Left, Side::Right]
            .iter()
            .all(|&side| view.wrist(side).y() > view.shoulder(side).y());

        if is_body_straight
            && is_horizontal
            && is_facing_down
            && has_bent_arms
            && wrists_below_shoulders
        {
            let resumed = if state.stage == Some(HoldStage::Holding) {
                None
            } else {
                Some(Self::resume(state, now))
            };
            let held = state.record_hold(now).as_secs();
            return Ok(match resumed {
                Some(feedback) => Detection::feedback(feedback),
                None if held < 10 => Detection::feedback(format!("PLANK: {}s - KEEP GOING", held)),
                None if held < 30 => Detection::feedback(format!("PLANK: {}s - GREAT HOLD", held)),
                None if held < 60 => {
                    Detection::feedback(format!("PLANK: {}s - AMAZING ENDURANCE", held))
                }
                None => Detection::feedback(format!("PLANK: {}s - LEGENDARY", held)),
            });
        }

        match (state.stage, state.pause_start) {
            (Some(HoldStage::Holding), _) => {
                debug!(message = "stage transition", from = ?state.stage, to = ?HoldStage::Paused);
                state.stage = Some(HoldStage::Paused);
                state.pause_start = Some(now);
                Ok(Detection::feedback("PLANK PAUSED - GET BACK IN 20s"))
            }
            (_, Some(paused_at)) => {
                let paused = now.saturating_sub(paused_at);
                if paused < GRACE_WINDOW {
                    let remaining = GRACE_WINDOW - paused;
                    Ok(Detection::feedback(format!(
                        "RETURN TO PLANK IN {}s",
                        remaining.as_secs()
                    )))
                } else {
                    warn!(
                        message = "rest exceeded grace window, plank reset",
                        paused_ms = paused.as_millis() as u64
                    );
                    state.clear_hold();
                    state.pause_start = None;
                    state.stage = None;
                    Ok(Detection::feedback("REST TIME EXCEEDED - PLANK RESET"))
                }
            }
            _ if !is_body_straight => {
                Ok(Detection::feedback("KEEP BODY STRAIGHT - DON'T SAG OR ARCH"))
            }
            _ if !is_horizontal => Ok(Detection::feedback("ALIGN SHOULDERS WITH HIPS")),
            _ if !has_bent_arms => Ok(Detection::feedback("FORM 90-DEGREE ANGLES WITH ARMS")),
            _ if !is_facing_down => Ok(Detection::feedback("FACE DOWN - HEAD NEUTRAL")),
            _ => Ok(Detection::feedback("GET IN PLANK POSITION - ARMS BENT, BODY STRAIGHT")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HoldStage, Plank, GRACE_WINDOW};
    use crate::{
        pose::{Joint, Pose},
        state::ExerciseState,
        testing::{secs, step, PoseBuilder},
    };
    use std::time::Duration;

    fn plank() -> Pose {
        PoseBuilder::standing()
            .both(Joint::LeftShoulder, Joint::RightShoulder, (0.30, 0.50))
            .both(Joint::LeftElbow, Joint::RightElbow, (0.30, 0.60))
            .both(Joint::LeftWrist, Joint::RightWrist, (0.40, 0.60))
            .both(Joint::LeftHip, Joint::RightHip, (0.55, 0.52))
            .both(Joint::LeftAnkle, Joint::RightAnkle, (0.80, 0.55))
            .build()
    }

    fn sagging() -> Pose {
        PoseBuilder::standing()
            .both(Joint::LeftShoulder, Joint::RightShoulder, (0.30, 0.50))
            .both(Joint::LeftElbow, Joint::RightElbow, (0.30, 0.60))
            .both(Joint::LeftWrist, Joint::RightWrist, (0.40, 0.60))
            .both(Joint::LeftHip, Joint::RightHip, (0.55, 0.75))
            .both(Joint::LeftAnkle, Joint::RightAnkle, (0.80, 0.55))
            .build()
    }

    /// Feed one frame per second over `from..to`.
    fn run(state: &mut ExerciseState<HoldStage>, pose: &Pose, from: u32, to: u32) {
        for t in from..to {
            let detection = step(&Plank, state, pose, secs(f64::from(t)));
            assert!(!detection.rep_completed);
        }
    }

    #[test]
    fn counts_whole_seconds_held() {
        let mut state = ExerciseState::default();
        run(&mut state, &plank(), 100, 108);
        assert_eq!(state.rep_count, 7);
        step(&Plank, &mut state, &plank(), Duration::from_millis(108_900));
        assert_eq!(state.rep_count, 8);
        assert_eq!(state.stage, Some(HoldStage::Holding));
    }

    #[test]
    fn short_break_resumes_without_crediting_the_rest() {
        let mut state = ExerciseState::default();
        run(&mut state, &plank(), 0, 15);
        run(&mut state, &sagging(), 15, 25);
        assert_eq!(state.stage, Some(HoldStage::Paused));
        assert_eq!(state.pause_start, Some(secs(15.0)));

        step(&Plank, &mut state, &plank(), secs(25.0));
        assert_eq!(state.rep_count, 15);
        assert_eq!(state.pause_start, None);

        step(&Plank, &mut state, &plank(), secs(35.0));
        assert_eq!(state.rep_count, 25);
    }

    #[test]
    fn long_break_while_out_of_form_resets() {
        let mut state = ExerciseState::default();
        run(&mut state, &plank(), 0, 16);
        run(&mut state, &sagging(), 16, 41);
        assert_eq!(state.rep_count, 0);
        assert_eq!(state.pause_start, None);
        assert_eq!(state.stage, None);

        step(&Plank, &mut state, &plank(), secs(41.0));
        assert_eq!(state.hold.start, Some(secs(41.0)));
        step(&Plank, &mut state, &plank(), secs(44.0));
        assert_eq!(state.rep_count, 3);
    }

    #[test]
    fn returning_after_the_grace_window_starts_fresh() {
        let mut state = ExerciseState::default();
        run(&mut state, &plank(), 0, 16);
        step(&Plank, &mut state, &sagging(), secs(16.0));

        let late = secs(16.0) + GRACE_WINDOW + Duration::from_secs(5);
        step(&Plank, &mut state, &plank(), late);
        assert_eq!(state.rep_count, 0);
        assert_eq!(state.hold.start, Some(late));
        assert_eq!(state.stage, Some(HoldStage::Holding));
    }

    #[test]
    fn bad_form_before_starting_changes_nothing() {
        let mut state = ExerciseState::default();
        run(&mut state, &sagging(), 0, 30);
        assert_eq!(state, ExerciseState::default());
    }
}
