use crate::{
    detect::{average, enter_phase, Detection, Detector, Phase},
    error::Error,
    geometry::joint_angle,
    state::ExerciseState,
    view::{LandmarkView, Side},
};
use std::time::Duration;

const KNEES_BENT: f32 = 95.0;
const TORSO_UP: f32 = 60.0;
const TORSO_DOWN: f32 = 100.0;
const FULL_RANGE: f32 = 140.0;

#[derive(Debug, Default, Copy, Clone)]
pub struct SitUp;

impl Detector for SitUp {
    type Stage = Phase;

    fn detect(
        &self,
        view: &LandmarkView<'_>,
        state: &mut ExerciseState<Phase>,
        _now: Duration,
    ) -> Result<Detection, Error> {
        let leg = |side| joint_angle(view.hip(side), view.knee(side), view.ankle(side));
        let knee_angle = average(leg(Side::Left)?, leg(Side::Right)?);
        let torso = joint_angle(
            view.shoulder(Side::Left),
            view.hip(Side::Left),
            view.knee(Side::Left),
        )?;

        if knee_angle >= KNEES_BENT {
            return Ok(Detection::feedback("BEND YOUR KNEES - FEET FLAT ON THE FLOOR"));
        }

        if torso < TORSO_UP {
            let rep_completed = enter_phase(state, Phase::Up);
            Ok(Detection::new(rep_completed, "UP - NOW LOWER WITH CONTROL"))
        } else if torso > TORSO_DOWN {
            enter_phase(state, Phase::Down);
            if torso > FULL_RANGE {
                Ok(Detection::feedback("FULL RANGE - NOW SIT UP"))
            } else {
                Ok(Detection::feedback("LOWER YOUR BACK FURTHER"))
            }
        } else {
            Ok(Detection::feedback("KEEP GOING"))
        }
    }
}
