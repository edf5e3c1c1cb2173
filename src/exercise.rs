//! Identifiers of the supported exercises and their catalog metadata.

use crate::error::Error;
use std::{fmt, str::FromStr};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Exercise {
    PushUp,
    Squat,
    JumpingJack,
    SitUp,
    Lunge,
    Plank,
    ArmCircles,
    WallSit,
    TricepDip,
    Burpee,
    HighKnees,
    LegRaise,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    UpperBody,
    Core,
    LowerBody,
    Cardio,
}

impl Exercise {
    pub const ALL: [Exercise; 12] = [
        Exercise::PushUp,
        Exercise::Squat,
        Exercise::JumpingJack,
        Exercise::SitUp,
        Exercise::Lunge,
        Exercise::Plank,
        Exercise::ArmCircles,
        Exercise::WallSit,
        Exercise::TricepDip,
        Exercise::Burpee,
        Exercise::HighKnees,
        Exercise::LegRaise,
    ];

    /// The identifier used by the catalog and by callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Exercise::PushUp => "push-up",
            Exercise::Squat => "squat",
            Exercise::JumpingJack => "jumping-jack",
            Exercise::SitUp => "sit-up",
            Exercise::Lunge => "lunge",
            Exercise::Plank => "plank",
            Exercise::ArmCircles => "arm-circles",
            Exercise::WallSit => "wall-sit",
            Exercise::TricepDip => "tricep-dip",
            Exercise::Burpee => "burpee",
            Exercise::HighKnees => "high-knees",
            Exercise::LegRaise => "leg-raise",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Exercise::PushUp => "Push-ups",
            Exercise::Squat => "Squats",
            Exercise::JumpingJack => "Jumping Jacks",
            Exercise::SitUp => "Sit-ups",
            Exercise::Lunge => "Lunges",
            Exercise::Plank => "Plank",
            Exercise::ArmCircles => "Arm Circles",
            Exercise::WallSit => "Wall Sit",
            Exercise::TricepDip => "Tricep Dips",
            Exercise::Burpee => "Burpees",
            Exercise::HighKnees => "High Knees",
            Exercise::LegRaise => "Leg Raises",
        }
    }

    /// Arm circles have no catalog entry; upper body and level 1 are local
    /// defaults for them.
    pub fn category(self) -> Category {
        match self {
            Exercise::PushUp | Exercise::TricepDip | Exercise::ArmCircles => Category::UpperBody,
            Exercise::SitUp | Exercise::Plank | Exercise::LegRaise => Category::Core,
            Exercise::Squat | Exercise::Lunge | Exercise::WallSit => Category::LowerBody,
            Exercise::JumpingJack | Exercise::HighKnees | Exercise::Burpee => Category::Cardio,
        }
    }

    /// Level at which the catalog unlocks the exercise. Exercises missing
    /// from the catalog are available from the start.
    pub fn required_level(self) -> u32 {
        match self {
            Exercise::HighKnees | Exercise::LegRaise => 5,
            Exercise::TricepDip => 8,
            Exercise::WallSit => 10,
            Exercise::Burpee => 12,
            _ => 1,
        }
    }

    pub fn is_unlocked(self, level: u32) -> bool {
        level >= self.required_level()
    }

    /// Timed exercises report whole seconds held instead of reps.
    pub fn is_timed(self) -> bool {
        matches!(self, Exercise::Plank | Exercise::WallSit)
    }
}

impl FromStr for Exercise {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|exercise| exercise.as_str() == s)
            .ok_or_else(|| Error::UnsupportedExercise(s.to_owned()))
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
