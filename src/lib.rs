//! Count exercise repetitions and timed holds from per-frame body landmarks.
//!
//! A [`Session`] takes one pose per frame, runs it through the detector for
//! the selected [`Exercise`] and reports whether a rep was just completed,
//! the running count and a line of form feedback.

pub mod clock;
pub mod detect;
pub mod error;
pub mod exercise;
pub mod geometry;
pub mod pose;
pub mod profile;
pub mod session;
pub mod state;
pub mod view;

#[cfg(test)]
mod testing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::Error;
pub use exercise::{Category, Exercise};
pub use pose::{Joint, Landmark, Pose};
pub use profile::{CaptureProfile, Hardware};
pub use session::{FrameResult, NoopRenderer, Renderer, Session};
