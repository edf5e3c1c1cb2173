//! Frame-at-a-time entry point: one pose in, one count and feedback out.

use crate::{
    clock::{Clock, SystemClock},
    detect::Tracker,
    error::Error,
    exercise::Exercise,
    pose::{Landmark, Pose},
    view::LandmarkView,
};
use tracing::{error, info};

const NO_POSE: &str = "NO POSE DETECTED - STEP INTO FRAME";
const MAX_ERROR_CHARS: usize = 50;

/// Outcome of one processed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameResult {
    pub rep_completed: bool,
    pub feedback: String,
    /// Cumulative reps, or whole seconds held for timed exercises.
    pub rep_count: u32,
}

/// Receives every processed frame, e.g. to draw the skeleton and the counter.
pub trait Renderer {
    fn render(&mut self, pose: Option<&Pose>, result: &FrameResult);
}

#[derive(Debug, Default, Copy, Clone)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&mut self, _pose: Option<&Pose>, _result: &FrameResult) {}
}

impl<F> Renderer for F
where
    F: FnMut(Option<&Pose>, &FrameResult),
{
    fn render(&mut self, pose: Option<&Pose>, result: &FrameResult) {
        self(pose, result)
    }
}

/// Tracks one exercise for one body.
#[derive(Debug)]
pub struct Session<C = SystemClock, R = NoopRenderer> {
    tracker: Tracker,
    clock: C,
    renderer: R,
}

impl Session {
    pub fn new(exercise: &str) -> Result<Self, Error> {
        Self::with_clock(exercise, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(exercise: &str, clock: C) -> Result<Self, Error> {
        let exercise = exercise.parse::<Exercise>()?;
        info!(message = "session started", %exercise);
        Ok(Self {
            tracker: Tracker::new(exercise),
            clock,
            renderer: NoopRenderer,
        })
    }
}

impl<C: Clock, R: Renderer> Session<C, R> {
    pub fn with_renderer<S: Renderer>(self, renderer: S) -> Session<C, S> {
        Session {
            tracker: self.tracker,
            clock: self.clock,
            renderer,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn exercise(&self) -> Exercise {
        self.tracker.exercise()
    }

    pub fn rep_count(&self) -> u32 {
        self.tracker.rep_count()
    }

    pub fn stage_label(&self) -> Option<&'static str> {
        self.tracker.stage_label()
    }

    /// Start tracking a different exercise from a clean state.
    pub fn switch(&mut self, exercise: &str) -> Result<(), Error> {
        let exercise = exercise.parse::<Exercise>()?;
        info!(message = "switching exercise", from = %self.exercise(), to = %exercise);
        self.tracker = Tracker::new(exercise);
        Ok(())
    }

    pub fn reset(&mut self) {
        info!(message = "session reset", exercise = %self.exercise());
        self.tracker.reset();
    }

    pub fn process_pose(&mut self, pose: Option<&Pose>) -> FrameResult {
        let result = match pose {
            Some(pose) => {
                let now = self.clock.now();
                match self.tracker.process(&LandmarkView::new(pose), now) {
                    Ok(detection) => FrameResult {
                        rep_completed: detection.rep_completed,
                        feedback: detection.feedback.into_owned(),
                        rep_count: self.rep_count(),
                    },
                    Err(e) => self.failed(&e),
                }
            }
            None => self.unchanged(NO_POSE.to_owned()),
        };
        self.renderer.render(pose, &result);
        result
    }

    /// Process one frame of raw estimator output in BlazePose order.
    pub fn process_landmarks(&mut self, landmarks: Option<&[Landmark]>) -> FrameResult {
        match landmarks.map(Pose::from_blazepose).transpose() {
            Ok(pose) => self.process_pose(pose.as_ref()),
            Err(e) => {
                let result = self.failed(&e);
                self.renderer.render(None, &result);
                result
            }
        }
    }

    fn failed(&self, e: &Error) -> FrameResult {
        error!(message = "frame processing failed", error = %e, exercise = %self.exercise());
        let message: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
        self.unchanged(format!("Error: {}", message))
    }

    fn unchanged(&self, feedback: String) -> FrameResult {
        FrameResult {
            rep_completed: false,
            feedback,
            rep_count: self.rep_count(),
        }
    }
}
