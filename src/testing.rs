//! Synthetic poses for detector tests.

use crate::{
    detect::{Detection, Detector},
    geometry::Point,
    pose::{Joint, Keypoint, Pose, NUM_JOINTS},
    state::ExerciseState,
    view::LandmarkView,
};
use std::time::Duration;

const DEFAULT_VISIBILITY: f32 = 0.9;

/// Front-facing standing body: arms hanging, feet under the hips.
const STANDING: [(f32, f32); NUM_JOINTS] = [
    (0.50, 0.10), // nose
    (0.52, 0.08), // left eye
    (0.48, 0.08), // right eye
    (0.54, 0.09), // left ear
    (0.46, 0.09), // right ear
    (0.60, 0.25), // left shoulder
    (0.40, 0.25), // right shoulder
    (0.62, 0.40), // left elbow
    (0.38, 0.40), // right elbow
    (0.63, 0.55), // left wrist
    (0.37, 0.55), // right wrist
    (0.56, 0.55), // left hip
    (0.44, 0.55), // right hip
    (0.56, 0.75), // left knee
    (0.44, 0.75), // right knee
    (0.56, 0.95), // left ankle
    (0.44, 0.95), // right ankle
];

pub(crate) struct PoseBuilder {
    pose: Pose,
}

impl PoseBuilder {
    pub(crate) fn standing() -> Self {
        let mut keypoints = [Keypoint::default(); NUM_JOINTS];
        for (keypoint, &(x, y)) in keypoints.iter_mut().zip(STANDING.iter()) {
            *keypoint = Keypoint {
                point: Point::new(x, y).unwrap(),
                visibility: DEFAULT_VISIBILITY,
            };
        }
        Self {
            pose: Pose::new(keypoints),
        }
    }

    pub(crate) fn at(mut self, joint: Joint, x: f32, y: f32) -> Self {
        let visibility = self.pose.keypoint(joint).visibility;
        self.pose.set(
            joint,
            Keypoint {
                point: Point::new(x, y).unwrap(),
                visibility,
            },
        );
        self
    }

    pub(crate) fn place(self, joint: Joint, (x, y): (f32, f32)) -> Self {
        self.at(joint, x, y)
    }

    /// Place both sides of a side-view body on the same coordinates.
    pub(crate) fn both(self, left: Joint, right: Joint, (x, y): (f32, f32)) -> Self {
        self.at(left, x, y).at(right, x, y)
    }

    pub(crate) fn visibility(mut self, joint: Joint, visibility: f32) -> Self {
        let point = self.pose.keypoint(joint).point;
        self.pose.set(joint, Keypoint { point, visibility });
        self
    }

    pub(crate) fn build(self) -> Pose {
        self.pose
    }
}

impl From<Pose> for PoseBuilder {
    fn from(pose: Pose) -> Self {
        Self { pose }
    }
}

/// End of a limb of `length` that makes `degrees` at `vertex` with the ray
/// towards `first`.
pub(crate) fn bend(first: (f32, f32), vertex: (f32, f32), degrees: f32, length: f32) -> (f32, f32) {
    rotate(first, vertex, degrees, length)
}

/// Like [`bend`], rotating the other way.
pub(crate) fn bend_mirrored(
    first: (f32, f32),
    vertex: (f32, f32),
    degrees: f32,
    length: f32,
) -> (f32, f32) {
    rotate(first, vertex, -degrees, length)
}

fn rotate(first: (f32, f32), vertex: (f32, f32), degrees: f32, length: f32) -> (f32, f32) {
    let (dx, dy) = (first.0 - vertex.0, first.1 - vertex.1);
    let norm = (dx * dx + dy * dy).sqrt();
    let (dx, dy) = (dx / norm, dy / norm);
    let (sin, cos) = degrees.to_radians().sin_cos();
    (
        vertex.0 + (dx * cos - dy * sin) * length,
        vertex.1 + (dx * sin + dy * cos) * length,
    )
}

pub(crate) fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

/// Run one frame through `detector`, which must not fail.
pub(crate) fn step<D: Detector>(
    detector: &D,
    state: &mut ExerciseState<D::Stage>,
    pose: &Pose,
    now: Duration,
) -> Detection {
    detector
        .detect(&LandmarkView::new(pose), state, now)
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::{bend, bend_mirrored};
    use crate::geometry::{angle, Point};
    use assert_approx_eq::assert_approx_eq;

    fn p((x, y): (f32, f32)) -> Point {
        Point::new(x, y).unwrap()
    }

    #[test]
    fn bend_produces_requested_angle() {
        let (first, vertex) = ((0.4, 0.5), (0.45, 0.7));
        for &degrees in &[30.0, 90.0, 100.0, 159.0, 161.0, 175.0] {
            let end = bend(first, vertex, degrees, 0.2);
            assert_approx_eq!(angle(p(first), p(vertex), p(end)), degrees, 1e-2);
            let end = bend_mirrored(first, vertex, degrees, 0.2);
            assert_approx_eq!(angle(p(first), p(vertex), p(end)), degrees, 1e-2);
        }
    }
}
