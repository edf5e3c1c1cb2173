//! Read-only, side-aware access to the joints of a [`Pose`].

use crate::{
    geometry::Point,
    pose::{Joint, Pose},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn pick(self, left: Joint, right: Joint) -> Joint {
        match self {
            Side::Left => left,
            Side::Right => right,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct LandmarkView<'a> {
    pose: &'a Pose,
}

impl<'a> LandmarkView<'a> {
    pub fn new(pose: &'a Pose) -> Self {
        Self { pose }
    }

    #[inline]
    pub fn point(&self, joint: Joint) -> Point {
        self.pose.keypoint(joint).point
    }

    #[inline]
    pub fn visibility(&self, joint: Joint) -> f32 {
        self.pose.keypoint(joint).visibility
    }

    pub fn midpoint(&self, a: Joint, b: Joint) -> Point {
        self.point(a).midpoint(self.point(b))
    }

    pub fn shoulder(&self, side: Side) -> Point {
        self.point(side.pick(Joint::LeftShoulder, Joint::RightShoulder))
    }

    pub fn elbow(&self, side: Side) -> Point {
        self.point(side.pick(Joint::LeftElbow, Joint::RightElbow))
    }

    pub fn wrist(&self, side: Side) -> Point {
        self.point(side.pick(Joint::LeftWrist, Joint::RightWrist))
    }

    pub fn hip(&self, side: Side) -> Point {
        self.point(side.pick(Joint::LeftHip, Joint::RightHip))
    }

    pub fn knee(&self, side: Side) -> Point {
        self.point(side.pick(Joint::LeftKnee, Joint::RightKnee))
    }

    pub fn ankle(&self, side: Side) -> Point {
        self.point(side.pick(Joint::LeftAnkle, Joint::RightAnkle))
    }

    /// Horizontal distance between the shoulders, the body-size reference for
    /// stance and spread checks.
    pub fn shoulder_width(&self) -> f32 {
        (self.shoulder(Side::Left).x() - self.shoulder(Side::Right).x()).abs()
    }

    /// Side whose hip the estimator is more confident about; ties go left.
    pub fn more_visible_side(&self) -> Side {
        if self.visibility(Joint::LeftHip) >= self.visibility(Joint::RightHip) {
            Side::Left
        } else {
            Side::Right
        }
    }
}
