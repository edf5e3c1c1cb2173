use crate::{error::Error, geometry::Point};
use num_traits::FromPrimitive;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, num_derive::FromPrimitive)]
pub enum Joint {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

pub const NUM_JOINTS: usize = 17;

impl Joint {
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_idx(index: usize) -> Result<Self, Error> {
        Self::from_usize(index).ok_or(Error::ConvertUSizeToJoint(index))
    }
}

/// One landmark as reported by the pose estimator.
///
/// Coordinates are unchecked here; they are validated when a [`Pose`] is
/// built from them.
#[derive(Debug, Copy, Clone, PartialEq, Default, serde::Deserialize)]
#[serde(from = "[f32; 3]")]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, visibility]: [f32; 3]) -> Self {
        Self::new(x, y, visibility)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Keypoint {
    pub point: Point,
    pub visibility: f32,
}

impl Keypoint {
    fn try_from_landmark(landmark: Landmark) -> Result<Self, Error> {
        Ok(Self {
            point: Point::new(landmark.x, landmark.y)?,
            visibility: landmark.visibility,
        })
    }
}

pub type Keypoints = [Keypoint; NUM_JOINTS];

/// All tracked joints of one body in one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    keypoints: Keypoints,
}

impl Pose {
    pub fn new(keypoints: Keypoints) -> Self {
        Self { keypoints }
    }

    /// Build a pose by asking `landmark` for every joint.
    pub fn try_from_fn<F>(mut landmark: F) -> Result<Self, Error>
    where
        F: FnMut(Joint) -> Result<Landmark, Error>,
    {
        let mut keypoints = [Keypoint::default(); NUM_JOINTS];
        for (index, keypoint) in keypoints.iter_mut().enumerate() {
            *keypoint = Keypoint::try_from_landmark(landmark(Joint::from_idx(index)?)?)?;
        }
        Ok(Self { keypoints })
    }

    /// Build a pose from the 33-landmark BlazePose layout.
    pub fn from_blazepose(landmarks: &[Landmark]) -> Result<Self, Error> {
        Self::try_from_fn(|joint| {
            let index = constants::blazepose_index(joint);
            landmarks
                .get(index)
                .copied()
                .ok_or(Error::MissingLandmark {
                    index,
                    len: landmarks.len(),
                })
        })
    }

    #[inline]
    pub fn keypoint(&self, joint: Joint) -> &Keypoint {
        &self.keypoints[joint.idx()]
    }

    pub fn set(&mut self, joint: Joint, keypoint: Keypoint) {
        self.keypoints[joint.idx()] = keypoint;
    }
}

pub mod constants {
    use crate::pose::Joint::{self, *};

    pub const BLAZEPOSE_LANDMARKS: usize = 33;

    pub(crate) fn blazepose_index(joint: Joint) -> usize {
        match joint {
            Nose => 0,
            LeftEye => 2,
            RightEye => 5,
            LeftEar => 7,
            RightEar => 8,
            LeftShoulder => 11,
            RightShoulder => 12,
            LeftElbow => 13,
            RightElbow => 14,
            LeftWrist => 15,
            RightWrist => 16,
            LeftHip => 23,
            RightHip => 24,
            LeftKnee => 25,
            RightKnee => 26,
            LeftAnkle => 27,
            RightAnkle => 28,
        }
    }
}
