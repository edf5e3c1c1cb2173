//! Planar geometry over normalized image coordinates.

use crate::error::Error;
use ordered_float::NotNan;
use std::ops::Sub;

/// Rays shorter than this are treated as coincident points.
const MIN_RAY_LENGTH: f32 = 1e-6;

/// A point in normalized image space: `0.0..=1.0` on both axes, origin at the
/// top left, `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Result<Self, Error> {
        Ok(Self {
            x: NotNan::new(x)
                .map_err(|e| Error::ConstructNotNan(e, x))?
                .into_inner(),
            y: NotNan::new(y)
                .map_err(|e| Error::ConstructNotNan(e, y))?
                .into_inner(),
        })
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.y
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Interior angle at `b` between the rays `b -> a` and `b -> c`, in degrees.
///
/// The difference of the two `atan2` bearings is folded into `[0, 180]`, so
/// `180` is a straight joint and smaller values mean more flexion. Coincident
/// points give a meaningless result; use [`joint_angle`] when that matters.
pub fn angle(a: Point, b: Point, c: Point) -> f32 {
    let bearing = |p: Point| f64::from(p.y - b.y).atan2(f64::from(p.x - b.x));
    let degrees = (bearing(c) - bearing(a)).to_degrees().abs();
    let folded = if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    };
    folded as f32
}

/// Checked form of [`angle`] used by the detectors.
///
/// Fails with [`Error::InsufficientSignal`] when either ray is degenerate or
/// the result is not a number.
pub fn joint_angle(a: Point, b: Point, c: Point) -> Result<f32, Error> {
    let usable = |ray: Point| {
        let length = ray.length();
        length.is_finite() && length >= MIN_RAY_LENGTH
    };
    if !(usable(a - b) && usable(c - b)) {
        return Err(Error::InsufficientSignal);
    }
    NotNan::new(angle(a, b, c))
        .map(NotNan::into_inner)
        .map_err(|_| Error::InsufficientSignal)
}
