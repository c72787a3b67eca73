//! Positions the steppers can walk between.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Capability a position type needs so one stepping loop serves every
/// dimensionality.
pub trait Vector:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self> + Div<f64, Output = Self>
{
    /// Euclidean length.
    fn norm(&self) -> f64;

    /// Straight-line distance to `other`.
    fn distance_to(&self, other: Self) -> f64 {
        (other - *self).norm()
    }
}

/// Point `travelled` units along the segment `from -> to`, whose length
/// is `length`.
///
/// Scales before dividing so whole-unit steps along axis-aligned segments
/// land on exact coordinates.
pub fn project<V: Vector>(from: V, to: V, travelled: f64, length: f64) -> V {
    from + (to - from) * travelled / length
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Vector for Point2 {
    fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Add for Point3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Point3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Vector for Point3 {
    fn norm(&self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }
}

// A bare scalar is a one-axis vector; the angular stepper walks these.
impl Vector for f64 {
    fn norm(&self) -> f64 {
        self.abs()
    }
}
