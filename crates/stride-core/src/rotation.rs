//! Euler-angle rotation of a single 3D vector.
//!
//! Unrelated to the steppers: this answers where a vector ends up after one
//! rotation, not how it gets there. Angles are in radians, unlike the
//! degree-based heading ramp of [`Stepper::turn_to`](crate::Stepper::turn_to).

use crate::vector::Point3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl EulerAngles {
    pub const fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    pub fn from_degrees(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self::new(alpha.to_radians(), beta.to_radians(), gamma.to_radians())
    }

    pub fn matrix(&self) -> RotationMatrix {
        RotationMatrix::from_euler(*self)
    }

    pub fn rotate(&self, vector: Point3) -> Point3 {
        self.matrix().apply(vector)
    }
}

/// Row-major 3x3 rotation matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationMatrix(pub [[f64; 3]; 3]);

impl RotationMatrix {
    pub const IDENTITY: Self = Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// `Rz(gamma) * Rx(beta) * Rz(alpha)`: `alpha` about z is applied first,
    /// then `beta` about x, then `gamma` about z.
    pub fn from_euler(angles: EulerAngles) -> Self {
        let (sa, ca) = angles.alpha.sin_cos();
        let (sb, cb) = angles.beta.sin_cos();
        let (sg, cg) = angles.gamma.sin_cos();
        Self([
            [ca * cg - cb * sa * sg, -cg * sa - ca * cb * sg, sb * sg],
            [cb * cg * sa + ca * sg, ca * cb * cg - sa * sg, -cg * sb],
            [sa * sb, ca * sb, cb],
        ])
    }

    pub fn apply(&self, v: Point3) -> Point3 {
        let [r0, r1, r2] = &self.0;
        Point3::new(
            r0[0] * v.x + r0[1] * v.y + r0[2] * v.z,
            r1[0] * v.x + r1[1] * v.y + r1[2] * v.z,
            r2[0] * v.x + r2[1] * v.y + r2[2] * v.z,
        )
    }

    /// The inverse rotation.
    pub fn transpose(&self) -> Self {
        let m = &self.0;
        Self([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }
}
