//! Unit-sphere vector algebra.
//!
//! Locations are carried onto the unit sphere as Cartesian vectors so that
//! angular separations, great-circle normals and rotations along a path are
//! plain dot products, cross products and matrix multiplications.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;

/// A Cartesian vector, usually of unit length.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Vector for a point given by polar angle (from +z) and azimuth, in radians.
    pub fn from_unit_spherical(polar: f64, azimuth: f64) -> Self {
        let (sin_polar, cos_polar) = polar.sin_cos();
        Self {
            x: sin_polar * azimuth.cos(),
            y: sin_polar * azimuth.sin(),
            z: cos_polar,
        }
    }

    /// Polar angle and azimuth of a unit vector, in radians.
    pub fn to_unit_spherical(&self) -> (f64, f64) {
        (self.z.clamp(-1.0, 1.0).acos(), self.y.atan2(self.x))
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scale to unit length. A zero vector has no direction and is returned unchanged.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self::new(self.x / mag, self.y / mag, self.z / mag)
        } else {
            *self
        }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - other.y * self.z,
            y: other.x * self.z - self.x * other.z,
            z: self.x * other.y - other.x * self.y,
        }
    }

    /// Angle between two vectors in radians, in `[0, π]`.
    ///
    /// The cosine is clamped before `acos`: nearly parallel or antiparallel
    /// vectors can produce a dot product a few ulps outside `[-1, 1]`.
    pub fn angle_between(&self, other: &Self) -> f64 {
        self.normalize()
            .dot(&other.normalize())
            .clamp(-1.0, 1.0)
            .acos()
    }

    /// Rotate this vector about `axis` (unit length) by `angle` radians,
    /// counter-clockwise when looking down the axis.
    pub fn rotate_around(&self, axis: &Self, angle: f64) -> Self {
        Matrix3::rotation(axis, angle).times(self)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4} {:.4} {:.4})", self.x, self.y, self.z)
    }
}

/// A 3×3 matrix stored as rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub rows: [Vector3; 3],
}

impl Matrix3 {
    /// Rodrigues rotation matrix for a unit `axis` and signed `angle`.
    pub fn rotation(axis: &Vector3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let k = 1.0 - c;
        let Vector3 { x, y, z } = *axis;
        Self {
            rows: [
                Vector3::new(c + x * x * k, x * y * k - z * s, x * z * k + y * s),
                Vector3::new(y * x * k + z * s, c + y * y * k, y * z * k - x * s),
                Vector3::new(z * x * k - y * s, z * y * k + x * s, c + z * z * k),
            ],
        }
    }

    pub fn times(&self, v: &Vector3) -> Vector3 {
        Vector3::new(
            self.rows[0].dot(v),
            self.rows[1].dot(v),
            self.rows[2].dot(v),
        )
    }
}
