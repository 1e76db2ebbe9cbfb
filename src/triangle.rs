//! Spherical triangle solver on the unit sphere.
//!
//! Vertex 1 is the start of a path, vertex 2 its end and vertex 3 the fixed
//! reference point:
//!
//! ```text
//!                    3
//!                   _.__   c
//!           b   _--`  \ ```-._
//!           _--`     d \ __-*` 2
//!        _-`       __--`4
//!      .` C  __--``
//!     /__--``        a
//!   1
//! ```
//!
//! Side `a` joins 1 and 2, `b` joins 1 and 3, `c` joins 2 and 3. On a unit
//! sphere a side length equals the angle it subtends at the centre. Angle `C`
//! sits at vertex 1 (between `a` and `b`), angle `B` at vertex 2 (between
//! `a` and `c`). Point 4 is where the perpendicular `d` from 3 meets the path.

use crate::error::{FlybyError, Result};
use crate::vector::Vector3;
use crate::Location;

/// Below this magnitude `sin(s1)·sin(s2)` is treated as zero.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Side lengths, in radians, of the triangle formed by three unit vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalTriangle {
    /// Path length, vertex 1 to vertex 2
    pub a: f64,
    /// Vertex 1 to the reference point
    pub b: f64,
    /// Vertex 2 to the reference point
    pub c: f64,
}

impl SphericalTriangle {
    pub fn from_vectors(v1: &Vector3, v2: &Vector3, v3: &Vector3) -> Self {
        Self {
            a: v1.angle_between(v2),
            b: v1.angle_between(v3),
            c: v2.angle_between(v3),
        }
    }

    pub fn from_locations(loc1: &Location, loc2: &Location, loc3: &Location) -> Self {
        Self::from_vectors(&loc1.to_vector(), &loc2.to_vector(), &loc3.to_vector())
    }

    /// Angle at vertex 1, opposite side `c`.
    pub fn angle_c(&self) -> Result<f64> {
        angle_opposite(self.c, self.a, self.b, "a or b")
    }

    /// Angle at vertex 2, opposite side `b`.
    pub fn angle_b(&self) -> Result<f64> {
        angle_opposite(self.b, self.c, self.a, "a or c")
    }

    /// Angle at vertex 3, opposite side `a`.
    pub fn angle_a(&self) -> Result<f64> {
        angle_opposite(self.a, self.b, self.c, "b or c")
    }

    /// Perpendicular distance from vertex 3 to the great circle through 1 and 2,
    /// by the law of sines on the right triangle 1-4-3.
    pub fn nearest_distance(&self, angle_c: f64) -> f64 {
        (self.b.sin() * angle_c.sin()).clamp(-1.0, 1.0).asin()
    }

    /// Distance along the path from vertex 1 to the foot of the perpendicular
    /// (Napier's rule on the right triangle 1-4-3).
    pub fn offset_along_path(&self, angle_c: f64) -> f64 {
        (angle_c.cos() * self.b.tan()).atan()
    }
}

/// Law of cosines solved for the angle opposite `opposite`:
/// `cos(opposite) = cos(s1)·cos(s2) + sin(s1)·sin(s2)·cos(angle)`.
fn angle_opposite(opposite: f64, s1: f64, s2: f64, side: &'static str) -> Result<f64> {
    let denominator = s1.sin() * s2.sin();
    if denominator.abs() < DEGENERATE_EPSILON {
        return Err(FlybyError::DegenerateTriangle { side });
    }
    let cos_angle = (opposite.cos() - s1.cos() * s2.cos()) / denominator;
    Ok(cos_angle.clamp(-1.0, 1.0).acos())
}
