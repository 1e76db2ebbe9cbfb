//! Nearest-approach filter.
//!
//! Decides whether the great-circle path between two locations comes within
//! a configured distance of a fixed reference point while heading inside a
//! configured window at its closest approach.
//!
//! The checks run cheapest first and every one can reject early:
//! 1. Hemisphere: both endpoints on the far side of the equator from the
//!    reference. Counted as "avoided" since no trigonometry was needed.
//! 2. Ordering: the southern endpoint becomes the start
//! 3. Side lengths of the triangle start/end/reference
//! 4. Angle at the start (closest approach must not lie before the start)
//! 5. Closest-approach distance
//! 6. Angle at the end (closest approach must not lie beyond the end)
//! 7. Heading at the closest approach
//! 8. Heading window

use std::f64::consts::FRAC_PI_2;

use crate::error::{FlybyError, Result};
use crate::geo_utils::km_to_rad;
use crate::triangle::SphericalTriangle;
use crate::vector::Vector3;
use crate::{FlybyConfig, FlybyMatch, GreatCircleSegment, Location};

/// Why a pair was rejected after the hemisphere check passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// A triangle side exceeds its maximum
    SideLength,
    /// Coincident or antipodal vertices, no triangle angles exist
    Degenerate,
    /// The closest approach falls before the start of the path
    BeforeStart,
    /// The closest approach is too far from the reference point
    TooFar,
    /// The closest approach falls beyond the end of the path
    BeyondEnd,
    /// The heading at the closest approach is outside the window
    Heading,
}

/// Outcome of evaluating one pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Accepted(FlybyMatch),
    /// Rejected by the hemisphere heuristic, without trigonometry
    Avoided,
    Rejected(Rejection),
}

impl Evaluation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Evaluation::Accepted(_))
    }

    pub fn is_avoided(&self) -> bool {
        matches!(self, Evaluation::Avoided)
    }
}

/// A pair predicate run by one search worker.
///
/// Each worker owns its filter, so an implementation may keep working state
/// in `self` without synchronisation.
pub trait FlybyFilter: Send {
    fn nearest_approach(&mut self, loc1: &Location, loc2: &Location) -> Evaluation;
}

/// Nearest-approach filter around a fixed reference location.
///
/// Holds only configuration; every intermediate value of an evaluation is a
/// local of [`NearestApproachFilter::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub struct NearestApproachFilter {
    reference: Location,
    reference_vector: Vector3,
    amax: f64,
    bmax: f64,
    cmax: f64,
    dmax: f64,
    dir0: f64,
    dir1: f64,
}

impl NearestApproachFilter {
    /// Build a filter, converting kilometers and degrees to radians.
    pub fn new(reference: Location, config: &FlybyConfig) -> Result<Self> {
        let [dir0, dir1] = match config.heading_deg.as_slice() {
            &[dir0, dir1] => [dir0, dir1],
            other => {
                return Err(FlybyError::InvalidHeadingWindow {
                    bounds: other.len(),
                })
            }
        };
        if dir0 > dir1 {
            return Err(FlybyError::InvertedHeadingWindow { dir0, dir1 });
        }
        Ok(Self {
            reference_vector: reference.to_vector(),
            reference,
            amax: bound("amax_km", config.amax_km)?,
            bmax: bound("bmax_km", config.bmax_km)?,
            cmax: bound("cmax_km", config.cmax_km)?,
            dmax: bound("dmax_km", config.dmax_km)?,
            dir0: dir0.to_radians(),
            dir1: dir1.to_radians(),
        })
    }

    pub fn reference(&self) -> &Location {
        &self.reference
    }

    /// Heading window in radians.
    pub fn heading_window(&self) -> (f64, f64) {
        (self.dir0, self.dir1)
    }

    /// Both endpoints strictly on the opposite side of the equator from the reference.
    pub fn is_avoidable(&self, loc1: &Location, loc2: &Location) -> bool {
        let reference = self.reference.latitude;
        (reference < 0.0 && loc1.latitude > 0.0 && loc2.latitude > 0.0)
            || (reference > 0.0 && loc1.latitude < 0.0 && loc2.latitude < 0.0)
    }

    /// Evaluate the path between `loc1` and `loc2`, in either order.
    pub fn evaluate(&self, loc1: &Location, loc2: &Location) -> Evaluation {
        if self.is_avoidable(loc1, loc2) {
            return Evaluation::Avoided;
        }

        // Always run south to north
        let (start, end) = if loc1.latitude > loc2.latitude {
            (loc2, loc1)
        } else {
            (loc1, loc2)
        };

        let v1 = start.to_vector();
        let v2 = end.to_vector();
        let triangle = SphericalTriangle::from_vectors(&v1, &v2, &self.reference_vector);
        if triangle.a > self.amax || triangle.b > self.bmax || triangle.c > self.cmax {
            return Evaluation::Rejected(Rejection::SideLength);
        }

        let angle_c = match triangle.angle_c() {
            Ok(angle) => angle,
            Err(_) => return Evaluation::Rejected(Rejection::Degenerate),
        };
        if angle_c >= FRAC_PI_2 {
            return Evaluation::Rejected(Rejection::BeforeStart);
        }

        let nearest = triangle.nearest_distance(angle_c);
        if nearest > self.dmax {
            return Evaluation::Rejected(Rejection::TooFar);
        }

        let angle_b = match triangle.angle_b() {
            Ok(angle) => angle,
            Err(_) => return Evaluation::Rejected(Rejection::Degenerate),
        };
        if angle_b >= FRAC_PI_2 {
            return Evaluation::Rejected(Rejection::BeyondEnd);
        }

        let offset = triangle.offset_along_path(angle_c);
        let normal = v1.cross(&v2).normalize();
        let closest = v1.rotate_around(&normal, offset);
        let tangent = -closest.cross(&normal);
        let heading = heading_from_north(&closest, &tangent, &normal);

        if heading < self.dir0 || heading > self.dir1 {
            return Evaluation::Rejected(Rejection::Heading);
        }

        Evaluation::Accepted(FlybyMatch {
            segment: GreatCircleSegment {
                start: start.clone(),
                end: end.clone(),
                length: triangle.a,
            },
            angle_b,
            angle_c,
            start_to_reference: triangle.b,
            end_to_reference: triangle.c,
            nearest,
            heading,
        })
    }
}

impl FlybyFilter for NearestApproachFilter {
    fn nearest_approach(&mut self, loc1: &Location, loc2: &Location) -> Evaluation {
        self.evaluate(loc1, loc2)
    }
}

fn bound(name: &'static str, km: f64) -> Result<f64> {
    if km.is_finite() && km >= 0.0 {
        Ok(km_to_rad(km))
    } else {
        Err(FlybyError::InvalidBound { name, value: km })
    }
}

/// Signed heading in radians of `tangent` at `point` on a path with unit `normal`.
///
/// The magnitude is the angle between the tangent and the local meridian
/// pointing north. East of north is positive, which for a path running from
/// start to end is the sign of the normal's z component (the sine of the
/// longitude difference). A normal with zero z, a path along a meridian, is
/// taken as positive.
pub fn heading_from_north(point: &Vector3, tangent: &Vector3, normal: &Vector3) -> f64 {
    let pole = Vector3::new(0.0, 0.0, 1.0);
    let meridian = Vector3::new(-point.z * point.x, -point.z * point.y, 1.0 - point.z * point.z);
    let magnitude = if meridian.magnitude() > f64::EPSILON {
        tangent.angle_between(&meridian.normalize())
    } else {
        // At a pole every direction is south; fall back to the angle from the axis
        tangent.angle_between(&pole)
    };
    if normal.z < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}
