//! Geographic utilities: unit conversions and the mapping from latitude and
//! longitude onto the unit sphere.

use crate::vector::Vector3;
use crate::Location;
use std::f64::consts::{FRAC_PI_2, PI};

/// Mean Earth radius in kilometers (spherical model).
pub const EARTH_RADIUS_KM: f64 = 6371.00;

/// Surface distance in km for an angular distance in radians.
#[inline]
pub fn rad_to_km(rad: f64) -> f64 {
    rad * EARTH_RADIUS_KM
}

/// Angular distance in radians for a surface distance in km.
#[inline]
pub fn km_to_rad(km: f64) -> f64 {
    km / EARTH_RADIUS_KM
}

/// Polar angle (from the north pole) in radians for a latitude in degrees.
#[inline]
pub fn latitude_to_polar(latitude: f64) -> f64 {
    FRAC_PI_2 - latitude.to_radians()
}

/// Latitude in degrees for a polar angle in radians.
#[inline]
pub fn polar_to_latitude(polar: f64) -> f64 {
    (FRAC_PI_2 - polar).to_degrees()
}

/// Azimuth in radians for a longitude in degrees.
#[inline]
pub fn longitude_to_azimuth(longitude: f64) -> f64 {
    PI + longitude.to_radians()
}

/// Unit-sphere vector for a latitude/longitude pair in degrees.
pub fn lat_lon_to_vector(latitude: f64, longitude: f64) -> Vector3 {
    Vector3::from_unit_spherical(latitude_to_polar(latitude), longitude_to_azimuth(longitude))
}

/// Angular distance in radians between two locations.
pub fn angular_distance(loc1: &Location, loc2: &Location) -> f64 {
    loc1.to_vector().angle_between(&loc2.to_vector())
}

/// Great-circle surface distance in km between two locations.
pub fn great_circle_distance_km(loc1: &Location, loc2: &Location) -> f64 {
    rad_to_km(angular_distance(loc1, loc2))
}

/// Point reached by travelling `distance_km` along a great circle from
/// `(latitude, longitude)` with initial bearing `bearing_deg`.
///
/// Returns `(latitude, longitude)` in degrees, longitude wrapped to `[-180, 180]`.
pub fn destination(latitude: f64, longitude: f64, bearing_deg: f64, distance_km: f64) -> (f64, f64) {
    let phi1 = latitude.to_radians();
    let lambda1 = longitude.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = km_to_rad(distance_km);

    let sin_phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).clamp(-1.0, 1.0);
    let phi2 = sin_phi2.asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

    let mut lon = lambda2.to_degrees();
    if lon > 180.0 {
        lon -= 360.0;
    } else if lon < -180.0 {
        lon += 360.0;
    }
    (phi2.to_degrees(), lon)
}

/// Normal of the great circle through two locations (not normalized).
pub fn great_circle_normal(loc1: &Location, loc2: &Location) -> Vector3 {
    loc1.to_vector().cross(&loc2.to_vector())
}
