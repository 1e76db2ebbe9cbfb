//! Synthetic location sets for stress testing and benchmarking.
//!
//! Generates globally scattered locations plus optional "planted" pairs whose
//! connecting great circle runs straight through a chosen reference point,
//! providing ground truth for the search.
//!
//! # Example
//!
//! ```rust
//! use flybymatch::synthetic::SyntheticScenario;
//!
//! let scenario = SyntheticScenario {
//!     location_count: 500,
//!     waypoint_fraction: 0.8,
//!     seed: 42,
//! };
//!
//! let locations = scenario.generate();
//! assert_eq!(locations.len(), 500);
//! assert!(locations.iter().all(|l| l.is_valid()));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geo_utils::destination;
use crate::{Location, LocationKind};

/// Scenario configuration for generating synthetic locations.
#[derive(Debug, Clone)]
pub struct SyntheticScenario {
    /// Number of locations to generate.
    pub location_count: usize,
    /// Fraction of locations that are waypoints, the rest are airports (0.0-1.0).
    pub waypoint_fraction: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

impl Default for SyntheticScenario {
    fn default() -> Self {
        Self {
            location_count: 1000,
            waypoint_fraction: 0.7,
            seed: 42,
        }
    }
}

impl SyntheticScenario {
    /// Locations spread uniformly over the sphere.
    pub fn generate(&self) -> Vec<Location> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.location_count)
            .map(|i| {
                // Uniform in sin(latitude) gives uniform area density
                let latitude = rng.gen_range(-1.0f64..1.0).asin().to_degrees();
                let longitude = rng.gen_range(-180.0..180.0);
                let kind = if rng.gen_bool(self.waypoint_fraction.clamp(0.0, 1.0)) {
                    LocationKind::Waypoint
                } else {
                    LocationKind::Airport
                };
                Location::new(kind, &format!("SYN{:06}", i), latitude, longitude)
            })
            .collect()
    }
}

/// Pairs of waypoints on great circles through `reference`, crossing it with
/// the given headings (degrees from north).
///
/// Each pair is `(before, after)`: `before` lies `before_km` behind the
/// reference and `after` lies `after_km` ahead of it along the heading.
pub fn planted_pairs(
    reference: &Location,
    headings_deg: &[f64],
    before_km: f64,
    after_km: f64,
) -> Vec<(Location, Location)> {
    headings_deg
        .iter()
        .enumerate()
        .map(|(k, &heading)| {
            let (lat1, lon1) = destination(
                reference.latitude,
                reference.longitude,
                heading + 180.0,
                before_km,
            );
            let (lat2, lon2) =
                destination(reference.latitude, reference.longitude, heading, after_km);
            (
                Location::new(LocationKind::Waypoint, &format!("PLB{:03}", k), lat1, lon1),
                Location::new(LocationKind::Waypoint, &format!("PLA{:03}", k), lat2, lon2),
            )
        })
        .collect()
}
