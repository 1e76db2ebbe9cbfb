//! # Flyby Match
//!
//! Find pairs of locations whose connecting great-circle path passes close to
//! a fixed reference point, heading in a chosen direction when it does.
//!
//! This library provides:
//! - Unit-sphere vector algebra and a spherical triangle solver
//! - A nearest-approach filter with cheap early rejections
//! - A pair-count balanced partitioning of the n(n-1)/2 pair space
//! - A parallel search that merges results in a deterministic order
//! - CSV records for location sets and result rows
//!
//! ## Features
//!
//! - **`parallel`** - Run partitions in parallel with rayon (default)
//! - **`cli`** - Build the `flyby-cli` command-line tool
//!
//! ## Quick Start
//!
//! ```rust
//! use flybymatch::{FlybyConfig, Location, LocationKind, find_pairs_passing_within_radius};
//!
//! let reference = Location::new(LocationKind::Other("Island".into()), "Ref", 0.0, 0.0);
//! let locations = vec![
//!     Location::new(LocationKind::Waypoint, "WEST", 1.0, -2.0),
//!     Location::new(LocationKind::Waypoint, "EAST", -1.0, 2.0),
//! ];
//!
//! let config = FlybyConfig {
//!     amax_km: 500.0,
//!     bmax_km: 500.0,
//!     cmax_km: 500.0,
//!     dmax_km: 50.0,
//!     heading_deg: vec![-90.0, 90.0],
//!     workers: 1,
//! };
//!
//! let filters = config.build_filters(&reference).unwrap();
//! let result = find_pairs_passing_within_radius(&locations, filters).unwrap();
//! assert_eq!(result.matches.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{FlybyError, OptionExt, Result};

// Unit-sphere vectors and rotations
pub mod vector;
pub use vector::{Matrix3, Vector3};

// Unit conversions and the lat/lon to sphere mapping
pub mod geo_utils;

// Location records, label lookup and path length
pub mod locations;
pub use locations::{find_by_label, find_matching, path_length_km, Location, LocationKind};

// Spherical triangle sides and angles
pub mod triangle;
pub use triangle::SphericalTriangle;

// Nearest-approach filter
pub mod nearest;
pub use nearest::{Evaluation, FlybyFilter, NearestApproachFilter, Rejection};

// Pair-count balanced partitions of the pair space
pub mod partition;
pub use partition::{max_pairs, plan_partitions, PartitionRange};

// Partitioned search and result aggregation
pub mod search;
pub use search::{
    find_pairs_passing_within_radius, find_pairs_with_progress, AtomicProgressTracker,
    NoopProgress, ProgressReport, SearchProgressCallback, SearchResult, WorkerStats,
};

// CSV records for locations and results
pub mod records;

// Seeded random location sets for tests and benchmarks
pub mod synthetic;

use crate::geo_utils::rad_to_km;

// ============================================================================
// Core Types
// ============================================================================

/// A directed great-circle path between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreatCircleSegment {
    pub start: Location,
    pub end: Location,
    /// Angular length of the path in radians
    pub length: f64,
}

/// A path that passes the reference point within the configured bounds.
///
/// The start is always the southern endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlybyMatch {
    pub segment: GreatCircleSegment,
    /// Triangle angle at the end of the path, in radians
    pub angle_b: f64,
    /// Triangle angle at the start of the path, in radians
    pub angle_c: f64,
    /// Angular distance from the start to the reference point
    pub start_to_reference: f64,
    /// Angular distance from the end to the reference point
    pub end_to_reference: f64,
    /// Angular distance of the closest approach to the reference point
    pub nearest: f64,
    /// Heading at the closest approach, radians from north (-ve west, +ve east)
    pub heading: f64,
}

impl FlybyMatch {
    pub fn length_km(&self) -> f64 {
        rad_to_km(self.segment.length)
    }

    pub fn nearest_km(&self) -> f64 {
        rad_to_km(self.nearest)
    }

    pub fn angle_b_deg(&self) -> f64 {
        self.angle_b.to_degrees()
    }

    pub fn angle_c_deg(&self) -> f64 {
        self.angle_c.to_degrees()
    }

    pub fn heading_deg(&self) -> f64 {
        self.heading.to_degrees()
    }
}

/// Configuration for a flyby search.
///
/// Distances are surface kilometers, headings degrees from north. The filter
/// converts both to radians once, when it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlybyConfig {
    /// Maximum path length (side a).
    /// Default: 4000 km
    pub amax_km: f64,

    /// Maximum distance from the path start to the reference point (side b).
    /// Default: 2000 km
    pub bmax_km: f64,

    /// Maximum distance from the path end to the reference point (side c).
    /// Default: 2000 km
    pub cmax_km: f64,

    /// Maximum closest-approach distance.
    /// Default: 0.5 km
    pub dmax_km: f64,

    /// Inclusive heading window `[dir0, dir1]` at the closest approach.
    /// Must hold exactly two values. Default: [-45, 0]
    pub heading_deg: Vec<f64>,

    /// Number of filter instances, and so of partitions.
    /// Default: 4
    pub workers: usize,
}

impl Default for FlybyConfig {
    fn default() -> Self {
        Self {
            amax_km: 4000.0,
            bmax_km: 2000.0,
            cmax_km: 2000.0,
            dmax_km: 0.5,
            heading_deg: vec![-45.0, 0.0],
            workers: 4,
        }
    }
}

impl FlybyConfig {
    /// Build one independent filter per worker around `reference`.
    pub fn build_filters(&self, reference: &Location) -> Result<Vec<NearestApproachFilter>> {
        if self.workers == 0 {
            return Err(FlybyError::NoFilters);
        }
        let filter = NearestApproachFilter::new(reference.clone(), self)?;
        Ok(vec![filter; self.workers])
    }
}
