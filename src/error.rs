//! Unified error handling for flyby searches.
//!
//! Configuration problems are reported before any worker starts. Numerical
//! trouble inside a single pair evaluation never surfaces here: the predicate
//! turns it into a local rejection of that pair.

use thiserror::Error;

/// Errors produced by the flyby library.
#[derive(Debug, Error)]
pub enum FlybyError {
    /// The heading window must be given as exactly two bounds.
    #[error("heading window must have two bounds, but {bounds} given")]
    InvalidHeadingWindow { bounds: usize },

    /// The heading window is empty.
    #[error("heading window lower bound {dir0} exceeds upper bound {dir1}")]
    InvertedHeadingWindow { dir0: f64, dir1: f64 },

    /// A distance bound is negative or not finite.
    #[error("{name} must be a finite, non-negative distance, got {value}")]
    InvalidBound { name: &'static str, value: f64 },

    /// No filter instances were supplied, so there is nobody to do the work.
    #[error("at least one filter is required to run a search")]
    NoFilters,

    /// An outer-index range whose lower bound exceeds its upper bound.
    #[error("partition upper bound {j2} must not be below lower bound {j1}")]
    InvalidPartition { j1: usize, j2: usize },

    /// An input location outside the latitude/longitude domain.
    #[error("location {index} has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinate {
        index: usize,
        latitude: f64,
        longitude: f64,
    },

    /// Two triangle vertices coincide or are antipodal.
    #[error("degenerate spherical triangle: side {side} has no usable sine")]
    DegenerateTriangle { side: &'static str },

    /// A location label that is not of the form `FIELD:value`.
    #[error("invalid location label {label:?}: {reason}")]
    InvalidLabel { label: String, reason: &'static str },

    /// A well-formed label that matches no location.
    #[error("no location found for label {label:?}")]
    LocationNotFound { label: String },

    /// A location row that cannot be turned into a location.
    #[error("invalid location record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// Result type alias for flyby operations.
pub type Result<T> = std::result::Result<T, FlybyError>;

/// Extension trait for converting lookups into flyby errors.
pub trait OptionExt<T> {
    /// Convert `None` into [`FlybyError::LocationNotFound`].
    fn ok_or_location_not_found(self, label: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_location_not_found(self, label: &str) -> Result<T> {
        self.ok_or_else(|| FlybyError::LocationNotFound {
            label: label.to_string(),
        })
    }
}
