//! Location records and lookups over location sets.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FlybyError, OptionExt, Result};
use crate::geo_utils::{great_circle_distance_km, lat_lon_to_vector};
use crate::vector::Vector3;

/// What kind of place a location is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    Airport,
    Waypoint,
    Other(String),
}

impl LocationKind {
    pub fn as_str(&self) -> &str {
        match self {
            LocationKind::Airport => "Airport",
            LocationKind::Waypoint => "Waypoint",
            LocationKind::Other(tag) => tag,
        }
    }

    /// Parse the type column of a location record.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Airport" => LocationKind::Airport,
            "Waypoint" => LocationKind::Waypoint,
            other => LocationKind::Other(other.to_string()),
        }
    }

    /// Airports and waypoints take part in flyby searches.
    pub fn is_navigational(&self) -> bool {
        matches!(self, LocationKind::Airport | LocationKind::Waypoint)
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named point on the Earth's surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub kind: LocationKind,
    /// Latitude in degrees, north positive
    pub latitude: f64,
    /// Longitude in degrees, east positive
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faa: Option<String>,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub region: String,
    /// Airport class, e.g. "Major Airport"
    #[serde(default)]
    pub airport_class: String,
    /// Airport description, e.g. runway or usage notes
    #[serde(default)]
    pub description: String,
    /// Controlling authority of a waypoint
    #[serde(default)]
    pub control: String,
}

impl Location {
    /// Create a location with only a kind, a name and coordinates.
    pub fn new(kind: LocationKind, name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            kind,
            latitude,
            longitude,
            icao: None,
            iata: None,
            faa: None,
            name: name.to_string(),
            country: String::new(),
            state: String::new(),
            region: String::new(),
            airport_class: String::new(),
            description: String::new(),
            control: String::new(),
        }
    }

    pub fn with_icao(mut self, code: &str) -> Self {
        self.icao = Some(code.to_string());
        self
    }

    pub fn with_iata(mut self, code: &str) -> Self {
        self.iata = Some(code.to_string());
        self
    }

    pub fn with_faa(mut self, code: &str) -> Self {
        self.faa = Some(code.to_string());
        self
    }

    /// Check if the location has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Compact identifier: IATA code, else ICAO code, else name.
    pub fn label(&self) -> String {
        if let Some(code) = non_empty(&self.iata) {
            format!("IATA:{}", code)
        } else if let Some(code) = non_empty(&self.icao) {
            format!("ICAO:{}", code)
        } else {
            format!("Name:{}", self.name)
        }
    }

    /// Position on the unit sphere.
    pub fn to_vector(&self) -> Vector3 {
        lat_lon_to_vector(self.latitude, self.longitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.6} {:.6}",
            self.kind,
            self.label(),
            self.latitude,
            self.longitude
        )
    }
}

fn non_empty(code: &Option<String>) -> Option<&str> {
    code.as_deref().filter(|c| !c.is_empty())
}

/// Field a location label refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelField {
    Name,
    Icao,
    Iata,
    Faa,
}

impl LabelField {
    fn value<'a>(&self, loc: &'a Location) -> Option<&'a str> {
        match self {
            LabelField::Name => Some(loc.name.as_str()),
            LabelField::Icao => loc.icao.as_deref(),
            LabelField::Iata => loc.iata.as_deref(),
            LabelField::Faa => loc.faa.as_deref(),
        }
    }
}

fn parse_label(label: &str) -> Result<(LabelField, &str)> {
    let (field, value) = label.split_once(':').ok_or_else(|| FlybyError::InvalidLabel {
        label: label.to_string(),
        reason: "expected FIELD:value",
    })?;
    if value.contains(':') {
        return Err(FlybyError::InvalidLabel {
            label: label.to_string(),
            reason: "too many ':' characters",
        });
    }
    let field = match field.to_ascii_uppercase().as_str() {
        "NAME" => LabelField::Name,
        "ICAO" => LabelField::Icao,
        "IATA" => LabelField::Iata,
        "FAA" => LabelField::Faa,
        _ => {
            return Err(FlybyError::InvalidLabel {
                label: label.to_string(),
                reason: "field must be one of NAME, ICAO, IATA, FAA",
            })
        }
    };
    Ok((field, value))
}

/// Find the first location matching a label such as `"ICAO:VRMG"` or
/// `"Name:Kudahuvadhoo"`, returning its index too.
///
/// The field part is case-insensitive, the value must match exactly.
pub fn find_by_label<'a>(locations: &'a [Location], label: &str) -> Result<Option<(usize, &'a Location)>> {
    let (field, value) = parse_label(label)?;
    Ok(locations
        .iter()
        .enumerate()
        .find(|(_, loc)| field.value(loc) == Some(value)))
}

/// Like [`find_by_label`] but a missing location is an error.
pub fn require_label<'a>(locations: &'a [Location], label: &str) -> Result<&'a Location> {
    find_by_label(locations, label)?
        .map(|(_, loc)| loc)
        .ok_or_location_not_found(label)
}

/// Locations whose name or any code matches `pattern`.
///
/// Use `\b` to anchor whole words, otherwise `"GAN"` also finds `"GANDO"`.
pub fn find_matching<'a>(locations: &'a [Location], pattern: &Regex) -> Vec<&'a Location> {
    locations
        .iter()
        .filter(|loc| {
            pattern.is_match(&loc.name)
                || [&loc.icao, &loc.iata, &loc.faa]
                    .into_iter()
                    .filter_map(|code| code.as_deref())
                    .any(|code| pattern.is_match(code))
        })
        .collect()
}

/// Keep only airports and waypoints.
pub fn navigational(locations: Vec<Location>) -> Vec<Location> {
    locations
        .into_iter()
        .filter(|loc| loc.kind.is_navigational())
        .collect()
}

/// Total great-circle length in km of the path visiting `locations` in order.
pub fn path_length_km(locations: &[Location]) -> f64 {
    locations
        .windows(2)
        .map(|leg| great_circle_distance_km(&leg[0], &leg[1]))
        .sum()
}

/// Resolve each label and return the locations in label order.
pub fn resolve_labels(locations: &[Location], labels: &[String]) -> Result<Vec<Location>> {
    labels
        .iter()
        .map(|label| require_label(locations, label).cloned())
        .collect()
}
