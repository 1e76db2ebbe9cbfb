//! Row-oriented CSV records.
//!
//! Locations use the native 13-column layout, without a header:
//!
//! ```text
//! type,country,state,region,icao,iata,faa,name,class,description,control,lat,lon
//! ```
//!
//! Result rows carry the sequence index, both endpoint labels, the path
//! length and nearest-approach distance in km, and the triangle angles and
//! heading in degrees.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{FlybyError, Result};
use crate::{FlybyMatch, Location, LocationKind};

/// Number of columns in a native location record.
pub const LOCATION_COLUMNS: usize = 13;

/// Formatted fields of one result row.
pub fn flyby_row(index: usize, flyby: &FlybyMatch) -> [String; 8] {
    [
        index.to_string(),
        flyby.segment.start.label(),
        flyby.segment.end.label(),
        format!("{:.1}", flyby.length_km()),
        format!("{:.3}", flyby.nearest_km()),
        format!("{:.1}", flyby.angle_b_deg()),
        format!("{:.1}", flyby.angle_c_deg()),
        format!("{:.1}", flyby.heading_deg()),
    ]
}

/// Write one row per match, indexed in slice order.
pub fn write_flybys<W: io::Write>(writer: W, flybys: &[FlybyMatch]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    for (index, flyby) in flybys.iter().enumerate() {
        wtr.write_record(flyby_row(index, flyby))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write result rows to `path`, replacing any previous contents. An empty
/// result still produces an empty file.
pub fn save_flybys(path: &Path, flybys: &[FlybyMatch]) -> Result<()> {
    let file = File::create(path)?;
    write_flybys(BufWriter::new(file), flybys)
}

/// Read native location records.
pub fn read_locations<R: io::Read>(reader: R) -> Result<Vec<Location>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut locations = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        locations.push(location_from_record(&record?, line + 1)?);
    }
    Ok(locations)
}

/// Write native location records. Commas and double quotes are stripped from
/// text fields so the rows stay readable by naive splitters.
pub fn write_locations<W: io::Write>(writer: W, locations: &[Location]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    for loc in locations {
        let code = |c: &Option<String>| fix_text(c.as_deref().unwrap_or(""));
        wtr.write_record([
            fix_text(loc.kind.as_str()),
            fix_text(&loc.country),
            fix_text(&loc.state),
            fix_text(&loc.region),
            code(&loc.icao),
            code(&loc.iata),
            code(&loc.faa),
            fix_text(&loc.name),
            fix_text(&loc.airport_class),
            fix_text(&loc.description),
            fix_text(&loc.control),
            format!("{:.6}", loc.latitude),
            format!("{:.6}", loc.longitude),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn fix_text(text: &str) -> String {
    text.replace(',', " ").replace('"', "")
}

fn location_from_record(record: &StringRecord, line: usize) -> Result<Location> {
    if record.len() != LOCATION_COLUMNS {
        return Err(FlybyError::InvalidRecord {
            line,
            reason: format!("{} columns, expected {}", record.len(), LOCATION_COLUMNS),
        });
    }
    let field = |i: usize| record.get(i).unwrap_or("").trim();
    let code = |i: usize| Some(field(i).to_string()).filter(|c| !c.is_empty());
    let coordinate = |i: usize, name: &str| -> Result<f64> {
        field(i).parse::<f64>().map_err(|e| FlybyError::InvalidRecord {
            line,
            reason: format!("{} {:?}: {}", name, field(i), e),
        })
    };

    Ok(Location {
        kind: LocationKind::from_tag(field(0)),
        country: field(1).to_string(),
        state: field(2).to_string(),
        region: field(3).to_string(),
        icao: code(4),
        iata: code(5),
        faa: code(6),
        name: field(7).to_string(),
        airport_class: field(8).to_string(),
        description: field(9).to_string(),
        control: field(10).to_string(),
        latitude: coordinate(11, "latitude")?,
        longitude: coordinate(12, "longitude")?,
    })
}
