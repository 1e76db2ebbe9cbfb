//! Tests for records module

use flybymatch::records::{
    flyby_row, read_locations, save_flybys, write_flybys, write_locations,
};
use flybymatch::{Evaluation, FlybyConfig, FlybyError, FlybyMatch, Location, LocationKind, NearestApproachFilter};

const SAMPLE: &str = "\
Airport,Maldives,,Huvadhu Atoll,VRMG,GAN,,Gan International,Major Airport,Paved runway,,-0.693342,73.155602
Waypoint,,,,,,,ELKAT,,,Male FIR,1.5,72.25
Island,Maldives,,Dhaalu Atoll,,,,Kudahuvadhoo,,,,2.670,72.894
";

fn sample_match() -> FlybyMatch {
    let reference = Location::new(LocationKind::Other("Island".into()), "REF", 0.0, 0.0);
    let config = FlybyConfig {
        amax_km: 500.0,
        bmax_km: 500.0,
        cmax_km: 500.0,
        dmax_km: 50.0,
        heading_deg: vec![-90.0, 90.0],
        workers: 1,
    };
    let filter = NearestApproachFilter::new(reference, &config).unwrap();
    let west = Location::new(LocationKind::Airport, "West Field", 1.0, -2.0).with_icao("WWWW");
    let east = Location::new(LocationKind::Airport, "East Field", -1.0, 2.0)
        .with_icao("EEEE")
        .with_iata("EEE");
    match filter.evaluate(&west, &east) {
        Evaluation::Accepted(flyby) => flyby,
        other => panic!("expected an accepted path, got {:?}", other),
    }
}

#[test]
fn test_read_native_locations() {
    let locations = read_locations(SAMPLE.as_bytes()).unwrap();
    assert_eq!(locations.len(), 3);

    let gan = &locations[0];
    assert_eq!(gan.kind, LocationKind::Airport);
    assert_eq!(gan.icao.as_deref(), Some("VRMG"));
    assert_eq!(gan.iata.as_deref(), Some("GAN"));
    assert_eq!(gan.faa, None);
    assert_eq!(gan.airport_class, "Major Airport");
    assert_eq!(gan.label(), "IATA:GAN");
    assert!((gan.latitude + 0.693342).abs() < 1e-9);

    assert_eq!(locations[1].kind, LocationKind::Waypoint);
    assert_eq!(locations[1].control, "Male FIR");
    assert_eq!(locations[1].label(), "Name:ELKAT");

    assert_eq!(locations[2].kind, LocationKind::Other("Island".to_string()));
    assert!(!locations[2].kind.is_navigational());
}

#[test]
fn test_wrong_column_count_is_error() {
    let result = read_locations("Waypoint,,,,,,,ELKAT,1.5,72.25\n".as_bytes());
    assert!(matches!(
        result,
        Err(FlybyError::InvalidRecord { line: 1, .. })
    ));
}

#[test]
fn test_bad_coordinate_reports_line() {
    let rows = format!("{}Waypoint,,,,,,,BAD,,,,north,72.25\n", SAMPLE);
    match read_locations(rows.as_bytes()) {
        Err(FlybyError::InvalidRecord { line, reason }) => {
            assert_eq!(line, 4);
            assert!(reason.contains("latitude"));
        }
        other => panic!("expected an invalid record, got {:?}", other),
    }
}

#[test]
fn test_locations_survive_write_and_read() {
    let locations = read_locations(SAMPLE.as_bytes()).unwrap();
    let mut out = Vec::new();
    write_locations(&mut out, &locations).unwrap();
    let reread = read_locations(out.as_slice()).unwrap();
    assert_eq!(reread, locations);
}

#[test]
fn test_written_text_has_no_commas_or_quotes() {
    let mut loc = Location::new(LocationKind::Airport, "Smith, \"Old\" Field", 5.0, 6.0);
    loc.description = "Grass, lit".to_string();
    let mut out = Vec::new();
    write_locations(&mut out, &[loc]).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains('"'));
    assert_eq!(text.trim_end().split(',').count(), 13);
    assert!(text.contains("Smith  Old Field"));
}

#[test]
fn test_flyby_row_formatting() {
    let row = flyby_row(7, &sample_match());
    assert_eq!(
        row,
        [
            "7".to_string(),
            "IATA:EEE".to_string(),
            "ICAO:WWWW".to_string(),
            "497.3".to_string(),
            "0.000".to_string(),
            "0.0".to_string(),
            "0.0".to_string(),
            "-63.4".to_string(),
        ]
    );
}

#[test]
fn test_write_flybys_indexes_rows() {
    let flyby = sample_match();
    let mut out = Vec::new();
    write_flybys(&mut out, &[flyby.clone(), flyby]).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "0,IATA:EEE,ICAO:WWWW,497.3,0.000,0.0,0.0,-63.4");
    assert!(lines[1].starts_with("1,"));
}

#[test]
fn test_save_flybys_replaces_previous_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.csv");

    save_flybys(&path, &[sample_match()]).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 1);

    // A later run without matches must not leave the old rows behind
    save_flybys(&path, &[]).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}
