//! Tests for error module

use flybymatch::error::{FlybyError, OptionExt};

#[test]
fn test_error_display() {
    let err = FlybyError::InvalidHeadingWindow { bounds: 3 };
    assert!(err.to_string().contains("3 given"));

    let err = FlybyError::InvalidCoordinate {
        index: 12,
        latitude: 95.0,
        longitude: 0.0,
    };
    assert!(err.to_string().contains("location 12"));
}

#[test]
fn test_config_error_wraps_json() {
    let parse: Result<flybymatch::FlybyConfig, _> = serde_json::from_str("{\"workers\": \"many\"}");
    let err: FlybyError = parse.unwrap_err().into();
    assert!(err.to_string().starts_with("invalid configuration"));
}

#[test]
fn test_option_ext() {
    let none: Option<i32> = None;
    let result = none.ok_or_location_not_found("ICAO:ZZZZ");
    assert!(matches!(
        result,
        Err(FlybyError::LocationNotFound { label }) if label == "ICAO:ZZZZ"
    ));
    assert_eq!(Some(4).ok_or_location_not_found("x").unwrap(), 4);
}
