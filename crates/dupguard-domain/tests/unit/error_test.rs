//! Error type tests

use std::error::Error as _;

use dupguard_domain::Error;

#[test]
fn test_display_messages() {
    assert_eq!(
        Error::config("bad threshold").to_string(),
        "Configuration error: bad threshold"
    );
    assert_eq!(
        Error::parse("pkg/a.py", "Syntax error").to_string(),
        "Parse error in pkg/a.py: Syntax error"
    );
    assert_eq!(
        Error::invalid_argument("empty name").to_string(),
        "Invalid argument: empty name"
    );
}

#[test]
fn test_sources_are_kept() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err = Error::io_with_source("Failed to read a.py", io);
    assert!(err.source().is_some());

    assert!(Error::io("no source").source().is_none());
}

#[test]
fn test_from_conversions() {
    let io: Error = std::io::Error::other("boom").into();
    assert!(matches!(io, Error::IoSimple { .. }));

    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let json: Error = json_err.into();
    assert!(matches!(json, Error::Json { .. }));
}

#[test]
fn test_only_configuration_errors_abort() {
    assert!(Error::config("x").is_configuration());
    assert!(!Error::parse("a.py", "x").is_configuration());
    assert!(!Error::io("x").is_configuration());
}
