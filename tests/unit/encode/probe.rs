use super::*;

#[test]
fn parses_format_duration() {
    let json = br#"{"format": {"filename": "a.mp4", "duration": "32.000000"}}"#;
    assert_eq!(parse_format_duration(json).unwrap(), 32.0);
}

#[test]
fn missing_duration_is_an_error() {
    assert!(parse_format_duration(br#"{"format": {}}"#).is_err());
    assert!(parse_format_duration(br#"{"format": {"duration": "N/A"}}"#).is_err());
    assert!(matches!(
        parse_format_duration(b"not json"),
        Err(ReelError::Serde(_))
    ));
}
