//! Body Decoding Tests
//!
//! Tests for turning raw request bodies into typed inputs.

use bytes::Bytes;
use recordkv::api::read_json;
use recordkv::KvError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TermProbe {
    #[serde(default)]
    term: Option<i64>,
}

fn decode(raw: &'static str) -> Result<TermProbe, KvError> {
    read_json::<TermProbe>(Ok(Bytes::from_static(raw.as_bytes())))
}

fn decode_error(raw: &'static str) -> String {
    match decode(raw) {
        Err(KvError::Decode(message)) => message,
        other => panic!("Expected decode error, got {:?}", other),
    }
}

// =============================================================================
// Accepted Bodies
// =============================================================================

#[test]
fn test_decode_term() {
    assert_eq!(decode(r#"{"term": 4}"#).unwrap().term, Some(4));
}

#[test]
fn test_decode_negative_term() {
    assert_eq!(decode(r#"{"term": -9}"#).unwrap().term, Some(-9));
}

#[test]
fn test_decode_missing_term_is_none() {
    assert_eq!(decode("{}").unwrap().term, None);
}

#[test]
fn test_decode_allows_surrounding_whitespace() {
    assert_eq!(decode("  \n{\"term\": 1}\n  ").unwrap().term, Some(1));
}

// =============================================================================
// Rejected Bodies
// =============================================================================

#[test]
fn test_empty_body() {
    assert_eq!(decode_error(""), "body must not be empty");
    assert_eq!(decode_error("   \n"), "body must not be empty");
}

#[test]
fn test_syntax_error_reports_position() {
    let message = decode_error(r#"{"term": 1,}"#);
    assert!(
        message.starts_with("body contains badly-formed JSON (at line 1 column"),
        "{message}"
    );
}

#[test]
fn test_truncated_body() {
    assert_eq!(decode_error(r#"{"term": 1"#), "body contains badly-formed JSON");
}

#[test]
fn test_wrong_type() {
    let message = decode_error(r#"{"term": "five"}"#);
    assert!(
        message.starts_with("body contains incorrect JSON type"),
        "{message}"
    );
}

#[test]
fn test_wrong_top_level_type() {
    let message = decode_error("42");
    assert!(
        message.starts_with("body contains incorrect JSON type"),
        "{message}"
    );
}

#[test]
fn test_unknown_key() {
    assert_eq!(
        decode_error(r#"{"term": 1, "amount": 2}"#),
        "body contains unknown key \"amount\""
    );
}

#[test]
fn test_multiple_values() {
    assert_eq!(
        decode_error(r#"{"term": 1}{"term": 2}"#),
        "body must only contain a single JSON value"
    );
}
