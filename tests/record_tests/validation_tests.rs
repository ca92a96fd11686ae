//! Validation Tests
//!
//! Tests for the field validator and record rules.

use recordkv::record::{validate_record, RecordInput, MAX_KEY_LEN};
use recordkv::validator::Validator;
use recordkv::Record;

// =============================================================================
// Validator Tests
// =============================================================================

#[test]
fn test_validator_starts_valid() {
    let v = Validator::new();
    assert!(v.valid());
    assert!(v.finish().is_ok());
}

#[test]
fn test_validator_check_records_failure() {
    let mut v = Validator::new();

    v.check(true, "a", "fine");
    v.check(false, "b", "broken");

    assert!(!v.valid());
    let errors = v.finish().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("b"), Some("broken"));
    assert!(!errors.contains("a"));
}

#[test]
fn test_validator_keeps_first_message_per_field() {
    let mut v = Validator::new();

    v.add_error("key", "first");
    v.add_error("key", "second");

    let errors = v.finish().unwrap_err();
    assert_eq!(errors.get("key"), Some("first"));
}

#[test]
fn test_validation_errors_serialize_as_flat_object() {
    let mut v = Validator::new();
    v.add_error("value", "must be provided");
    v.add_error("key", "must be provided");

    let errors = v.finish().unwrap_err();
    let json = serde_json::to_value(&errors).unwrap();

    assert_eq!(
        json,
        serde_json::json!({"key": "must be provided", "value": "must be provided"})
    );
    assert_eq!(errors.to_string(), "key: must be provided, value: must be provided");
}

#[test]
fn test_validator_into_errors() {
    assert!(Validator::new().into_errors().is_empty());

    let mut v = Validator::new();
    v.add_error("term", "must be provided");
    let errors = v.into_errors();

    assert_eq!(errors.get("term"), Some("must be provided"));
}

// =============================================================================
// Record Rule Tests
// =============================================================================

fn check(key: &str, value: Option<i64>) -> Validator {
    let mut v = Validator::new();
    validate_record(&mut v, key, value);
    v
}

#[test]
fn test_valid_record() {
    assert!(check("a", Some(5)).valid());
}

#[test]
fn test_zero_value_is_valid() {
    assert!(check("zero", Some(0)).valid());
}

#[test]
fn test_negative_value_is_valid() {
    assert!(check("neg", Some(-17)).valid());
}

#[test]
fn test_key_at_limit_is_valid() {
    let key = "k".repeat(MAX_KEY_LEN);
    assert_eq!(key.len(), 28);
    assert!(check(&key, Some(1)).valid());
}

#[test]
fn test_key_over_limit_is_rejected() {
    let key = "k".repeat(29);

    let errors = check(&key, Some(1)).finish().unwrap_err();

    assert_eq!(errors.get("key"), Some("must not be more than 28 bytes long"));
    assert!(!errors.contains("value"));
}

#[test]
fn test_key_length_counts_bytes() {
    // 10 chars, 30 bytes
    let key = "€".repeat(10);
    assert_eq!(key.len(), 30);

    let errors = check(&key, Some(1)).finish().unwrap_err();
    assert!(errors.contains("key"));
}

#[test]
fn test_empty_key_is_rejected() {
    let errors = check("", Some(1)).finish().unwrap_err();
    assert_eq!(errors.get("key"), Some("must be provided"));
}

#[test]
fn test_missing_value_is_rejected() {
    let errors = check("a", None).finish().unwrap_err();
    assert_eq!(errors.get("value"), Some("must be provided"));
    assert!(!errors.contains("key"));
}

#[test]
fn test_both_fields_reported() {
    let errors = check("", None).finish().unwrap_err();
    assert_eq!(errors.len(), 2);
}

// =============================================================================
// RecordInput Tests
// =============================================================================

#[test]
fn test_input_into_record() {
    let input: RecordInput = serde_json::from_str(r#"{"key": "a", "value": 0}"#).unwrap();

    assert_eq!(input.into_record().unwrap(), Record::new("a", 0));
}

#[test]
fn test_input_without_value() {
    let input: RecordInput = serde_json::from_str(r#"{"key": "a"}"#).unwrap();
    assert_eq!(input.value, None);

    let errors = input.into_record().unwrap_err();
    assert!(errors.contains("value"));
}

#[test]
fn test_input_with_null_value() {
    let input: RecordInput = serde_json::from_str(r#"{"key": "a", "value": null}"#).unwrap();

    let errors = input.into_record().unwrap_err();
    assert!(errors.contains("value"));
}

#[test]
fn test_input_rejects_unknown_fields() {
    let result = serde_json::from_str::<RecordInput>(r#"{"key": "a", "value": 1, "ttl": 5}"#);
    assert!(result.is_err());
}

#[test]
fn test_record_json_shape() {
    let json = serde_json::to_value(Record::new("a", 2)).unwrap();
    assert_eq!(json, serde_json::json!({"key": "a", "value": 2}));
}

#[test]
fn test_input_with_long_key_keeps_value() {
    let input = RecordInput {
        key: "k".repeat(29),
        value: Some(1),
    };

    let errors = input.into_record().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("key"), Some("must not be more than 28 bytes long"));
}

#[test]
fn test_input_missing_everything() {
    let errors = RecordInput::default().into_record().unwrap_err();

    assert_eq!(errors.get("key"), Some("must be provided"));
    assert_eq!(errors.get("value"), Some("must be provided"));
}
