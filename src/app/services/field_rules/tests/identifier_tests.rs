//! Tests for identifier checks

use super::*;
use crate::app::models::FieldError;
use crate::app::services::field_rules::check_identifier;

#[test]
fn test_alphanumeric_identifier_passes() {
    let outcome = check_identifier("USPCID", "AB12cd", &all_required_rules());
    assert!(outcome.is_valid());
    assert!(outcome.normalized.is_none());
    assert!(outcome.events.is_empty());
}

#[test]
fn test_missing_required_identifier() {
    let outcome = check_identifier("USCLID", "", &all_required_rules());
    assert_eq!(
        outcome.error,
        Some(FieldError::MissingIdentifier {
            field: "USCLID".to_string()
        })
    );
    assert_eq!(outcome.error.unwrap().to_string(), "missing USCLID");
}

#[test]
fn test_missing_optional_identifier_passes() {
    let outcome = check_identifier("USCLID", "", &no_required_rules());
    assert!(outcome.is_valid());
}

#[test]
fn test_special_characters_rejected() {
    for value in ["AB-12", "A B", "X_1", "1.0"] {
        let outcome = check_identifier("USPCID", value, &no_required_rules());
        let error = outcome.error.expect("special characters should fail");
        assert_eq!(error.to_string(), "USPCID contains special characters");
        assert_eq!(error.field(), "USPCID");
    }
}

#[test]
fn test_each_identifier_uses_its_own_rule() {
    let rules = RuleSet::from_requirements([("USPCID", true), ("USCLID", false)]);
    assert!(!check_identifier("USPCID", "", &rules).is_valid());
    assert!(check_identifier("USCLID", "", &rules).is_valid());
}
