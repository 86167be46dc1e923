//! Tests for email checks

use super::*;
use crate::app::models::FieldError;
use crate::app::services::field_rules::{check_email, is_valid_email};

#[test]
fn test_email_pattern_accepts_common_addresses() {
    assert!(is_valid_email("a.b_c@sub.example.com"));
    assert!(is_valid_email("user+tag@example.ws"));
    assert!(is_valid_email("first-last@my-domain.co.nz"));
}

#[test]
fn test_email_pattern_rejects_malformed_addresses() {
    assert!(!is_valid_email("no-at-sign.example.com"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("two@@example.com"));
    assert!(!is_valid_email("space in@example.com"));
    assert!(!is_valid_email(""));
}

#[test]
fn test_invalid_email_descriptor() {
    let outcome = check_email("a@b", &all_required_rules());
    assert_eq!(
        outcome.error,
        Some(FieldError::InvalidEmail {
            value: "a@b".to_string()
        })
    );
    assert_eq!(outcome.error.unwrap().to_string(), "invalid email address");
}

#[test]
fn test_missing_email_respects_rule() {
    let outcome = check_email("", &all_required_rules());
    assert_eq!(outcome.error, Some(FieldError::MissingEmail));

    let outcome = check_email("", &no_required_rules());
    assert!(outcome.is_valid());
}
