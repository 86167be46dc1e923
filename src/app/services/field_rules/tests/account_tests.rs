//! Tests for account number padding

use super::*;
use crate::app::models::FieldError;
use crate::app::services::field_rules::{check_account, pad_account};
use crate::config::LocaleProfile;

#[test]
fn test_pad_account_to_width() {
    assert_eq!(pad_account("12345", 10), "0000012345");
    assert_eq!(pad_account("1", 3), "001");
    assert_eq!(pad_account("1234567890", 10), "1234567890");
}

#[test]
fn test_pad_account_is_idempotent() {
    for value in ["", "7", "12345", "0000012345", "999999999"] {
        let once = pad_account(value, 10);
        assert_eq!(once.len(), 10);
        assert_eq!(pad_account(&once, 10), once);
    }
}

#[test]
fn test_short_account_is_padded_and_logged() {
    let outcome = check_account("12345", &LocaleProfile::cook_islands(), &test_context());
    assert!(outcome.is_valid());
    assert_eq!(outcome.normalized.as_deref(), Some("0000012345"));
    assert_eq!(count_events(&outcome, Severity::Info), 1);
    assert_eq!(
        outcome.events[0].render(),
        "INFO: USPCID 'P100', USCLID 'C200' Acc_no changed from '12345' to '0000012345'."
    );
}

#[test]
fn test_full_width_account_is_untouched() {
    let outcome = check_account("1234567890", &LocaleProfile::cook_islands(), &test_context());
    assert!(outcome.is_valid());
    assert!(outcome.normalized.is_none());
    assert!(outcome.events.is_empty());
}

#[test]
fn test_account_failures() {
    let cook = LocaleProfile::cook_islands();

    let missing = check_account("", &cook, &test_context());
    assert_eq!(missing.error, Some(FieldError::MissingAccount));
    assert_eq!(missing.error.unwrap().to_string(), "invalid account");

    let format = check_account("12-45", &cook, &test_context());
    assert_eq!(
        format.error.unwrap().to_string(),
        "invalid account number format"
    );

    let length = check_account("12345678901", &cook, &test_context());
    assert_eq!(
        length.error.unwrap().to_string(),
        "invalid account number length"
    );
}
