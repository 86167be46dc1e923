//! Tests for the field rules
//!
//! Each rule is exercised directly with a fixed row context so audit
//! messages can be asserted verbatim.

pub mod account_tests;
pub mod email_tests;
pub mod identifier_tests;

use crate::app::models::{RowContext, Severity};
use crate::app::services::field_rules::FieldOutcome;
use crate::app::services::rule_set::RuleSet;

/// Row context with both identifiers present
pub fn test_context() -> RowContext {
    RowContext {
        row_number: 1,
        uspcid: "P100".to_string(),
        usclid: "C200".to_string(),
    }
}

/// Rule set requiring every governed field
pub fn all_required_rules() -> RuleSet {
    RuleSet::from_requirements([
        ("USPCID", true),
        ("USCLID", true),
        ("email_add", true),
        ("Mobile_no", false),
        ("DOB", true),
    ])
}

/// Rule set requiring nothing
pub fn no_required_rules() -> RuleSet {
    RuleSet::default()
}

/// Count the events of one severity in an outcome
pub fn count_events(outcome: &FieldOutcome, severity: Severity) -> usize {
    outcome
        .events
        .iter()
        .filter(|event| event.severity == Some(severity))
        .count()
}
