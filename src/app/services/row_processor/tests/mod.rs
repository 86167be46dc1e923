//! Tests for the row processor module

pub mod stats_tests;

use crate::app::models::{HeaderLayout, RawRow};
use crate::app::services::row_processor::RowProcessor;
use crate::app::services::rule_set::RuleSet;
use crate::config::LocaleProfile;

/// Header used by most Samoa fixtures
pub const SAMOA_HEADER: &[&str] = &["USPCID", "USCLID", "Mobile_No", "email_add", "DOB"];

/// Header used by most Cook Islands fixtures
pub const COOK_HEADER: &[&str] = &["USPCID", "USCLID", "Mobile_No", "email_add", "AC_NO", "DOB"];

/// Rules requiring both identifiers, email and date of birth
pub fn create_test_rules() -> RuleSet {
    RuleSet::from_requirements([
        ("USPCID", true),
        ("USCLID", true),
        ("email_add", true),
        ("Mobile_no", false),
        ("DOB", true),
    ])
}

/// Build a header layout for a profile
pub fn create_layout(headers: &[&str], profile: &LocaleProfile) -> HeaderLayout {
    HeaderLayout::new(headers.iter().copied(), profile)
}

/// Build a raw row, panicking on a shape mismatch
pub fn create_row<'h>(layout: &'h HeaderLayout, values: &[&str]) -> RawRow<'h> {
    RawRow::new(layout, values.iter().map(|v| v.to_string()).collect())
        .expect("fixture row should match the header")
}

/// Processor for a profile with the standard test rules
pub fn create_processor(profile: LocaleProfile) -> RowProcessor {
    RowProcessor::new(create_test_rules(), profile)
}
