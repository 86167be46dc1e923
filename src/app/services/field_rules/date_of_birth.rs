//! Date of birth parsing and canonicalization

use super::FieldOutcome;
use crate::app::models::{AuditEvent, FieldError, RowContext};
use crate::app::services::rule_set::RuleSet;
use crate::config::LocaleProfile;
use crate::constants::{ALTERNATE_DATE_SEPARATORS, CANONICAL_DATE_FORMAT, fields};
use chrono::{Datelike, NaiveDate};

/// Parse with one format; four-digit years only, so the output round-trips
fn parse_with(value: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, format)
        .ok()
        .filter(|date| (1000..=9999).contains(&date.year()))
}

/// Try the canonical layout, then each fallback layout
fn parse_any(value: &str, fallback_formats: &[String]) -> Option<NaiveDate> {
    std::iter::once(CANONICAL_DATE_FORMAT)
        .chain(fallback_formats.iter().map(String::as_str))
        .find_map(|format| parse_with(value, format))
}

/// Rewrite a date into the canonical `dd/mm/yyyy` layout
///
/// Returns `None` when neither the value nor its separator-corrected form
/// parses with any accepted layout.
pub fn canonicalize_date(value: &str, fallback_formats: &[String]) -> Option<String> {
    let date = parse_any(value, fallback_formats).or_else(|| {
        if !value.contains(ALTERNATE_DATE_SEPARATORS) {
            return None;
        }
        let corrected = value.replace(ALTERNATE_DATE_SEPARATORS, "/");
        parse_any(&corrected, fallback_formats)
    })?;

    Some(date.format(CANONICAL_DATE_FORMAT).to_string())
}

/// Check and canonicalize the date of birth column
pub fn check_date_of_birth(
    value: &str,
    rules: &RuleSet,
    profile: &LocaleProfile,
    ctx: &RowContext,
) -> FieldOutcome {
    if value.is_empty() {
        if rules.is_required(fields::DATE_OF_BIRTH) {
            return FieldOutcome::fail(FieldError::MissingDateOfBirth);
        }
        return FieldOutcome::pass();
    }

    match canonicalize_date(value, &profile.dob_fallback_formats) {
        Some(canonical) if canonical == value => FieldOutcome::pass(),
        Some(canonical) => FieldOutcome::pass()
            .with_event(AuditEvent::info(format!(
                "{} DOB changed from '{}' to '{}'.",
                ctx.subject(),
                value,
                canonical
            )))
            .with_normalized(canonical),
        None => FieldOutcome::fail(FieldError::InvalidDateOfBirth {
            original: value.to_string(),
        }),
    }
}
