//! Mobile number normalization and classification

use super::FieldOutcome;
use crate::app::models::{AuditEvent, FieldError, RowContext};
use crate::config::LocaleProfile;
use crate::constants::MOBILE_ZERO_PLACEHOLDER;

/// Strip country-code prefixes from the front of a mobile number
///
/// Prefixes are removed whenever they lead the value, whatever is left
/// behind. Stripping repeats until no prefix leads, so a second pass never
/// changes the result.
pub fn strip_country_code<'a>(value: &'a str, profile: &LocaleProfile) -> &'a str {
    let mut current = value.trim();
    while let Some(rest) = profile
        .country_code_prefixes
        .iter()
        .find_map(|prefix| current.strip_prefix(prefix.as_str()))
    {
        current = rest.trim();
    }
    current
}

/// Check and normalize the mobile number column
pub fn check_mobile(value: &str, profile: &LocaleProfile, ctx: &RowContext) -> FieldOutcome {
    let subject = ctx.subject();

    if value.is_empty() {
        return FieldOutcome::pass()
            .with_event(AuditEvent::info(format!("{} has no mobile number.", subject)));
    }

    let stripped = strip_country_code(value, profile);
    let mut outcome = FieldOutcome::pass();
    if stripped != value {
        outcome = outcome
            .with_normalized(stripped)
            .with_event(AuditEvent::info(format!(
                "{} Mobile_no changed from '{}' to '{}'.",
                subject, value, stripped
            )));
    }

    if profile.zero_placeholder_allowed && stripped == MOBILE_ZERO_PLACEHOLDER {
        return outcome.with_event(AuditEvent::warning(format!(
            "{} has a mobile number of '{}'.",
            subject, MOBILE_ZERO_PLACEHOLDER
        )));
    }

    let well_formed =
        stripped.len() == profile.mobile_length && stripped.chars().all(|c| c.is_ascii_digit());
    if !well_formed {
        return outcome.with_error(FieldError::InvalidMobileFormat {
            original: value.to_string(),
        });
    }

    // Range classification only ever warns
    if let Some(lead) = stripped.chars().next() {
        if profile.non_mobile_leading_digits.contains(&lead) {
            outcome = outcome.with_event(AuditEvent::warning(format!(
                "{} number '{}' is not a mobile number.",
                subject, stripped
            )));
        } else if !profile.mobile_leading_digits.contains(&lead) {
            outcome = outcome.with_event(AuditEvent::warning(format!(
                "{} has a mobile number '{}' outside expected ranges.",
                subject, stripped
            )));
        }
    }

    outcome
}
