//! Email address checks

use super::FieldOutcome;
use crate::app::models::FieldError;
use crate::app::services::rule_set::RuleSet;
use crate::constants::fields;
use regex::Regex;
use std::sync::LazyLock;

/// Local part, `@`, a domain label, a literal dot, then the rest of the domain
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$")
        .expect("email pattern is a valid regex")
});

/// Whether a value looks like an email address
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Check the email column
///
/// Presence is only enforced here on profiles that do not short-circuit on
/// email; the row processor handles the short-circuit case before any rule runs.
pub fn check_email(value: &str, rules: &RuleSet) -> FieldOutcome {
    if value.is_empty() {
        if rules.is_required(fields::EMAIL) {
            return FieldOutcome::fail(FieldError::MissingEmail);
        }
        return FieldOutcome::pass();
    }

    if !is_valid_email(value) {
        return FieldOutcome::fail(FieldError::InvalidEmail {
            value: value.to_string(),
        });
    }

    FieldOutcome::pass()
}
