//! Business identifier checks

use super::FieldOutcome;
use crate::app::models::FieldError;
use crate::app::services::rule_set::RuleSet;

/// Check an identifier column
///
/// Required iff the rule set says so. A present value must be alphanumeric.
pub fn check_identifier(field: &str, value: &str, rules: &RuleSet) -> FieldOutcome {
    if value.is_empty() {
        if rules.is_required(field) {
            return FieldOutcome::fail(FieldError::MissingIdentifier {
                field: field.to_string(),
            });
        }
        return FieldOutcome::pass();
    }

    if !value.chars().all(char::is_alphanumeric) {
        return FieldOutcome::fail(FieldError::IdentifierSpecialCharacters {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    FieldOutcome::pass()
}
