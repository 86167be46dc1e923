//! Account number checks and fixed-width padding

use super::FieldOutcome;
use crate::app::models::{AuditEvent, FieldError, RowContext};
use crate::config::LocaleProfile;

/// Left-pad an all-digit account number with zeros to `width`
///
/// Values already at or beyond the width are returned unchanged.
pub fn pad_account(value: &str, width: usize) -> String {
    format!("{:0>width$}", value, width = width)
}

/// Check and pad the account number column
pub fn check_account(value: &str, profile: &LocaleProfile, ctx: &RowContext) -> FieldOutcome {
    if value.is_empty() {
        return FieldOutcome::fail(FieldError::MissingAccount);
    }

    if !value.chars().all(|c| c.is_ascii_digit()) {
        return FieldOutcome::fail(FieldError::InvalidAccountFormat {
            value: value.to_string(),
        });
    }

    if value.len() > profile.account_width {
        return FieldOutcome::fail(FieldError::InvalidAccountLength {
            value: value.to_string(),
        });
    }

    let padded = pad_account(value, profile.account_width);
    if padded == value {
        return FieldOutcome::pass();
    }

    FieldOutcome::pass()
        .with_event(AuditEvent::info(format!(
            "{} Acc_no changed from '{}' to '{}'.",
            ctx.subject(),
            value,
            padded
        )))
        .with_normalized(padded)
}
