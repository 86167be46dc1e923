//! Field rules for customer record validation
//!
//! Each governed column has one validator/normalizer. A rule is a pure
//! function of the trimmed raw value, the job's rule set and locale profile,
//! and the row context; it never aborts the row. It reports back:
//! - an optional normalized value to write into the row
//! - an optional [`FieldError`] deciding routing
//! - the audit events describing corrections and anomalies
//!
//! ## Architecture
//!
//! - [`identifier`] - Business identifier presence and character checks
//! - [`email`] - Email presence and address pattern
//! - [`phone`] - Country-code stripping, length and range classification
//! - [`account`] - Account number checks and zero padding
//! - [`date_of_birth`] - Canonical and fallback date parsing

pub mod account;
pub mod date_of_birth;
pub mod email;
pub mod identifier;
pub mod phone;

#[cfg(test)]
pub mod tests;

use crate::app::models::{AuditEvent, FieldError, RowContext};
use crate::app::services::rule_set::RuleSet;
use crate::config::LocaleProfile;
use crate::constants::fields;

// Re-export the individual rules
pub use account::{check_account, pad_account};
pub use date_of_birth::{canonicalize_date, check_date_of_birth};
pub use email::{check_email, is_valid_email};
pub use identifier::check_identifier;
pub use phone::{check_mobile, strip_country_code};

/// Verdict of one field rule on one value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOutcome {
    /// Value to persist into the normalized row, when normalization changed it
    pub normalized: Option<String>,
    /// Validation failure, if any
    pub error: Option<FieldError>,
    /// Audit events raised while checking the value
    pub events: Vec<AuditEvent>,
}

impl FieldOutcome {
    /// Outcome with nothing to report
    pub fn pass() -> Self {
        Self::default()
    }

    /// Outcome failing with a single error
    pub fn fail(error: FieldError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Attach a normalized value
    pub fn with_normalized(mut self, value: impl Into<String>) -> Self {
        self.normalized = Some(value.into());
        self
    }

    /// Attach an error
    pub fn with_error(mut self, error: FieldError) -> Self {
        self.error = Some(error);
        self
    }

    /// Attach an audit event
    pub fn with_event(mut self, event: AuditEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Whether the value passed validation
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// One governed column and the rule that checks it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Business identifier column
    Identifier(&'static str),
    /// Email address column
    Email,
    /// Mobile number column
    Mobile,
    /// Account number column
    Account,
    /// Date of birth column
    DateOfBirth,
}

impl FieldRule {
    /// Rules in evaluation order for a profile
    ///
    /// The account rule only runs on profiles that govern the account column.
    pub fn ordered_for(profile: &LocaleProfile) -> Vec<FieldRule> {
        let mut rules = vec![
            FieldRule::Identifier(fields::USPCID),
            FieldRule::Identifier(fields::USCLID),
            FieldRule::Email,
            FieldRule::Mobile,
        ];
        if profile.account_field_enabled {
            rules.push(FieldRule::Account);
        }
        rules.push(FieldRule::DateOfBirth);
        rules
    }

    /// Canonical column this rule governs
    pub fn field(&self) -> &'static str {
        match self {
            FieldRule::Identifier(field) => *field,
            FieldRule::Email => fields::EMAIL,
            FieldRule::Mobile => fields::MOBILE,
            FieldRule::Account => fields::ACCOUNT,
            FieldRule::DateOfBirth => fields::DATE_OF_BIRTH,
        }
    }

    /// Apply the rule to a trimmed value
    pub fn apply(
        &self,
        value: &str,
        rules: &RuleSet,
        profile: &LocaleProfile,
        ctx: &RowContext,
    ) -> FieldOutcome {
        match self {
            FieldRule::Identifier(field) => check_identifier(field, value, rules),
            FieldRule::Email => check_email(value, rules),
            FieldRule::Mobile => check_mobile(value, profile, ctx),
            FieldRule::Account => check_account(value, profile, ctx),
            FieldRule::DateOfBirth => check_date_of_birth(value, rules, profile, ctx),
        }
    }
}
