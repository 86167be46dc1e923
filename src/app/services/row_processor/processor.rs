//! Row processor implementation
//!
//! Applies the short-circuit policy and the ordered field rules to one row.
//! This is the only place field errors are accumulated.

use crate::app::models::{
    AuditEvent, FieldError, NormalizedRow, RawRow, RowContext, render_error_descriptors,
};
use crate::app::services::field_rules::FieldRule;
use crate::app::services::rule_set::RuleSet;
use crate::config::LocaleProfile;
use crate::constants::fields;
use tracing::trace;

/// Verdict for one input row
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedRow<'r> {
    /// Row values with normalizations applied
    pub row: NormalizedRow<'r>,
    /// Identifiers used in audit messages
    pub context: RowContext,
    /// Every field error found, in evaluation order
    pub errors: Vec<FieldError>,
    /// Audit events raised while processing the row
    pub events: Vec<AuditEvent>,
    /// Number of fields whose value was rewritten
    pub corrections: usize,
    /// Whether the row failed on the short-circuit field without further checks
    pub short_circuited: bool,
}

impl ProcessedRow<'_> {
    /// Whether the row belongs in the clean output
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Value of the error-description column
    pub fn error_description(&self) -> String {
        render_error_descriptors(&self.errors)
    }
}

/// Validates and normalizes rows against one rule set and locale profile
#[derive(Debug, Clone)]
pub struct RowProcessor {
    rules: RuleSet,
    profile: LocaleProfile,
    field_rules: Vec<FieldRule>,
}

impl RowProcessor {
    /// Create a processor; both inputs stay fixed for its lifetime
    pub fn new(rules: RuleSet, profile: LocaleProfile) -> Self {
        let field_rules = FieldRule::ordered_for(&profile);
        Self {
            rules,
            profile,
            field_rules,
        }
    }

    /// Rule set in use
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Locale profile in use
    pub fn profile(&self) -> &LocaleProfile {
        &self.profile
    }

    /// Process one row; `row_number` is 1-based and excludes the header
    pub fn process<'r>(&self, raw: &'r RawRow<'r>, row_number: usize) -> ProcessedRow<'r> {
        let context = RowContext::from_row(raw, row_number);

        if let Some(processed) = self.short_circuit(raw, &context) {
            return processed;
        }

        let mut row = NormalizedRow::new(raw);
        let mut errors = Vec::new();
        let mut events = Vec::new();
        let mut corrections = 0;

        for rule in &self.field_rules {
            let field = rule.field();
            let outcome = rule.apply(raw.trimmed(field), &self.rules, &self.profile, &context);

            if let Some(normalized) = outcome.normalized {
                row.set(field, normalized);
                corrections += 1;
            }
            if let Some(error) = outcome.error {
                trace!("Row {} field {} failed: {}", row_number, field, error);
                errors.push(error);
            }
            events.extend(outcome.events);
        }

        if !errors.is_empty() {
            events.push(AuditEvent::error(format!(
                "Row {} with {} moved to error file: {}.",
                row_number,
                context.subject(),
                render_error_descriptors(&errors)
            )));
        }

        ProcessedRow {
            row,
            context,
            errors,
            events,
            corrections,
            short_circuited: false,
        }
    }

    /// Fail the row on a missing unique-key field, if the profile has one
    fn short_circuit<'r>(
        &self,
        raw: &'r RawRow<'r>,
        context: &RowContext,
    ) -> Option<ProcessedRow<'r>> {
        let field = self.profile.short_circuit_field.as_deref()?;
        if !self.rules.is_required(field) || !raw.trimmed(field).is_empty() {
            return None;
        }

        let error = missing_field_error(field);
        let event = AuditEvent::error(format!(
            "Row {} with USPCID '{}' moved to error file due to {}.",
            context.row_number, context.uspcid, error
        ));

        Some(ProcessedRow {
            row: NormalizedRow::new(raw),
            context: context.clone(),
            errors: vec![error],
            events: vec![event],
            corrections: 0,
            short_circuited: true,
        })
    }
}

/// Error reported when a required field is empty
fn missing_field_error(field: &str) -> FieldError {
    match field {
        fields::EMAIL => FieldError::MissingEmail,
        fields::ACCOUNT => FieldError::MissingAccount,
        fields::DATE_OF_BIRTH => FieldError::MissingDateOfBirth,
        other => FieldError::MissingIdentifier {
            field: other.to_string(),
        },
    }
}
