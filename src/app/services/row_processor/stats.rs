//! Validation statistics for a job
//!
//! Counters are updated as rows are routed and skipped, so the totals always
//! satisfy `total = clean + error + skipped`.

use super::processor::ProcessedRow;
use crate::app::models::Severity;
use serde::Serialize;
use std::collections::BTreeMap;

/// Statistics for one validation job
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationStats {
    /// Data rows read from the input (header excluded)
    pub total_rows: usize,
    /// Rows written to the clean output
    pub clean_rows: usize,
    /// Rows written to the error output
    pub error_rows: usize,
    /// Rows skipped for a column-count mismatch
    pub skipped_rows: usize,
    /// Error rows that failed on the short-circuit field alone
    pub short_circuited_rows: usize,
    /// Field values rewritten by normalization
    pub corrections: usize,
    /// WARNING events raised
    pub warnings: usize,
    /// Failures per field across all error rows
    pub field_error_counts: BTreeMap<String, usize>,
}

impl ValidationStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a processed row by its routing verdict
    pub fn record_processed(&mut self, processed: &ProcessedRow<'_>) {
        self.total_rows += 1;
        self.corrections += processed.corrections;
        self.warnings += processed
            .events
            .iter()
            .filter(|event| event.severity == Some(Severity::Warning))
            .count();

        if processed.is_clean() {
            self.clean_rows += 1;
            return;
        }

        self.error_rows += 1;
        if processed.short_circuited {
            self.short_circuited_rows += 1;
        }
        for error in &processed.errors {
            *self
                .field_error_counts
                .entry(error.field().to_string())
                .or_insert(0) += 1;
        }
    }

    /// Count a row skipped for a column-count mismatch
    pub fn record_skipped(&mut self) {
        self.total_rows += 1;
        self.skipped_rows += 1;
    }

    /// Percentage of rows that reached the clean output
    pub fn clean_rate(&self) -> f64 {
        if self.total_rows == 0 {
            100.0
        } else {
            self.clean_rows as f64 * 100.0 / self.total_rows as f64
        }
    }

    /// Percentage of rows routed to the error output
    pub fn error_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            self.error_rows as f64 * 100.0 / self.total_rows as f64
        }
    }

    /// Whether every row is accounted for exactly once
    pub fn is_balanced(&self) -> bool {
        self.total_rows == self.clean_rows + self.error_rows + self.skipped_rows
    }

    /// Field with the most failures, if any row failed
    pub fn most_common_failure(&self) -> Option<(&str, usize)> {
        self.field_error_counts
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(field, count)| (field.as_str(), *count))
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} rows: {} clean, {} error, {} skipped ({:.1}% clean), {} corrections, {} warnings",
            self.total_rows,
            self.clean_rows,
            self.error_rows,
            self.skipped_rows,
            self.clean_rate(),
            self.corrections,
            self.warnings
        )
    }
}
