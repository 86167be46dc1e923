//! Row processing for customer records
//!
//! This module turns one raw input row into a verdict: the normalized row,
//! every field error found, and the audit events raised along the way.
//!
//! # Architecture
//!
//! - [`processor`] - RowProcessor and the per-row evaluation order
//! - [`stats`] - Job-level counters built from processed rows
//!
//! # Evaluation Order
//!
//! 1. **Short-circuit check**: on profiles with a unique-key field, a missing
//!    key fails the row on that field alone
//! 2. **Field rules**: identifiers, email, mobile, account (when enabled),
//!    date of birth; errors accumulate and normalizations apply regardless
//!    of other failures
//!
//! # Example Usage
//!
//! ```rust
//! use record_validator::app::models::{HeaderLayout, RawRow};
//! use record_validator::app::services::row_processor::RowProcessor;
//! use record_validator::{LocaleProfile, RuleSet};
//!
//! let profile = LocaleProfile::samoa();
//! let rules = RuleSet::from_requirements([("email_add", true)]);
//! let layout = HeaderLayout::new(["ID", "Mobile_No", "email_add", "DOB"], &profile);
//! let raw = RawRow::new(
//!     &layout,
//!     vec!["A1".into(), "+685 1234567".into(), "user@example.com".into(), "1/2/1990".into()],
//! )
//! .unwrap();
//!
//! let processor = RowProcessor::new(rules, profile);
//! let processed = processor.process(&raw, 1);
//! assert!(processed.is_clean());
//! assert_eq!(processed.row.get("Mobile_no"), Some("1234567"));
//! ```

pub mod processor;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for convenience
pub use processor::{ProcessedRow, RowProcessor};
pub use stats::ValidationStats;
