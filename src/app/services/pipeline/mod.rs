//! Validation job pipeline
//!
//! Drives one job end to end: load the rule set, open the input, open the
//! clean/error/log sinks, stream every row through the row processor and
//! route it, then report a summary.
//!
//! # Architecture
//!
//! - [`state`] - Job lifecycle states and the allowed transitions
//! - [`driver`] - ValidationJob and the row loop
//! - [`progress`] - Optional spinner for interactive runs
//! - [`summary`] - JobSummary returned to the caller
//!
//! # Failure Model
//!
//! Failures before the sinks are opened (missing rules, missing or empty
//! input) stop the job without touching any output. Row-level problems never
//! stop the job. An unexpected I/O or CSV failure while rows are processed
//! aborts the job; whatever was already written stays on disk.

pub mod driver;
pub mod progress;
pub mod state;
pub mod summary;

#[cfg(test)]
pub mod tests;

// Re-export main types for convenience
pub use driver::ValidationJob;
pub use progress::RowProgress;
pub use state::JobState;
pub use summary::JobSummary;
