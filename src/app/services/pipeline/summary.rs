//! Job summary returned by a completed validation job

use crate::app::services::row_processor::ValidationStats;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a completed job
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    /// Row counters
    pub stats: ValidationStats,
    /// Wall-clock time spent in the job
    pub elapsed: Duration,
    /// Locale profile the job ran under
    pub profile: String,
    /// Rules document that was loaded
    pub rules_path: PathBuf,
    /// Input records file
    pub input_path: PathBuf,
    /// Clean output file
    pub clean_output_path: PathBuf,
    /// Error output file
    pub error_output_path: PathBuf,
    /// Audit log file
    pub log_path: PathBuf,
}

impl JobSummary {
    /// Rows per second over the whole job
    pub fn rows_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.stats.total_rows as f64 / seconds
        } else {
            0.0
        }
    }

    /// Whether every row reached the clean output
    pub fn is_fully_clean(&self) -> bool {
        self.stats.clean_rows == self.stats.total_rows
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} in {:.2}s",
            self.stats.summary(),
            self.elapsed.as_secs_f64()
        )
    }
}
