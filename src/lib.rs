//! Record Validator Library
//!
//! A Rust library for validating and normalizing batches of tabular customer
//! records against a declarative rule set.
//!
//! This library provides tools for:
//! - Loading the per-field requirement rules for a job
//! - Validating and normalizing identifiers, email, mobile numbers, account
//!   numbers and dates of birth under a locale profile
//! - Routing every parsed row to exactly one of a clean or an error output
//! - Writing an append-only, timestamped audit log of corrections, anomalies
//!   and skipped rows
//! - Merging lookup columns between two worksheets

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod audit_log;
        pub mod field_rules;
        pub mod output_router;
        pub mod pipeline;
        pub mod row_processor;
        pub mod rule_set;
        pub mod sheet_merge;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AuditEvent, FieldError, Severity};
pub use app::services::pipeline::{JobSummary, ValidationJob};
pub use app::services::rule_set::RuleSet;
pub use config::{JobConfig, LocaleProfile};

use std::path::{Path, PathBuf};

/// Result type alias for the record validator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for validation jobs and the worksheet merge
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Rules document could not be found
    #[error("validation rules file not found: {}", path.display())]
    ConfigMissing { path: PathBuf },

    /// Rules document exists but does not have the expected shape
    #[error("invalid validation rules in '{}': {source}", path.display())]
    RulesInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Input records file could not be found
    #[error("input file '{}' not found", path.display())]
    InputMissing { path: PathBuf },

    /// Input records file has no header line
    #[error("input file '{}' has no header line", path.display())]
    EmptyInput { path: PathBuf },

    /// Locale profile file could not be read or parsed
    #[error("invalid locale profile '{}': {message}", path.display())]
    ProfileInvalid { path: PathBuf, message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing failed
    #[error("CSV error in '{file}': {message}")]
    Csv {
        file: String,
        message: String,
        #[source]
        source: csv::Error,
    },

    /// Worksheet merge failed inside polars
    #[error("worksheet merge error: {message}")]
    Merge {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Worksheet is missing or lacks a required column
    #[error("worksheet error in '{}': {message}", path.display())]
    Worksheet { path: PathBuf, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Job state machine was driven out of order
    #[error("invalid job state transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

impl Error {
    /// Create a missing rules document error
    pub fn config_missing(path: impl AsRef<Path>) -> Self {
        Self::ConfigMissing {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an invalid rules document error
    pub fn rules_invalid(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::RulesInvalid {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a missing input file error
    pub fn input_missing(path: impl AsRef<Path>) -> Self {
        Self::InputMissing {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an empty input file error
    pub fn empty_input(path: impl AsRef<Path>) -> Self {
        Self::EmptyInput {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an invalid locale profile error
    pub fn profile_invalid(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::ProfileInvalid {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv(file: impl Into<String>, message: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a worksheet merge error
    pub fn merge(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Merge {
            message: message.into(),
            source,
        }
    }

    /// Create a worksheet error
    pub fn worksheet(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Worksheet {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error stopped the job before any row was read
    pub fn is_pre_processing(&self) -> bool {
        matches!(
            self,
            Self::ConfigMissing { .. }
                | Self::RulesInvalid { .. }
                | Self::InputMissing { .. }
                | Self::EmptyInput { .. }
                | Self::ProfileInvalid { .. }
                | Self::Configuration { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            file: "unknown".to_string(),
            message: "CSV processing failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Merge {
            message: "polars operation failed".to_string(),
            source: error,
        }
    }
}
