//! Command-line argument definitions for the record validator
//!
//! This module defines the CLI interface using the clap derive API: a
//! `validate` command for the record validation job and a `merge` command
//! for the worksheet lookup merge.

use crate::app::services::sheet_merge::CopyColumn;
use crate::config::LocaleProfile;
use crate::constants::merge;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the record validator
///
/// Validates and normalizes customer record extracts, splitting them into a
/// clean file and an error file with an audit log of every change.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "record-validator",
    version,
    about = "Validate and normalize customer record extracts into clean and error files",
    long_about = "Reads a comma-delimited customer extract, checks every row against a JSON rule \
                  set and a locale profile, normalizes mobile numbers, account numbers and dates \
                  of birth, and writes each row to either a clean or an error file. Every \
                  correction, anomaly and skipped row is recorded in a timestamped audit log."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a customer extract into clean and error files
    Validate(ValidateArgs),
    /// Copy lookup columns from a source worksheet into a target worksheet
    Merge(MergeArgs),
}

/// Built-in locale profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileKind {
    /// 7-digit mobiles, email short-circuit, two-digit-year dates accepted
    Samoa,
    /// 5-digit mobiles, padded account numbers
    CookIslands,
}

impl ProfileKind {
    /// Build the profile this option names
    pub fn profile(&self) -> LocaleProfile {
        match self {
            ProfileKind::Samoa => LocaleProfile::samoa(),
            ProfileKind::CookIslands => LocaleProfile::cook_islands(),
        }
    }
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Input records file
    ///
    /// Comma-delimited with one header line. Defaults to Corprate_data_dummy.csv
    /// in the working directory.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input records file"
    )]
    pub input: Option<PathBuf>,

    /// Validation rules document
    ///
    /// JSON object mapping each field to {"required": bool}. If not specified,
    /// looks for validation_rules.json in the working directory, then in the
    /// user config directory under record-validator/.
    #[arg(
        short = 'r',
        long = "rules",
        value_name = "FILE",
        help = "Validation rules document (JSON)"
    )]
    pub rules: Option<PathBuf>,

    /// Clean output file
    #[arg(long = "clean-output", value_name = "FILE", help = "Clean output file")]
    pub clean_output: Option<PathBuf>,

    /// Error output file
    #[arg(long = "error-output", value_name = "FILE", help = "Error output file")]
    pub error_output: Option<PathBuf>,

    /// Audit log file (replaced on each run unless --append-log is given)
    #[arg(long = "log-file", value_name = "FILE", help = "Audit log file")]
    pub log_file: Option<PathBuf>,

    /// Keep earlier entries in the audit log
    #[arg(
        long = "append-log",
        help = "Append to the audit log instead of starting a fresh one"
    )]
    pub append_log: bool,

    /// Built-in locale profile
    #[arg(
        short = 'p',
        long = "profile",
        value_enum,
        default_value = "samoa",
        help = "Built-in locale profile"
    )]
    pub profile: ProfileKind,

    /// Locale profile file
    ///
    /// JSON file describing a custom profile. Takes precedence over --profile.
    #[arg(
        long = "profile-file",
        value_name = "FILE",
        help = "Custom locale profile (JSON), overrides --profile"
    )]
    pub profile_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the job summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the merge command
#[derive(Debug, Clone, Parser)]
pub struct MergeArgs {
    /// Target worksheet (CSV export); every row is kept
    #[arg(short = 't', long = "target", value_name = "FILE")]
    pub target: PathBuf,

    /// Source worksheet (CSV export) the lookup columns come from
    #[arg(short = 's', long = "source", value_name = "FILE")]
    pub source: PathBuf,

    /// Merged worksheet to write
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Key column in the target worksheet
    #[arg(long = "target-key", value_name = "COLUMN", default_value = merge::TARGET_KEY)]
    pub target_key: String,

    /// Key column in the source worksheet
    #[arg(long = "source-key", value_name = "COLUMN", default_value = merge::SOURCE_KEY)]
    pub source_key: String,

    /// First copied column as SOURCE=OUTPUT
    #[arg(long = "copy-first", value_name = "SOURCE=OUTPUT")]
    pub copy_first: Option<String>,

    /// Second copied column as SOURCE=OUTPUT
    #[arg(long = "copy-second", value_name = "SOURCE=OUTPUT")]
    pub copy_second: Option<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Output format for the merge summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl ValidateArgs {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(profile_file) = &self.profile_file {
            if !profile_file.is_file() {
                return Err(Error::configuration(format!(
                    "Profile file does not exist: {}",
                    profile_file.display()
                )));
            }
        }

        for path in [&self.clean_output, &self.error_output, &self.log_file]
            .into_iter()
            .flatten()
        {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Resolve the locale profile from --profile-file or --profile
    pub fn locale_profile(&self) -> Result<LocaleProfile> {
        match &self.profile_file {
            Some(path) => LocaleProfile::from_file(path),
            None => Ok(self.profile.profile()),
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show the progress spinner (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl MergeArgs {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.target_key.trim().is_empty() || self.source_key.trim().is_empty() {
            return Err(Error::configuration("Key column names cannot be empty"));
        }
        Ok(())
    }

    /// Copied columns, with defaults for any not given
    pub fn copies(&self) -> Result<Vec<CopyColumn>> {
        let first = match &self.copy_first {
            Some(spec) => CopyColumn::parse(spec)?,
            None => CopyColumn::new(merge::FIRST_COPY.0, merge::FIRST_COPY.1),
        };
        let second = match &self.copy_second {
            Some(spec) => CopyColumn::parse(spec)?,
            None => CopyColumn::new(merge::SECOND_COPY.0, merge::SECOND_COPY.1),
        };
        Ok(vec![first, second])
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
