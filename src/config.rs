//! Configuration management and validation.
//!
//! Provides the job configuration (file locations and the selected locale
//! profile) and the locale profiles that parameterize the field rules for a
//! given country extract.

use crate::constants::{
    CANONICAL_DATE_FORMAT, DEFAULT_ACCOUNT_WIDTH, DEFAULT_CLEAN_OUTPUT_FILENAME,
    DEFAULT_ERROR_OUTPUT_FILENAME, DEFAULT_INPUT_FILENAME, DEFAULT_LOG_FILENAME, cook_islands,
    fields, header_renames, samoa,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locale/variant configuration injected into the row processor
///
/// Everything that differs between country extracts lives here, so a single
/// pipeline serves every locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleProfile {
    /// Profile name used in logs and reports
    pub name: String,

    /// Country-code prefixes stripped from the front of mobile numbers, tried in order
    pub country_code_prefixes: Vec<String>,

    /// Exact digit count of a local mobile number
    pub mobile_length: usize,

    /// Leading digits of numbers known not to be mobiles (warning only)
    pub non_mobile_leading_digits: Vec<char>,

    /// Leading digits of known mobile ranges
    pub mobile_leading_digits: Vec<char>,

    /// Accept a mobile value of exactly "0" as a placeholder (warning only)
    #[serde(default)]
    pub zero_placeholder_allowed: bool,

    /// Validate and pad the account number column
    #[serde(default)]
    pub account_field_enabled: bool,

    /// Fixed width account numbers are zero-padded to
    #[serde(default = "default_account_width")]
    pub account_width: usize,

    /// Field whose absence fails the row without evaluating other fields
    #[serde(default)]
    pub short_circuit_field: Option<String>,

    /// Date formats tried after the canonical format fails
    #[serde(default)]
    pub dob_fallback_formats: Vec<String>,

    /// Source header spelling -> canonical field name
    #[serde(default)]
    pub header_renames: BTreeMap<String, String>,
}

fn default_account_width() -> usize {
    DEFAULT_ACCOUNT_WIDTH
}

impl LocaleProfile {
    /// Samoa extract: 7-digit mobiles, email is the unique key, no account column
    pub fn samoa() -> Self {
        Self {
            name: "samoa".to_string(),
            country_code_prefixes: to_strings(samoa::COUNTRY_CODE_PREFIXES),
            mobile_length: samoa::MOBILE_LENGTH,
            non_mobile_leading_digits: samoa::NON_MOBILE_LEADING_DIGITS.to_vec(),
            mobile_leading_digits: samoa::MOBILE_LEADING_DIGITS.to_vec(),
            zero_placeholder_allowed: true,
            account_field_enabled: false,
            account_width: DEFAULT_ACCOUNT_WIDTH,
            short_circuit_field: Some(fields::EMAIL.to_string()),
            dob_fallback_formats: to_strings(samoa::DOB_FALLBACK_FORMATS),
            header_renames: BTreeMap::from([(
                header_renames::MOBILE.0.to_string(),
                header_renames::MOBILE.1.to_string(),
            )]),
        }
    }

    /// Cook Islands corporate extract: 5-digit mobiles and a padded account column
    pub fn cook_islands() -> Self {
        Self {
            name: "cook-islands".to_string(),
            country_code_prefixes: to_strings(cook_islands::COUNTRY_CODE_PREFIXES),
            mobile_length: cook_islands::MOBILE_LENGTH,
            non_mobile_leading_digits: cook_islands::NON_MOBILE_LEADING_DIGITS.to_vec(),
            mobile_leading_digits: cook_islands::MOBILE_LEADING_DIGITS.to_vec(),
            zero_placeholder_allowed: false,
            account_field_enabled: true,
            account_width: DEFAULT_ACCOUNT_WIDTH,
            short_circuit_field: None,
            dob_fallback_formats: Vec::new(),
            header_renames: BTreeMap::from([
                (
                    header_renames::MOBILE.0.to_string(),
                    header_renames::MOBILE.1.to_string(),
                ),
                (
                    header_renames::ACCOUNT.0.to_string(),
                    header_renames::ACCOUNT.1.to_string(),
                ),
            ]),
        }
    }

    /// Load a profile from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::profile_invalid(path, format!("failed to read file: {}", e)))?;
        let profile: Self = serde_json::from_str(&content)
            .map_err(|e| Error::profile_invalid(path, e.to_string()))?;
        profile
            .validate()
            .map_err(|e| Error::profile_invalid(path, e.to_string()))?;
        debug!("Loaded locale profile '{}' from {}", profile.name, path.display());
        Ok(profile)
    }

    /// Check the profile for internally inconsistent settings
    pub fn validate(&self) -> Result<()> {
        if self.mobile_length == 0 {
            return Err(Error::configuration(
                "mobile_length must be greater than 0",
            ));
        }

        if self.account_field_enabled && self.account_width == 0 {
            return Err(Error::configuration(
                "account_width must be greater than 0 when the account field is enabled",
            ));
        }

        if self.country_code_prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::configuration(
                "country code prefixes cannot be empty",
            ));
        }

        if let Some(digit) = self
            .non_mobile_leading_digits
            .iter()
            .find(|d| self.mobile_leading_digits.contains(d))
        {
            return Err(Error::configuration(format!(
                "leading digit '{}' is listed as both mobile and non-mobile",
                digit
            )));
        }

        for format in &self.dob_fallback_formats {
            if format == CANONICAL_DATE_FORMAT {
                return Err(Error::configuration(format!(
                    "fallback date format '{}' duplicates the canonical format",
                    format
                )));
            }
        }

        Ok(())
    }

    /// Map a source header name to its canonical processing name
    pub fn canonical_header<'a>(&'a self, header: &'a str) -> &'a str {
        self.header_renames
            .get(header)
            .map(String::as_str)
            .unwrap_or(header)
    }

    /// Whether the given field short-circuits the row when missing
    pub fn is_short_circuit_field(&self, field: &str) -> bool {
        self.short_circuit_field.as_deref() == Some(field)
    }
}

impl Default for LocaleProfile {
    fn default() -> Self {
        Self::samoa()
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Global configuration for a validation job
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Explicit rules document; resolved against the default locations when absent
    pub rules_path: Option<PathBuf>,

    /// Input records file
    pub input_path: PathBuf,

    /// Clean output file
    pub clean_output_path: PathBuf,

    /// Error output file
    pub error_output_path: PathBuf,

    /// Audit log file
    pub log_path: PathBuf,

    /// Locale profile driving the field rules
    pub profile: LocaleProfile,

    /// Show a progress spinner while rows are processed
    pub show_progress: bool,

    /// Keep earlier jobs' entries in the audit log instead of starting fresh
    pub append_log: bool,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            rules_path: None,
            input_path: PathBuf::from(DEFAULT_INPUT_FILENAME),
            clean_output_path: PathBuf::from(DEFAULT_CLEAN_OUTPUT_FILENAME),
            error_output_path: PathBuf::from(DEFAULT_ERROR_OUTPUT_FILENAME),
            log_path: PathBuf::from(DEFAULT_LOG_FILENAME),
            profile: LocaleProfile::default(),
            show_progress: false,
            append_log: false,
        }
    }
}

impl JobConfig {
    /// Create configuration with a custom rules document
    pub fn with_rules_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules_path = Some(path.into());
        self
    }

    /// Create configuration with a custom input file
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Create configuration with a custom clean output file
    pub fn with_clean_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.clean_output_path = path.into();
        self
    }

    /// Create configuration with a custom error output file
    pub fn with_error_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.error_output_path = path.into();
        self
    }

    /// Create configuration with a custom audit log file
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    /// Place all three output files in one directory using the default names
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.clean_output_path = dir.join(DEFAULT_CLEAN_OUTPUT_FILENAME);
        self.error_output_path = dir.join(DEFAULT_ERROR_OUTPUT_FILENAME);
        self.log_path = dir.join(DEFAULT_LOG_FILENAME);
        self
    }

    /// Select the locale profile
    pub fn with_profile(mut self, profile: LocaleProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Enable the progress spinner
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Append to an existing audit log rather than truncating it
    pub fn with_append_log(mut self) -> Self {
        self.append_log = true;
        self
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        self.profile.validate()?;

        let outputs = [
            ("clean output", &self.clean_output_path),
            ("error output", &self.error_output_path),
            ("audit log", &self.log_path),
        ];

        for (label, path) in &outputs {
            if *path == &self.input_path {
                return Err(Error::configuration(format!(
                    "{} path '{}' would overwrite the input file",
                    label,
                    path.display()
                )));
            }
        }

        for (i, (label, path)) in outputs.iter().enumerate() {
            for (other_label, other_path) in outputs.iter().skip(i + 1) {
                if path == other_path {
                    return Err(Error::configuration(format!(
                        "{} and {} share the path '{}'",
                        label,
                        other_label,
                        path.display()
                    )));
                }
            }
        }

        Ok(())
    }
}
