//! Application constants for the record validator
//!
//! This module contains default file names, governed field names, audit
//! formatting, and the locale constants used by the built-in profiles.

// =============================================================================
// Default Job Files
// =============================================================================

/// Default rules document looked up in the working directory
pub const DEFAULT_RULES_FILENAME: &str = "validation_rules.json";

/// Default input records file
pub const DEFAULT_INPUT_FILENAME: &str = "Corprate_data_dummy.csv";

/// Default clean output file
pub const DEFAULT_CLEAN_OUTPUT_FILENAME: &str = "clean_data.csv";

/// Default error output file
pub const DEFAULT_ERROR_OUTPUT_FILENAME: &str = "error_data.csv";

/// Default audit log file
pub const DEFAULT_LOG_FILENAME: &str = "job_log.txt";

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "record-validator";

// =============================================================================
// Governed Fields
// =============================================================================

/// Canonical (post-rename) names of the columns the field rules govern
pub mod fields {
    /// Primary business identifier
    pub const USPCID: &str = "USPCID";

    /// Secondary business identifier
    pub const USCLID: &str = "USCLID";

    /// Email address; the unique key on short-circuit profiles
    pub const EMAIL: &str = "email_add";

    /// Mobile phone number
    pub const MOBILE: &str = "Mobile_no";

    /// Bank account number
    pub const ACCOUNT: &str = "Acc_no";

    /// Date of birth
    pub const DATE_OF_BIRTH: &str = "DOB";
}

/// Header spellings seen in source extracts, mapped to canonical field names
pub mod header_renames {
    pub const MOBILE: (&str, &str) = ("Mobile_No", super::fields::MOBILE);
    pub const ACCOUNT: (&str, &str) = ("AC_NO", super::fields::ACCOUNT);
}

// =============================================================================
// Output and Audit Formatting
// =============================================================================

/// Trailing column appended to the error output header
pub const ERROR_COLUMN_NAME: &str = "error_desc";

/// Separator used when joining a row's error descriptors
pub const ERROR_DESCRIPTOR_SEPARATOR: &str = ", ";

/// Timestamp layout for audit log lines
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Audit message marking the start of a job
pub const JOB_STARTED_MESSAGE: &str = "Job Started: Data Validation";

/// Audit message marking the end of a job
pub const JOB_FINISHED_MESSAGE: &str = "Job Finished.";

// =============================================================================
// Field Rule Constants
// =============================================================================

/// Canonical day/month/year layout every valid date of birth is rewritten to
pub const CANONICAL_DATE_FORMAT: &str = "%d/%m/%Y";

/// Alternate date separators corrected to `/` by the fallback parse
pub const ALTERNATE_DATE_SEPARATORS: &[char] = &['-', '.'];

/// Fixed width account numbers are zero-padded to
pub const DEFAULT_ACCOUNT_WIDTH: usize = 10;

/// Mobile value recorded as a placeholder rather than a number
pub const MOBILE_ZERO_PLACEHOLDER: &str = "0";

/// Samoa locale constants
pub mod samoa {
    pub const COUNTRY_CODE_PREFIXES: &[&str] = &["+685", "685"];
    pub const MOBILE_LENGTH: usize = 7;
    pub const NON_MOBILE_LEADING_DIGITS: &[char] = &['2', '3', '4', '5', '6'];
    pub const MOBILE_LEADING_DIGITS: &[char] = &['9'];
    pub const DOB_FALLBACK_FORMATS: &[&str] = &["%d/%m/%y"];
}

/// Cook Islands locale constants
pub mod cook_islands {
    pub const COUNTRY_CODE_PREFIXES: &[&str] = &["+682", "682"];
    pub const MOBILE_LENGTH: usize = 5;
    pub const NON_MOBILE_LEADING_DIGITS: &[char] = &['2', '3', '4'];
    pub const MOBILE_LEADING_DIGITS: &[char] = &['5', '7', '8'];
}

// =============================================================================
// Sheet Merge Defaults
// =============================================================================

/// Defaults for the worksheet lookup merge
pub mod merge {
    /// Key column in the target worksheet
    pub const TARGET_KEY: &str = "I";

    /// Key column in the source worksheet
    pub const SOURCE_KEY: &str = "B";

    /// First copied source column and its output name
    pub const FIRST_COPY: (&str, &str) = ("E", "B (from E)");

    /// Second copied source column and its output name
    pub const SECOND_COPY: (&str, &str) = ("D", "C (from D)");

    /// Marker written into copied columns for unmatched target rows
    pub const NOT_FOUND_MARKER: &str = "Not Found";

    /// Default output file for the merged worksheet
    pub const OUTPUT_FILENAME: &str = "Result_IBUSRQDC1_sm_with_lookups.csv";

    /// Internal column used to restore target row order after the join
    pub const ROW_ORDER_COLUMN: &str = "__target_row";
}
