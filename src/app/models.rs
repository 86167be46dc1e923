//! Core data models for record validation
//!
//! This module contains the row views (raw and normalized), the structured
//! field errors that decide routing, and the audit events raised while a row
//! is processed.

use crate::config::LocaleProfile;
use crate::constants::{ERROR_DESCRIPTOR_SEPARATOR, fields};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// =============================================================================
// Header Layout
// =============================================================================

/// Column layout of a job, fixed once from the input header
///
/// Keeps the original header (used verbatim for both outputs) alongside the
/// renamed canonical names the field rules look values up by.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    original: Vec<String>,
    canonical: Vec<String>,
    name_to_index: HashMap<String, usize>,
}

impl HeaderLayout {
    /// Build a layout by passing each header name through the profile's rename table
    pub fn new<I, S>(headers: I, profile: &LocaleProfile) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let original: Vec<String> = headers
            .into_iter()
            .map(|h| h.as_ref().to_string())
            .collect();
        let canonical: Vec<String> = original
            .iter()
            .map(|h| profile.canonical_header(h).to_string())
            .collect();

        // Later duplicates win, matching a last-write-wins mapping
        let name_to_index = canonical
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();

        Self {
            original,
            canonical,
            name_to_index,
        }
    }

    /// Original header names in input order
    pub fn original(&self) -> &[String] {
        &self.original
    }

    /// Canonical header names in input order
    pub fn canonical(&self) -> &[String] {
        &self.canonical
    }

    /// Number of columns every row must carry
    pub fn len(&self) -> usize {
        self.original.len()
    }

    /// Whether the header has no columns
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Column index of a canonical field name
    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.name_to_index.get(field).copied()
    }

    /// Check if a canonical field exists in the layout
    pub fn has_field(&self, field: &str) -> bool {
        self.name_to_index.contains_key(field)
    }
}

// =============================================================================
// Row Views
// =============================================================================

/// One input line mapped onto the job's header
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow<'h> {
    layout: &'h HeaderLayout,
    values: Vec<String>,
}

impl<'h> RawRow<'h> {
    /// Build a row, or `None` when the value count does not match the header
    pub fn new(layout: &'h HeaderLayout, values: Vec<String>) -> Option<Self> {
        if values.len() != layout.len() {
            return None;
        }
        Some(Self { layout, values })
    }

    /// Raw value of a canonical field, if the column exists
    pub fn get(&self, field: &str) -> Option<&str> {
        self.layout
            .index_of(field)
            .map(|index| self.values[index].as_str())
    }

    /// Trimmed value of a canonical field; absent columns read as empty
    pub fn trimmed(&self, field: &str) -> &str {
        self.get(field).map(str::trim).unwrap_or("")
    }

    /// Raw values in column order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Header layout this row was built against
    pub fn layout(&self) -> &'h HeaderLayout {
        self.layout
    }
}

/// Copy-on-write view of a raw row with normalized values layered on top
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow<'r> {
    raw: &'r RawRow<'r>,
    overrides: BTreeMap<usize, String>,
}

impl<'r> NormalizedRow<'r> {
    /// Start a normalized view with no changes
    pub fn new(raw: &'r RawRow<'r>) -> Self {
        Self {
            raw,
            overrides: BTreeMap::new(),
        }
    }

    /// Current value of a canonical field
    pub fn get(&self, field: &str) -> Option<&str> {
        let index = self.raw.layout().index_of(field)?;
        self.overrides
            .get(&index)
            .map(String::as_str)
            .or_else(|| Some(self.raw.values()[index].as_str()))
    }

    /// Overwrite a field with its normalized value; unknown fields are ignored
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        if let Some(index) = self.raw.layout().index_of(field) {
            self.overrides.insert(index, value.into());
        }
    }

    /// Whether any field has been overwritten
    pub fn is_modified(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Underlying raw row
    pub fn raw(&self) -> &'r RawRow<'r> {
        self.raw
    }

    /// Values in header order with normalizations applied
    pub fn values(&self) -> Vec<&str> {
        self.raw
            .values()
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                self.overrides
                    .get(&index)
                    .map(String::as_str)
                    .unwrap_or(raw.as_str())
            })
            .collect()
    }
}

/// Stable per-row identifiers used to build audit messages
#[derive(Debug, Clone, PartialEq)]
pub struct RowContext {
    /// 1-based data row number (header excluded)
    pub row_number: usize,
    /// Primary business identifier, or a placeholder when the column is absent
    pub uspcid: String,
    /// Secondary business identifier, or a placeholder when the column is absent
    pub usclid: String,
}

impl RowContext {
    /// Derive the identifiers from a raw row
    pub fn from_row(row: &RawRow<'_>, row_number: usize) -> Self {
        let identifier = |field: &str| match row.get(field) {
            Some(value) => value.trim().to_string(),
            None => format!("[MISSING {}]", field),
        };

        Self {
            row_number,
            uspcid: identifier(fields::USPCID),
            usclid: identifier(fields::USCLID),
        }
    }

    /// Message prefix naming both identifiers
    pub fn subject(&self) -> String {
        format!("USPCID '{}', USCLID '{}'", self.uspcid, self.usclid)
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Closed set of reasons a field can fail validation
///
/// Rendered to text only at the output boundary; the rendering is the
/// user-visible error descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Required identifier is empty or absent
    MissingIdentifier { field: String },
    /// Identifier contains non-alphanumeric characters
    IdentifierSpecialCharacters { field: String, value: String },
    /// Required email is empty or absent
    MissingEmail,
    /// Email does not match the address pattern
    InvalidEmail { value: String },
    /// Mobile number is not all digits of the configured length
    InvalidMobileFormat { original: String },
    /// Account number is empty or absent
    MissingAccount,
    /// Account number contains non-digits
    InvalidAccountFormat { value: String },
    /// Account number is longer than the configured width
    InvalidAccountLength { value: String },
    /// Required date of birth is empty or absent
    MissingDateOfBirth,
    /// Date of birth could not be parsed by any accepted format
    InvalidDateOfBirth { original: String },
}

impl FieldError {
    /// Canonical name of the field this error belongs to
    pub fn field(&self) -> &str {
        match self {
            Self::MissingIdentifier { field } | Self::IdentifierSpecialCharacters { field, .. } => {
                field.as_str()
            }
            Self::MissingEmail | Self::InvalidEmail { .. } => fields::EMAIL,
            Self::InvalidMobileFormat { .. } => fields::MOBILE,
            Self::MissingAccount
            | Self::InvalidAccountFormat { .. }
            | Self::InvalidAccountLength { .. } => fields::ACCOUNT,
            Self::MissingDateOfBirth | Self::InvalidDateOfBirth { .. } => fields::DATE_OF_BIRTH,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIdentifier { field } => write!(f, "missing {}", field),
            Self::IdentifierSpecialCharacters { field, .. } => {
                write!(f, "{} contains special characters", field)
            }
            Self::MissingEmail => write!(f, "missing email address"),
            Self::InvalidEmail { .. } => write!(f, "invalid email address"),
            Self::InvalidMobileFormat { original } => {
                write!(f, "invalid mobile number format: {}", original)
            }
            Self::MissingAccount => write!(f, "invalid account"),
            Self::InvalidAccountFormat { .. } => write!(f, "invalid account number format"),
            Self::InvalidAccountLength { .. } => write!(f, "invalid account number length"),
            Self::MissingDateOfBirth => write!(f, "missing date of birth"),
            Self::InvalidDateOfBirth { original } => {
                write!(f, "invalid date of birth format: {}", original)
            }
        }
    }
}

/// Render a row's errors as the single error-description column value
pub fn render_error_descriptors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(ERROR_DESCRIPTOR_SEPARATOR)
}

// =============================================================================
// Audit Events
// =============================================================================

/// Informal audit severities, encoded as a message prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// A field was corrected or a job marker
    Info,
    /// An anomaly that does not invalidate the row
    Warning,
    /// A row was skipped or failed validation
    Error,
}

impl Severity {
    /// Prefix written in front of the message text
    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A single audit log entry before it is timestamped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub severity: Option<Severity>,
    pub message: String,
}

impl AuditEvent {
    /// Correction or informational event
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Some(Severity::Info),
            message: message.into(),
        }
    }

    /// Anomaly that does not fail the row
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Some(Severity::Warning),
            message: message.into(),
        }
    }

    /// Skip or validation failure
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Some(Severity::Error),
            message: message.into(),
        }
    }

    /// Unprefixed marker such as job start and finish
    pub fn marker(message: impl Into<String>) -> Self {
        Self {
            severity: None,
            message: message.into(),
        }
    }

    /// Message text as written to the log, severity prefix included
    pub fn render(&self) -> String {
        match self.severity {
            Some(severity) => format!("{}: {}", severity.prefix(), self.message),
            None => self.message.clone(),
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
