//! Validation rule set loading
//!
//! The rules document is a JSON object mapping each governed field to its
//! requirement policy, e.g. `{"DOB": {"required": true}}`. It is loaded once
//! per job and never mutated afterwards.

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_RULES_FILENAME};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Requirement policy for one governed field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRequirement {
    /// Whether an empty value fails the field
    pub required: bool,
}

/// Immutable mapping of field name to requirement policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    fields: BTreeMap<String, FieldRequirement>,
}

impl RuleSet {
    /// Build a rule set from (field, required) pairs
    pub fn from_requirements<I, S>(requirements: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let fields = requirements
            .into_iter()
            .map(|(field, required)| (field.into(), FieldRequirement { required }))
            .collect();
        Self { fields }
    }

    /// Parse a rules document from JSON text
    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load the rules document at `path`
    ///
    /// A missing file is reported as [`Error::ConfigMissing`] so the job can
    /// abort before any row is read.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::config_missing(path));
            }
            Err(e) => {
                return Err(Error::io(
                    format!("Failed to read rules file {}", path.display()),
                    e,
                ));
            }
        };

        let rules = Self::from_json(&content).map_err(|e| Error::rules_invalid(path, e))?;
        info!(
            "Loaded {} field rules from {}",
            rules.fields.len(),
            path.display()
        );
        debug!("Rules: {:?}", rules.fields);
        Ok(rules)
    }

    /// Resolve which rules document to load
    ///
    /// An explicit path always wins. Otherwise the working directory is tried,
    /// then the user config directory. When nothing exists the working-directory
    /// candidate is returned so the missing-file error names the expected place.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        let candidates = Self::candidate_paths();
        candidates
            .iter()
            .find(|path| path.exists())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RULES_FILENAME))
    }

    /// Default locations searched for the rules document, in priority order
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(DEFAULT_RULES_FILENAME)];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(CONFIG_DIR_NAME).join(DEFAULT_RULES_FILENAME));
        }
        candidates
    }

    /// Whether the field must be present; unknown fields are optional
    pub fn is_required(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(|rule| rule.required)
    }

    /// Requirement policy for a field, if the document mentions it
    pub fn requirement(&self, field: &str) -> Option<FieldRequirement> {
        self.fields.get(field).copied()
    }

    /// Number of fields the document governs
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the document governs no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over governed field names in sorted order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
