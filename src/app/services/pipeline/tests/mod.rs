//! Tests for the validation pipeline

pub mod state_tests;

use crate::config::{JobConfig, LocaleProfile};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Rules document used by the pipeline fixtures
pub const TEST_RULES: &str = r#"{
    "USPCID": {"required": true},
    "USCLID": {"required": true},
    "email_add": {"required": true},
    "Mobile_no": {"required": false},
    "DOB": {"required": true}
}"#;

/// Write a file into the fixture directory
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("fixture file should be writable");
    path
}

/// Job configuration with every path inside `dir`
pub fn create_test_config(dir: &TempDir, input: &str, profile: LocaleProfile) -> JobConfig {
    let rules_path = write_file(dir.path(), "validation_rules.json", TEST_RULES);
    let input_path = write_file(dir.path(), "input.csv", input);
    JobConfig::default()
        .with_rules_path(rules_path)
        .with_input_path(input_path)
        .with_output_dir(dir.path())
        .with_profile(profile)
}

/// Read an output file back as lines
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("output file should exist")
        .lines()
        .map(String::from)
        .collect()
}
