//! Validation job driver
//!
//! Owns the job lifecycle and the row loop. Rows are consumed strictly in
//! input order and written in the same relative order to their stream.

use super::progress::RowProgress;
use super::state::JobState;
use super::summary::JobSummary;
use crate::app::models::{AuditEvent, HeaderLayout, RawRow};
use crate::app::services::audit_log::AuditLog;
use crate::app::services::output_router::OutputRouter;
use crate::app::services::row_processor::{RowProcessor, ValidationStats};
use crate::app::services::rule_set::RuleSet;
use crate::config::JobConfig;
use crate::constants::{JOB_FINISHED_MESSAGE, JOB_STARTED_MESSAGE};
use crate::{Error, Result};
use csv::{Reader, ReaderBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A single validation job over one input file
#[derive(Debug)]
pub struct ValidationJob {
    config: JobConfig,
    state: JobState,
}

impl ValidationJob {
    /// Create a job; nothing is read until [`ValidationJob::run`]
    pub fn new(config: JobConfig) -> Self {
        Self {
            config,
            state: JobState::NotStarted,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Configuration the job runs with
    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Run the job to completion
    pub fn run(&mut self) -> Result<JobSummary> {
        let start = Instant::now();
        self.config.validate()?;

        let rules_path = RuleSet::resolve_path(self.config.rules_path.as_deref());
        let rules = match RuleSet::load(&rules_path) {
            Ok(rules) => rules,
            Err(e) => {
                self.state.transition(JobState::ConfigMissing)?;
                return Err(e);
            }
        };
        self.state.transition(JobState::RulesLoaded)?;

        let input_path = self.config.input_path.clone();
        let (mut reader, layout) = match self.open_input(&input_path) {
            Ok(opened) => opened,
            Err(e) => {
                self.state.transition(JobState::InputMissing)?;
                return Err(e);
            }
        };
        self.warn_on_missing_columns(&rules, &layout);

        let mut router = OutputRouter::create(
            &self.config.clean_output_path,
            &self.config.error_output_path,
            layout.original(),
        )?;
        let mut audit = AuditLog::create(&self.config.log_path, self.config.append_log)?;
        self.state.transition(JobState::StreamsOpen)?;

        audit.record(&AuditEvent::marker(JOB_STARTED_MESSAGE))?;
        self.state.transition(JobState::Processing)?;
        info!(
            "Validating {} with profile '{}'",
            input_path.display(),
            self.config.profile.name
        );

        let processor = RowProcessor::new(rules, self.config.profile.clone());
        let progress = RowProgress::new(self.config.show_progress);
        let stats = match Self::process_rows(
            &mut reader,
            &layout,
            &processor,
            &mut router,
            &mut audit,
            &progress,
            &input_path,
        ) {
            Ok(stats) => stats,
            Err(e) => {
                // Writers flush on drop, so rows routed so far stay on disk
                progress.clear();
                return Err(e);
            }
        };

        audit.record(&AuditEvent::marker(JOB_FINISHED_MESSAGE))?;
        audit.flush()?;
        router.finish()?;
        self.state.transition(JobState::Finished)?;
        progress.finish(&format!("{} rows validated", stats.total_rows));

        debug_assert!(stats.is_balanced());
        let summary = JobSummary {
            stats,
            elapsed: start.elapsed(),
            profile: self.config.profile.name.clone(),
            rules_path,
            input_path,
            clean_output_path: self.config.clean_output_path.clone(),
            error_output_path: self.config.error_output_path.clone(),
            log_path: self.config.log_path.clone(),
        };
        info!("Job finished: {}", summary.summary());
        Ok(summary)
    }

    /// Validate, route and log every remaining input row in order
    fn process_rows<W: Write, L: Write>(
        reader: &mut Reader<File>,
        layout: &HeaderLayout,
        processor: &RowProcessor,
        router: &mut OutputRouter<W>,
        audit: &mut AuditLog<L>,
        progress: &RowProgress,
        input_path: &Path,
    ) -> Result<ValidationStats> {
        let mut stats = ValidationStats::new();

        for (index, record) in reader.records().enumerate() {
            let row_number = index + 1;
            let record = record.map_err(|e| {
                Error::csv(
                    input_path.display().to_string(),
                    format!("failed to read row {}", row_number),
                    e,
                )
            })?;

            let values: Vec<String> = record.iter().map(String::from).collect();
            match RawRow::new(layout, values) {
                Some(raw) => {
                    let processed = processor.process(&raw, row_number);
                    audit.record_all(&processed.events)?;
                    router.route(&processed)?;
                    stats.record_processed(&processed);
                }
                None => {
                    audit.record(&AuditEvent::error(format!(
                        "Row {} has incorrect number of columns (expected {}, found {}). Skipping.",
                        row_number,
                        layout.len(),
                        record.len()
                    )))?;
                    stats.record_skipped();
                }
            }

            progress.row_done(stats.total_rows, stats.clean_rows, stats.error_rows);
        }

        Ok(stats)
    }

    /// Open the input and read its header line
    fn open_input(&self, path: &Path) -> Result<(Reader<File>, HeaderLayout)> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::input_missing(path));
            }
            Err(e) => {
                return Err(Error::io(
                    format!("Failed to open input {}", path.display()),
                    e,
                ));
            }
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let headers = reader.headers().map_err(|e| {
            Error::csv(path.display().to_string(), "failed to read header line", e)
        })?;
        if headers.is_empty() {
            return Err(Error::empty_input(path));
        }

        let layout = HeaderLayout::new(headers.iter(), &self.config.profile);
        debug!("Input header: {:?}", layout.original());
        Ok((reader, layout))
    }

    /// Note required fields the input header does not carry
    fn warn_on_missing_columns(&self, rules: &RuleSet, layout: &HeaderLayout) {
        for field in rules.field_names() {
            if rules.is_required(field) && !layout.has_field(field) {
                warn!(
                    "Required field '{}' is not a column of {}",
                    field,
                    self.config.input_path.display()
                );
            }
        }
    }
}
