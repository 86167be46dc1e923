//! Clean and error output streams
//!
//! Routes each processed row to exactly one stream. Both streams share the
//! original header column order; the error stream carries one extra trailing
//! column with the rendered error descriptors.

use crate::app::services::row_processor::ProcessedRow;
use crate::constants::ERROR_COLUMN_NAME;
use crate::{Error, Result};
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Destination chosen for a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Clean,
    Error,
}

/// Paired CSV writers for the two output streams
#[derive(Debug)]
pub struct OutputRouter<W: Write> {
    clean: Writer<W>,
    error: Writer<W>,
    clean_written: usize,
    error_written: usize,
}

impl OutputRouter<File> {
    /// Create both output files and write their header lines
    pub fn create(clean_path: &Path, error_path: &Path, header: &[String]) -> Result<Self> {
        let open = |path: &Path| {
            File::create(path)
                .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))
        };
        let router = Self::new(open(clean_path)?, open(error_path)?, header)?;
        debug!(
            "Opened outputs {} and {}",
            clean_path.display(),
            error_path.display()
        );
        Ok(router)
    }
}

impl<W: Write> OutputRouter<W> {
    /// Wrap two writers and emit both header lines immediately
    pub fn new(clean: W, error: W, header: &[String]) -> Result<Self> {
        let mut clean = WriterBuilder::new().from_writer(clean);
        let mut error = WriterBuilder::new().from_writer(error);

        clean
            .write_record(header)
            .map_err(|e| Error::csv("clean output", "failed to write header", e))?;
        error
            .write_record(header.iter().map(String::as_str).chain([ERROR_COLUMN_NAME]))
            .map_err(|e| Error::csv("error output", "failed to write header", e))?;

        // Header lines must land even if no row follows
        clean.flush()?;
        error.flush()?;

        Ok(Self {
            clean,
            error,
            clean_written: 0,
            error_written: 0,
        })
    }

    /// Write a row to the stream its verdict selects
    pub fn route(&mut self, processed: &ProcessedRow<'_>) -> Result<Route> {
        let values = processed.row.values();

        if processed.is_clean() {
            self.clean
                .write_record(&values)
                .map_err(|e| Error::csv("clean output", "failed to write row", e))?;
            self.clean_written += 1;
            return Ok(Route::Clean);
        }

        let description = processed.error_description();
        self.error
            .write_record(values.into_iter().chain([description.as_str()]))
            .map_err(|e| Error::csv("error output", "failed to write row", e))?;
        self.error_written += 1;
        Ok(Route::Error)
    }

    /// Rows written to the clean stream
    pub fn clean_written(&self) -> usize {
        self.clean_written
    }

    /// Rows written to the error stream
    pub fn error_written(&self) -> usize {
        self.error_written
    }

    /// Flush both streams
    pub fn finish(&mut self) -> Result<()> {
        self.clean.flush()?;
        self.error.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writers as `(clean, error)`
    pub fn into_inner(self) -> Result<(W, W)> {
        let clean = self
            .clean
            .into_inner()
            .map_err(|e| Error::io("Failed to flush clean output", e.into_error()))?;
        let error = self
            .error
            .into_inner()
            .map_err(|e| Error::io("Failed to flush error output", e.into_error()))?;
        Ok((clean, error))
    }
}
