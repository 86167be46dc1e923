//! Worksheet lookup merge
//!
//! Left-joins lookup columns from a source worksheet onto a target worksheet
//! by one key column per sheet. Every target row is kept in its original
//! order; rows without a match carry a literal marker in each copied column.
//! Both worksheets are CSV exports with a header line, and every cell is read
//! as text so keys compare exactly as written.

use crate::constants::merge::{
    FIRST_COPY, NOT_FOUND_MARKER, OUTPUT_FILENAME, ROW_ORDER_COLUMN, SECOND_COPY, SOURCE_KEY,
    TARGET_KEY,
};
use crate::{Error, Result};
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Key column of the lookup frame, renamed so it cannot clash with target columns
const LOOKUP_KEY_COLUMN: &str = "__lookup_key";

/// Flag column that is null on target rows without a match
const MATCH_FLAG_COLUMN: &str = "__matched";

/// One source column copied into the target under a new name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyColumn {
    /// Column name in the source worksheet
    pub source: String,
    /// Column name in the merged output
    pub output: String,
}

impl CopyColumn {
    /// Copy `source` into a column named `output`
    pub fn new(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }

    /// Parse `SOURCE=OUTPUT`; a bare `SOURCE` keeps the column name
    pub fn parse(spec: &str) -> Result<Self> {
        let (source, output) = match spec.split_once('=') {
            Some((source, output)) => (source.trim(), output.trim()),
            None => (spec.trim(), spec.trim()),
        };
        if source.is_empty() || output.is_empty() {
            return Err(Error::configuration(format!(
                "copy column '{}' must look like SOURCE=OUTPUT",
                spec
            )));
        }
        Ok(Self::new(source, output))
    }
}

/// Everything needed to run one merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSpec {
    pub target_path: PathBuf,
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub target_key: String,
    pub source_key: String,
    pub copies: Vec<CopyColumn>,
}

impl MergeSpec {
    /// Merge with the default keys, copied columns and output file
    pub fn new(target_path: impl Into<PathBuf>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            target_path: target_path.into(),
            source_path: source_path.into(),
            output_path: PathBuf::from(OUTPUT_FILENAME),
            target_key: TARGET_KEY.to_string(),
            source_key: SOURCE_KEY.to_string(),
            copies: vec![
                CopyColumn::new(FIRST_COPY.0, FIRST_COPY.1),
                CopyColumn::new(SECOND_COPY.0, SECOND_COPY.1),
            ],
        }
    }

    /// Write the merged worksheet to `path`
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Use different key columns
    pub fn with_keys(mut self, target_key: impl Into<String>, source_key: impl Into<String>) -> Self {
        self.target_key = target_key.into();
        self.source_key = source_key.into();
        self
    }

    /// Replace the copied columns
    pub fn with_copies(mut self, copies: Vec<CopyColumn>) -> Self {
        self.copies = copies;
        self
    }

    /// Check for settings that cannot produce a sensible output
    pub fn validate(&self) -> Result<()> {
        if self.copies.is_empty() {
            return Err(Error::configuration("at least one column must be copied"));
        }

        for (i, copy) in self.copies.iter().enumerate() {
            if self.copies[..i].iter().any(|other| other.output == copy.output) {
                return Err(Error::configuration(format!(
                    "output column '{}' is produced twice",
                    copy.output
                )));
            }
        }

        if self.output_path == self.target_path || self.output_path == self.source_path {
            return Err(Error::configuration(format!(
                "merge output '{}' would overwrite an input worksheet",
                self.output_path.display()
            )));
        }

        Ok(())
    }
}

/// Result of a completed merge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSummary {
    /// Rows in the target worksheet (and in the output)
    pub target_rows: usize,
    /// Target rows that found a source row
    pub matched_rows: usize,
    /// Target rows filled with the not-found marker
    pub unmatched_rows: usize,
    /// Columns in the output worksheet
    pub output_columns: usize,
    /// Where the merged worksheet was written
    pub output_path: PathBuf,
}

impl MergeSummary {
    /// Percentage of target rows that found a match
    pub fn match_rate(&self) -> f64 {
        if self.target_rows == 0 {
            0.0
        } else {
            self.matched_rows as f64 * 100.0 / self.target_rows as f64
        }
    }
}

/// Read a worksheet export with every column as text
pub fn read_worksheet(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(Error::worksheet(path, "file not found"));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| Error::merge(format!("failed to open {}", path.display()), e))?
        .finish()
        .map_err(|e| Error::merge(format!("failed to read {}", path.display()), e))?;

    debug!(
        "Read worksheet {} ({} rows, {} columns)",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

fn require_column(df: &DataFrame, name: &str, path: &Path) -> Result<()> {
    if df.get_column_names().iter().any(|c| c.as_str() == name) {
        Ok(())
    } else {
        Err(Error::worksheet(path, format!("missing column '{}'", name)))
    }
}

/// Join the copied source columns onto the target frame
///
/// Returns the merged frame and the number of target rows without a match.
pub fn merge_frames(
    target: &DataFrame,
    source: &DataFrame,
    spec: &MergeSpec,
) -> Result<(DataFrame, usize)> {
    require_column(target, &spec.target_key, &spec.target_path)?;
    require_column(source, &spec.source_key, &spec.source_path)?;
    for copy in &spec.copies {
        require_column(source, &copy.source, &spec.source_path)?;
        if target
            .get_column_names()
            .iter()
            .any(|c| c.as_str() == copy.output)
        {
            return Err(Error::worksheet(
                &spec.target_path,
                format!("output column '{}' already exists", copy.output),
            ));
        }
    }

    let mut lookup_exprs = vec![col(spec.source_key.as_str()).alias(LOOKUP_KEY_COLUMN)];
    lookup_exprs.extend(
        spec.copies
            .iter()
            .map(|copy| col(copy.source.as_str()).alias(copy.output.as_str())),
    );
    lookup_exprs.push(lit(true).alias(MATCH_FLAG_COLUMN));
    let lookup = source.clone().lazy().select(lookup_exprs);

    let mut output_exprs: Vec<Expr> = target
        .get_column_names()
        .iter()
        .map(|name| col(name.as_str()))
        .collect();
    output_exprs.extend(spec.copies.iter().map(|copy| {
        col(copy.output.as_str())
            .fill_null(lit(NOT_FOUND_MARKER))
            .alias(copy.output.as_str())
    }));
    output_exprs.push(col(MATCH_FLAG_COLUMN));

    let merged = target
        .with_row_index(ROW_ORDER_COLUMN.into(), None)
        .map_err(|e| Error::merge("failed to index target rows", e))?
        .lazy()
        .join(
            lookup,
            [col(spec.target_key.as_str())],
            [col(LOOKUP_KEY_COLUMN)],
            JoinArgs::new(JoinType::Left),
        )
        .sort_by_exprs([col(ROW_ORDER_COLUMN)], SortMultipleOptions::default())
        .select(output_exprs)
        .collect()
        .map_err(|e| Error::merge("failed to join worksheets", e))?;

    let unmatched = merged
        .column(MATCH_FLAG_COLUMN)
        .map_err(|e| Error::merge("match flag column missing after join", e))?
        .null_count();
    let merged = merged
        .drop(MATCH_FLAG_COLUMN)
        .map_err(|e| Error::merge("failed to drop match flag column", e))?;

    Ok((merged, unmatched))
}

/// Run a merge end to end and write the output worksheet
pub fn merge_sheets(spec: &MergeSpec) -> Result<MergeSummary> {
    spec.validate()?;

    let target = read_worksheet(&spec.target_path)?;
    let source = read_worksheet(&spec.source_path)?;
    let (mut merged, unmatched) = merge_frames(&target, &source, spec)?;

    let mut file = File::create(&spec.output_path).map_err(|e| {
        Error::io(
            format!("Failed to create {}", spec.output_path.display()),
            e,
        )
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut merged)
        .map_err(|e| {
            Error::merge(
                format!("failed to write {}", spec.output_path.display()),
                e,
            )
        })?;

    let summary = MergeSummary {
        target_rows: merged.height(),
        matched_rows: merged.height() - unmatched,
        unmatched_rows: unmatched,
        output_columns: merged.width(),
        output_path: spec.output_path.clone(),
    };
    info!(
        "Merged {} target rows ({} matched, {} not found) into {}",
        summary.target_rows,
        summary.matched_rows,
        summary.unmatched_rows,
        spec.output_path.display()
    );
    Ok(summary)
}
