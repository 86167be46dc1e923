//! Spinner feedback while rows are processed

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Rows between spinner message refreshes
const MESSAGE_INTERVAL: usize = 500;

/// Optional spinner counting processed rows
#[derive(Default)]
pub struct RowProgress {
    progress_bar: Option<ProgressBar>,
}

impl RowProgress {
    /// Spinner when `enabled`, silent otherwise
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self::default();
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} rows {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        pb.set_style(style);
        pb.set_message("validating");
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
        }
    }

    /// Count one row; refreshes the clean/error tally periodically
    pub fn row_done(&self, rows: usize, clean: usize, errors: usize) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
            if rows % MESSAGE_INTERVAL == 0 {
                pb.set_message(format!("({} clean, {} error)", clean, errors));
            }
        }
    }

    /// Stop the spinner and leave a final message
    pub fn finish(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message.to_string());
        }
    }

    /// Remove the spinner without a message
    pub fn clear(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }
}
