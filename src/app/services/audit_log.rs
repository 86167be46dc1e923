//! Append-only audit log for validation jobs
//!
//! Every event is written as one `[YYYY-MM-DD HH:MM:SS] <message>` line in
//! local time. Job markers are mirrored to `tracing` at info level; row
//! events are mirrored at debug (errors and warnings) or trace (corrections)
//! so they only reach the console with `-vv` or more. The log is never read
//! back.

use crate::app::models::{AuditEvent, Severity};
use crate::constants::AUDIT_TIMESTAMP_FORMAT;
use crate::{Error, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, trace};

/// Timestamped line sink for audit events
#[derive(Debug)]
pub struct AuditLog<W: Write> {
    writer: W,
    entries: usize,
}

impl AuditLog<BufWriter<File>> {
    /// Open the log file, creating it if needed
    ///
    /// Existing entries are kept when `append` is set and discarded otherwise.
    pub fn create(path: &Path, append: bool) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(|e| {
                Error::io(format!("Failed to open audit log {}", path.display()), e)
            })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> AuditLog<W> {
    /// Wrap an arbitrary writer
    pub fn new(writer: W) -> Self {
        Self { writer, entries: 0 }
    }

    /// Append one event
    pub fn record(&mut self, event: &AuditEvent) -> Result<()> {
        let rendered = event.render();
        match event.severity {
            Some(Severity::Error) | Some(Severity::Warning) => debug!("{}", rendered),
            Some(Severity::Info) => trace!("{}", rendered),
            None => info!("{}", rendered),
        }

        let timestamp = Local::now().format(AUDIT_TIMESTAMP_FORMAT);
        writeln!(self.writer, "[{}] {}", timestamp, rendered)
            .map_err(|e| Error::io("Failed to write audit log entry", e))?;
        self.entries += 1;
        Ok(())
    }

    /// Append events in order
    pub fn record_all<'a, I>(&mut self, events: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a AuditEvent>,
    {
        for event in events {
            self.record(event)?;
        }
        Ok(())
    }

    /// Number of entries written by this handle
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Flush buffered entries to the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::io("Failed to flush audit log", e))
    }

    /// Consume the log and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tracing::Level;

    fn lines(log: AuditLog<Vec<u8>>) -> Vec<String> {
        String::from_utf8(log.into_inner())
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_entries_are_timestamped_and_prefixed() {
        let mut log = AuditLog::new(Vec::new());
        log.record(&AuditEvent::marker("Job Started: Data Validation"))
            .unwrap();
        log.record(&AuditEvent::warning("odd value")).unwrap();
        assert_eq!(log.entries(), 2);

        let lines = lines(log);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            // "[YYYY-MM-DD HH:MM:SS] " is 22 characters
            assert!(line.starts_with('['));
            assert_eq!(&line[20..22], "] ");
            assert!(
                chrono::NaiveDateTime::parse_from_str(&line[1..20], AUDIT_TIMESTAMP_FORMAT).is_ok()
            );
        }
        assert!(lines[0].ends_with("] Job Started: Data Validation"));
        assert!(lines[1].ends_with("] WARNING: odd value"));
    }

    #[test]
    fn test_record_all_preserves_order() {
        let mut log = AuditLog::new(Vec::new());
        let events = vec![
            AuditEvent::info("first"),
            AuditEvent::error("second"),
            AuditEvent::info("third"),
        ];
        log.record_all(&events).unwrap();

        let lines = lines(log);
        assert!(lines[0].ends_with("INFO: first"));
        assert!(lines[1].ends_with("ERROR: second"));
        assert!(lines[2].ends_with("INFO: third"));
    }

    #[test]
    fn test_create_appends_to_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("job_log.txt");

        for message in ["Job Started: Data Validation", "Job Finished."] {
            let mut log = AuditLog::create(&path, true).unwrap();
            log.record(&AuditEvent::marker(message)).unwrap();
            log.flush().unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("Job Finished."));
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("job_log.txt");
        std::fs::write(&path, "[2020-01-01 00:00:00] stale entry\n").unwrap();

        let mut log = AuditLog::create(&path, false).unwrap();
        log.record(&AuditEvent::marker("Job Started: Data Validation"))
            .unwrap();
        log.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(!content.contains("stale entry"));
    }

    /// Shared buffer the console subscriber writes into
    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedOutput {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn record_with_console_level(level: Level, events: &[AuditEvent]) -> String {
        let output = CapturedOutput::default();
        let writer = output.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut log = AuditLog::new(Vec::new());
            log.record_all(events).unwrap();
        });
        output.contents()
    }

    #[test]
    fn test_row_events_stay_off_the_default_console() {
        let events = vec![
            AuditEvent::error("Row 2 with USPCID 'P2' moved to error file: invalid email address."),
            AuditEvent::warning("USPCID 'P1', USCLID 'C1' has a mobile number of '0'."),
            AuditEvent::info("USPCID 'P1', USCLID 'C1' DOB changed from '1/2/1990' to '01/02/1990'."),
        ];

        assert_eq!(record_with_console_level(Level::ERROR, &events), "");
        assert_eq!(record_with_console_level(Level::WARN, &events), "");
        assert_eq!(record_with_console_level(Level::INFO, &events), "");

        let debug = record_with_console_level(Level::DEBUG, &events);
        assert!(debug.contains("moved to error file"));
        assert!(debug.contains("has a mobile number of '0'"));
        assert!(!debug.contains("DOB changed"));
    }

    #[test]
    fn test_job_markers_reach_info_console() {
        let output = record_with_console_level(
            Level::INFO,
            &[AuditEvent::marker("Job Started: Data Validation")],
        );
        assert!(output.contains("Job Started: Data Validation"));
    }
}
