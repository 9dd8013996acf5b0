// src/progress.rs
use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::EtlError;

/// `2024-Oct-16-09:41:07`
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Stage-boundary log the pipeline driver writes to.
pub trait ProgressLog {
    fn log_progress(&self, message: &str) -> Result<(), EtlError>;
}

/// `<timestamp>,<message>` without the line terminator.
pub fn format_entry(at: &DateTime<Local>, message: &str) -> String {
    format!("{},{}", at.format(TIMESTAMP_FORMAT), message)
}

/// Appends one line per stage to a file. Never truncates.
#[derive(Debug, Clone)]
pub struct FileProgressLog {
    path: PathBuf,
}

impl FileProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressLog for FileProgressLog {
    fn log_progress(&self, message: &str) -> Result<(), EtlError> {
        let line = format_entry(&Local::now(), message);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| EtlError::io(&self.path, e))?;
        writeln!(file, "{line}").map_err(|e| EtlError::io(&self.path, e))?;
        info!(target: "progress", "{message}");
        Ok(())
    }
}

/// Keeps messages in memory; for driving the pipeline without a log file.
#[derive(Debug, Default)]
pub struct MemoryProgressLog {
    messages: Mutex<Vec<String>>,
}

impl MemoryProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ProgressLog for MemoryProgressLog {
    fn log_progress(&self, message: &str) -> Result<(), EtlError> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::TimeZone;
    use regex::Regex;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn entry_format() {
        let at = Local.with_ymd_and_hms(2023, 9, 2, 18, 53, 26).unwrap();
        assert_eq!(
            format_entry(&at, "Starting Extraction"),
            "2023-Sep-02-18:53:26,Starting Extraction"
        );
    }

    #[test]
    fn appends_lines() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("log_file.txt");
        fs::write(&path, "earlier run\n")?;

        let log = FileProgressLog::new(&path);
        log.log_progress("Starting Extraction")?;
        log.log_progress("Extraction Ended")?;

        let text = fs::read_to_string(&path)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "earlier run");

        let re = Regex::new(r"^\d{4}-[A-Z][a-z]{2}-\d{2}-\d{2}:\d{2}:\d{2},(.*)$")?;
        let msgs: Vec<&str> = lines[1..]
            .iter()
            .map(|l| re.captures(l).expect("well-formed entry").get(1).unwrap().as_str())
            .collect();
        assert_eq!(msgs, ["Starting Extraction", "Extraction Ended"]);
        assert!(text.ends_with('\n'));
        Ok(())
    }

    #[test]
    fn unwritable_path_is_io_error() -> Result<()> {
        let dir = tempdir()?;
        let log = FileProgressLog::new(dir.path().join("missing").join("log.txt"));
        assert!(matches!(
            log.log_progress("x").unwrap_err(),
            EtlError::Io { .. }
        ));
        Ok(())
    }

    #[test]
    fn memory_log_records_in_order() {
        let log = MemoryProgressLog::new();
        log.log_progress("a").unwrap();
        log.log_progress("b").unwrap();
        assert_eq!(log.messages(), ["a", "b"]);
    }

    #[test]
    fn memory_log_survives_poisoned_lock() {
        let log = MemoryProgressLog::new();
        log.log_progress("before").unwrap();

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = log.messages.lock().unwrap();
            panic!("writer died holding the lock");
        }));
        assert!(poisoned.is_err());
        assert!(log.messages.is_poisoned());

        log.log_progress("after").unwrap();
        assert_eq!(log.messages(), ["before", "after"]);
    }
}
