//! Append-only audit log writer
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{TrackerError, TrackerResult};

use super::entry::AuditEntry;

/// Writes audit entries to a JSONL file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry to the log
    pub fn log(&self, entry: &AuditEntry) -> TrackerResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| TrackerError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| TrackerError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| TrackerError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| TrackerError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all audit entries, oldest first
    pub fn read_all(&self) -> TrackerResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| TrackerError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                TrackerError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                TrackerError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries
    pub fn read_recent(&self, count: usize) -> TrackerResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Number of non-empty lines in the log
    pub fn entry_count(&self) -> TrackerResult<usize> {
        if !self.log_path.exists() {
            return Ok(0);
        }

        let file = File::open(&self.log_path)
            .map_err(|e| TrackerError::Io(format!("Failed to open audit log: {}", e)))?;

        Ok(BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter(|l| !l.trim().is_empty())
            .count())
    }

    /// Check if the audit log file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }
}
