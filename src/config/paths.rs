//! Path management for the expense tracker
//!
//! ## Path Resolution Order
//!
//! 1. `--data-dir` command-line option
//! 2. `EXPENSE_TRACKER_DATA_DIR` environment variable
//! 3. The platform data directory (e.g. `~/.local/share/expense-tracker`)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::TrackerError;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "EXPENSE_TRACKER_DATA_DIR";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct TrackerPaths {
    /// Base directory for all tracker data
    base_dir: PathBuf,
}

impl TrackerPaths {
    /// Resolve paths from an explicit override, falling back to the
    /// platform data directory
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the platform data
    /// directory cannot be determined.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self, TrackerError> {
        let base_dir = match data_dir {
            Some(dir) => dir,
            None => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create TrackerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the expense store
    pub fn expenses_file(&self) -> PathBuf {
        self.base_dir.join("expenses.json")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), TrackerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TrackerError::Io(format!("Failed to create data directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, TrackerError> {
    ProjectDirs::from("", "", "expense-tracker")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            TrackerError::Config(format!(
                "Could not determine a data directory; set {} or pass --data-dir",
                DATA_DIR_ENV
            ))
        })
}
