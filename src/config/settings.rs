//! User settings for the expense tracker
//!
//! Manages user preferences such as the currency symbol used for display
//! and whether mutations are recorded in the audit log.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// User settings for the expense tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Whether add/update/delete are appended to the audit log
    #[serde(default = "default_audit_log")]
    pub audit_log: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_audit_log() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            audit_log: default_audit_log(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    ///
    /// The defaults are not written back.
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TrackerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }
}
