//! Storage layer for the expense tracker
//!
//! Provides JSON file storage with atomic writes and wires the audit log
//! into every mutation.

pub mod expenses;
pub mod file_io;

pub use expenses::{next_id, position, ExpenseRepository};
pub use file_io::{read_json, write_json_atomic};

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger};
use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::error::TrackerResult;

/// Main storage coordinator
pub struct Storage {
    pub expenses: ExpenseRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TrackerPaths, settings: &Settings) -> TrackerResult<Self> {
        paths.ensure_directories()?;

        let audit = settings
            .audit_log
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            audit,
        })
    }

    /// Get the audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> TrackerResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::create(entity_id, entity_name, entity)),
            None => Ok(()),
        }
    }

    /// Record an update operation with a field diff
    pub fn log_update<T: Serialize>(
        &self,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> TrackerResult<()> {
        let Some(logger) = &self.audit else {
            return Ok(());
        };

        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(before_json), Ok(after_json)) => generate_diff(&before_json, &after_json),
            _ => None,
        };

        logger.log(&AuditEntry::update(
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> TrackerResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::delete(entity_id, entity_name, entity)),
            None => Ok(()),
        }
    }
}
