//! Expense repository for JSON storage
//!
//! Manages loading and saving the expense list to expenses.json. The file
//! holds a bare JSON array of records in insertion order.

use std::path::{Path, PathBuf};

use crate::error::TrackerError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
}

impl ExpenseRepository {
    /// Create a new expense repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every expense from disk
    ///
    /// A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<Expense>, TrackerError> {
        read_json(&self.path)
    }

    /// Replace the file contents with `expenses`
    pub fn save(&self, expenses: &[Expense]) -> Result<(), TrackerError> {
        write_json_atomic(&self.path, expenses)
    }
}

/// Next id to hand out: one past the largest id in use, or 1 for an empty store
///
/// Fails once the largest id in use is `u64::MAX`.
pub fn next_id(expenses: &[Expense]) -> Result<ExpenseId, TrackerError> {
    match expenses.iter().map(|e| e.id).max() {
        None => Ok(ExpenseId::FIRST),
        Some(max) => max.next().ok_or_else(|| {
            TrackerError::Validation(format!("No expense IDs left after {}", max))
        }),
    }
}

/// Index of the expense with `id`, if present
pub fn position(expenses: &[Expense], id: ExpenseId) -> Option<usize> {
    expenses.iter().position(|e| e.id == id)
}
