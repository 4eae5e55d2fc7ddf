//! Expense Tracker - a personal expense log for the command line
//!
//! Expenses are kept as an ordered list in a single JSON file. Each
//! invocation loads the list, applies one command and, if anything
//! changed, writes the whole list back atomically.
//!
//! # Architecture
//!
//! - `config`: data directory resolution and user settings
//! - `error`: custom error types
//! - `models`: expense record, id and money types
//! - `storage`: JSON file storage layer
//! - `services`: add / update / delete / list / summary logic
//! - `audit`: append-only log of every mutation
//! - `display`: table and summary formatting
//! - `cli`: clap command definitions and dispatch
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_tracker::config::{Settings, TrackerPaths};
//! use expense_tracker::services::ExpenseService;
//! use expense_tracker::storage::Storage;
//!
//! # fn main() -> expense_tracker::error::TrackerResult<()> {
//! let paths = TrackerPaths::resolve(None)?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, &settings)?;
//! let summary = ExpenseService::new(&storage).summary(None)?;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::TrackerError;
