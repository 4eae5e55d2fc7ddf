//! Audit logging for the expense tracker
//!
//! Every add, update and delete is appended to `audit.log` as one JSON line
//! with the record before and after the change.
//!
//! - `AuditEntry`: a single logged operation
//! - `AuditLogger`: appends and reads the JSONL file
//! - `generate_diff`: field-level summary between two record snapshots

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
