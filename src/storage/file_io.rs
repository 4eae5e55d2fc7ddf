//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TrackerError;

/// Read JSON from a file, returning a default value if file doesn't exist
///
/// A file that exists but does not parse as `T` is reported as
/// [`TrackerError::Corrupt`].
pub fn read_json<T, P>(path: P) -> Result<T, TrackerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| TrackerError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| TrackerError::Corrupt(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The target is either completely replaced or left untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TrackerError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    if let Err(e) = write_temp(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TrackerError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Serialize `data` into `temp_path` and sync it to disk
fn write_temp<T>(temp_path: &Path, data: &T) -> Result<(), TrackerError>
where
    T: Serialize + ?Sized,
{
    let file = File::create(temp_path)
        .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| TrackerError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TrackerError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(())
}
