//! File I/O utilities with atomic writes
//!
//! Whole-document JSON files are replaced atomically; line-delimited logs are
//! only ever appended to.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ContactBookError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, ContactBookError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        ContactBookError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        ContactBookError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ContactBookError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ContactBookError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| ContactBookError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| ContactBookError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| ContactBookError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ContactBookError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ContactBookError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Append one value as a single JSON line
pub fn append_json_line<T, P>(path: P, value: &T) -> Result<(), ContactBookError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut line = serde_json::to_string(value)?;
    line.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            ContactBookError::Io(format!("Failed to open {}: {}", path.display(), e))
        })?;

    // One write call per entry keeps concurrent appenders from interleaving
    file.write_all(line.as_bytes())
        .map_err(|e| ContactBookError::Io(format!("Failed to append entry: {}", e)))?;

    file.flush()
        .map_err(|e| ContactBookError::Io(format!("Failed to flush {}: {}", path.display(), e)))
}

/// Read every JSON line from a file, oldest first
///
/// A missing file is an empty log. Blank lines are skipped.
pub fn read_json_lines<T, P>(path: P) -> Result<Vec<T>, ContactBookError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|e| {
        ContactBookError::Io(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let mut entries = Vec::new();
    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| {
            ContactBookError::Io(format!("Failed to read line {}: {}", line_num + 1, e))
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let entry = serde_json::from_str(&line).map_err(|e| {
            ContactBookError::Json(format!(
                "Failed to parse {} at line {}: {}",
                path.display(),
                line_num + 1,
                e
            ))
        })?;
        entries.push(entry);
    }

    Ok(entries)
}
