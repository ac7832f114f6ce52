//! Append-only login history
//!
//! Each [`LoginEvent`] is written as a single JSON line and flushed
//! immediately. The log exposes append and read operations only; there is no
//! way to edit or remove an entry through this type.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{ContactBookError, ContactBookResult};
use crate::storage::file_io::{append_json_line, read_json_lines};

use super::entry::LoginEvent;

/// Handles writing login events to the history file (JSONL)
pub struct LoginLog {
    log_path: PathBuf,
    /// Serializes appends from threads sharing this log
    append_lock: Mutex<()>,
}

impl LoginLog {
    /// Create a log that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            append_lock: Mutex::new(()),
        }
    }

    /// Append an event to the log
    pub fn append(&self, event: &LoginEvent) -> ContactBookResult<()> {
        let _guard = self.append_lock.lock().map_err(|e| {
            ContactBookError::Storage(format!("Failed to acquire login log lock: {}", e))
        })?;
        append_json_line(&self.log_path, event)
    }

    /// Read all events, oldest first
    pub fn read_all(&self) -> ContactBookResult<Vec<LoginEvent>> {
        read_json_lines(&self.log_path)
    }

    /// Most recent events for one user, newest first, at most `limit`
    pub fn recent_for(&self, user: &str, limit: usize) -> ContactBookResult<Vec<LoginEvent>> {
        let mut events: Vec<_> = self
            .read_all()?
            .into_iter()
            .filter(|event| event.user == user)
            .collect();

        // Stable sort keeps file order for identical timestamps; reverse after
        events.sort_by_key(|event| event.login_time);
        events.reverse();
        events.truncate(limit);
        Ok(events)
    }

    /// Number of events recorded for one user
    pub fn count_for(&self, user: &str) -> ContactBookResult<usize> {
        Ok(self
            .read_all()?
            .iter()
            .filter(|event| event.user == user)
            .count())
    }
}
