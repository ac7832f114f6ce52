//! Path management for the contact book
//!
//! ## Path Resolution Order
//!
//! 1. `CONTACT_BOOK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/contact-book` on Linux,
//!    `~/Library/Application Support/contact-book` on macOS,
//!    `%APPDATA%\contact-book` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::ContactBookError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "CONTACT_BOOK_DATA_DIR";

/// Manages all paths used by the contact book
#[derive(Debug, Clone)]
pub struct ContactBookPaths {
    base_dir: PathBuf,
}

impl ContactBookPaths {
    /// Resolve the base directory from the environment or the platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ContactBookError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to contacts.json
    pub fn contacts_file(&self) -> PathBuf {
        self.data_dir().join("contacts.json")
    }

    /// Get the path to the append-only login history
    pub fn logins_file(&self) -> PathBuf {
        self.data_dir().join("logins.jsonl")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), ContactBookError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            ContactBookError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            ContactBookError::Io(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, ContactBookError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| ContactBookError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("contact-book"))
}
