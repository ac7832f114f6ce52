//! Storage layer for the contact book
//!
//! Provides JSON file storage with atomic writes and an append-only login
//! history, plus automatic directory creation.

pub mod contacts;
pub mod file_io;

pub use contacts::ContactRepository;
pub use file_io::{read_json, write_json_atomic};

use crate::audit::LoginLog;
use crate::config::paths::ContactBookPaths;
use crate::error::ContactBookError;

/// Storage coordinator that owns every repository for one session
///
/// Created and loaded once at session start, then passed by reference to the
/// services. Repositories persist each change as it happens, so there is
/// nothing to flush at the end of a session.
pub struct Storage {
    pub contacts: ContactRepository,
    pub logins: LoginLog,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: &ContactBookPaths) -> Result<Self, ContactBookError> {
        paths.ensure_directories()?;

        Ok(Self {
            contacts: ContactRepository::new(paths.contacts_file()),
            logins: LoginLog::new(paths.logins_file()),
        })
    }

    /// Create storage and load everything from disk
    pub fn open(paths: &ContactBookPaths) -> Result<Self, ContactBookError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Load all data from disk
    ///
    /// The login history is read on demand and needs no loading.
    pub fn load_all(&self) -> Result<(), ContactBookError> {
        self.contacts.load()
    }
}
