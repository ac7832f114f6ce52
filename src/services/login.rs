//! Login history service
//!
//! Entry point for the authentication hook: records one event per successful
//! login and serves the per-user history. Recorded events cannot be changed
//! or removed.

use tracing::info;

use crate::audit::{ClientInfo, LoginEvent};
use crate::error::ContactBookResult;
use crate::storage::Storage;

/// Service for login auditing
pub struct LoginService<'a> {
    storage: &'a Storage,
}

impl<'a> LoginService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a successful login
    ///
    /// Classification of the request metadata never fails; the only error is
    /// failing to append to the history file.
    pub fn record(&self, user: &str, client: &ClientInfo) -> ContactBookResult<LoginEvent> {
        let event = LoginEvent::new(user, client);
        self.storage.logins.append(&event)?;

        info!(
            user = %event.user,
            ip = event.ip_address.as_deref().unwrap_or("-"),
            device = %event.device_type,
            "login recorded"
        );
        Ok(event)
    }

    /// Most recent logins for a user, newest first
    pub fn list_recent(&self, user: &str, limit: usize) -> ContactBookResult<Vec<LoginEvent>> {
        self.storage.logins.recent_for(user, limit)
    }

    /// Total number of logins recorded for a user
    pub fn count(&self, user: &str) -> ContactBookResult<usize> {
        self.storage.logins.count_for(user)
    }
}
