//! Contact ownership
//!
//! An [`Owner`] identifies the authenticated principal a contact belongs to.
//! Single-user sessions carry no owner at all (`Option<&Owner>` is `None`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the user owning a contact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Owner(String);

impl Owner {
    /// Create an owner, returning `None` for a blank identifier
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Test shorthand; callers outside tests go through [`Owner::parse`]
#[cfg(test)]
impl From<&str> for Owner {
    fn from(s: &str) -> Self {
        Self(s.trim().to_string())
    }
}

#[cfg(test)]
impl From<u64> for Owner {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}
