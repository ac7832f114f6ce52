//! Contact model
//!
//! A contact is a flat record (name, phone, email, address) owned by at most
//! one user. Names are unique per owner, compared case-insensitively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ContactId;
use super::owner::Owner;

/// A single contact record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier
    pub id: ContactId,

    /// Owning user, absent in single-user mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,

    /// Display name, unique per owner ignoring case
    pub name: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub address: String,

    /// When the contact was created
    pub created_at: DateTime<Utc>,

    /// When the contact was last modified
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Create a new contact with both timestamps set to now
    pub fn new(owner: Option<Owner>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ContactId::new(),
            owner,
            name: name.into().trim().to_string(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style helper for the free-text fields
    pub fn with_details(
        mut self,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.phone = phone.into().trim().to_string();
        self.email = email.into().trim().to_string();
        self.address = address.into().trim().to_string();
        self
    }

    /// Validate the contact
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }

        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(ContactValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }

    /// Normalize a contact name for uniqueness checks
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Check if this contact has the given name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    /// Check whether this contact belongs to the given owner scope
    pub fn is_owned_by(&self, owner: Option<&Owner>) -> bool {
        self.owner.as_ref() == owner
    }

    /// Case-insensitive substring match over name, phone, email and address
    ///
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        [&self.name, &self.phone, &self.email, &self.address]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// Apply a partial update; returns true if anything changed
    ///
    /// Does not validate; callers check the resulting name.
    pub fn apply(&mut self, update: &ContactUpdate) -> bool {
        let mut changed = false;

        if let Some(name) = &update.name {
            let name = name.trim();
            if self.name != name {
                self.name = name.to_string();
                changed = true;
            }
        }

        for (field, value) in [
            (&mut self.phone, &update.phone),
            (&mut self.email, &update.email),
            (&mut self.address, &update.address),
        ] {
            if let Some(value) = value {
                let value = value.trim();
                if field.as_str() != value {
                    *field = value.to_string();
                    changed = true;
                }
            }
        }

        self.updated_at = Utc::now();
        changed
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Longest accepted contact name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Partial update for a contact
///
/// `None` leaves a field untouched; `Some(String::new())` clears an optional
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl ContactUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none() && self.address.is_none()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Validation errors for contacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name is required."),
            Self::NameTooLong(len) => {
                write!(f, "Contact name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for ContactValidationError {}
