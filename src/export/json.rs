//! JSON Export functionality
//!
//! Exports an owner's contacts to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{ContactBookError, ContactBookResult};
use crate::models::{Contact, Owner};
use crate::services::ContactService;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Export envelope shared by the JSON and YAML formats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Owner scope the contacts were taken from; absent in single-user mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,

    pub contact_count: usize,

    pub contacts: Vec<Contact>,
}

impl ContactExport {
    /// Collect the owner's contacts from storage
    pub fn from_storage(storage: &Storage, owner: Option<&Owner>) -> ContactBookResult<Self> {
        let contacts = ContactService::new(storage).list(owner, None)?;

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            owner: owner.cloned(),
            contact_count: contacts.len(),
            contacts,
        })
    }
}

/// Export the owner's contacts to pretty-printed JSON
pub fn export_contacts_json<W: Write>(
    storage: &Storage,
    owner: Option<&Owner>,
    writer: &mut W,
) -> ContactBookResult<()> {
    let export = ContactExport::from_storage(storage, owner)?;

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| ContactBookError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ContactBookError::Export(e.to_string()))?;

    Ok(())
}
