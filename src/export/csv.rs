//! CSV Export functionality

use std::io::Write;

use crate::error::ContactBookResult;
use crate::models::Owner;
use crate::services::ContactService;
use crate::storage::Storage;

const HEADER: [&str; 6] = ["Name", "Phone", "Email", "Address", "Created", "Updated"];

/// Export the owner's contacts to CSV, one row per contact
pub fn export_contacts_csv<W: Write>(
    storage: &Storage,
    owner: Option<&Owner>,
    writer: W,
) -> ContactBookResult<()> {
    let contacts = ContactService::new(storage).list(owner, None)?;

    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for contact in &contacts {
        let created = contact.created_at.to_rfc3339();
        let updated = contact.updated_at.to_rfc3339();
        csv_writer.write_record([
            contact.name.as_str(),
            contact.phone.as_str(),
            contact.email.as_str(),
            contact.address.as_str(),
            created.as_str(),
            updated.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
