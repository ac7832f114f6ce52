//! YAML Export functionality

use std::io::Write;

use crate::error::{ContactBookError, ContactBookResult};
use crate::export::json::ContactExport;
use crate::models::Owner;
use crate::storage::Storage;

/// Export the owner's contacts to YAML
pub fn export_contacts_yaml<W: Write>(
    storage: &Storage,
    owner: Option<&Owner>,
    writer: &mut W,
) -> ContactBookResult<()> {
    let export = ContactExport::from_storage(storage, owner)?;

    writeln!(writer, "# Contact Book Export")
        .map_err(|e| ContactBookError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| ContactBookError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ContactBookError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ContactBookPaths;
    use crate::services::{ContactService, CreateContactInput};
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export_has_header_and_contacts() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactBookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths).unwrap();
        ContactService::new(&storage)
            .create(
                None,
                CreateContactInput::new("Alice").with_details("555-1000", "", ""),
            )
            .unwrap();

        let mut buffer = Vec::new();
        export_contacts_yaml(&storage, None, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# Contact Book Export"));
        let parsed: ContactExport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.contact_count, 1);
        assert_eq!(parsed.contacts.len(), 1);
        assert_eq!(parsed.contacts[0].phone, "555-1000");
        assert!(parsed.owner.is_none());
    }
}
