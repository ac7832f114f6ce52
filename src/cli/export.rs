//! CLI command for contact export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::ContactBookResult;
use crate::export::{export_contacts_csv, export_contacts_json, export_contacts_yaml, ExportFormat};
use crate::models::Owner;
use crate::storage::Storage;

/// Export the owner's contacts to a file, or to stdout when no path is given
pub fn handle_export_command(
    storage: &Storage,
    owner: Option<&Owner>,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> ContactBookResult<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let mut writer = BufWriter::new(File::create(&path)?);
            write_export(storage, owner, format, &mut writer)?;
            writer.flush()?;

            let count = storage.contacts.count(owner)?;
            eprintln!(
                "Exported {} contact(s) as {} to {}",
                count,
                format,
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, owner, format, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    storage: &Storage,
    owner: Option<&Owner>,
    format: ExportFormat,
    writer: &mut W,
) -> ContactBookResult<()> {
    match format {
        ExportFormat::Csv => export_contacts_csv(storage, owner, writer),
        ExportFormat::Json => export_contacts_json(storage, owner, writer),
        ExportFormat::Yaml => export_contacts_yaml(storage, owner, writer),
    }
}
