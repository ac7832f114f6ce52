//! Export module for the contact book
//!
//! Exports one owner's contacts in three formats:
//! - CSV: spreadsheet-compatible, one row per contact
//! - JSON: machine-readable, wrapped in a versioned envelope
//! - YAML: the same envelope, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_contacts_csv;
pub use self::json::{export_contacts_json, ContactExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_contacts_yaml;

use std::fmt;
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!(
                "Unknown export format '{}'. Valid formats: csv, json, yaml",
                other
            )),
        }
    }
}
