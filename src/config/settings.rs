//! User settings for the contact book
//!
//! Manages the default owner for single-user sessions, the login history
//! page size, display preferences and the log level.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::ContactBookPaths;
use crate::error::ContactBookError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Owner used when no `--user` is given; `None` means single-user mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_owner: Option<String>,

    /// Number of login events shown by `login history`
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Timestamp format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Log level used when `CONTACT_BOOK_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_history_limit() -> usize {
    10
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_owner: None,
            history_limit: default_history_limit(),
            date_format: default_date_format(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ContactBookPaths) -> Result<Self, ContactBookError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
            ContactBookError::Io(format!("Failed to read settings file: {}", e))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            ContactBookError::Config(format!("Failed to parse settings file: {}", e))
        })?;
        settings.validate()?;

        Ok(settings)
    }

    /// Reject values that would fail later at display time
    pub fn validate(&self) -> Result<(), ContactBookError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ContactBookError::Config(format!(
                "Invalid date_format '{}' in settings file",
                self.date_format
            )));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ContactBookPaths) -> Result<(), ContactBookError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ContactBookError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            ContactBookError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.default_owner.is_none());
        assert_eq!(settings.history_limit, 10);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactBookPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            default_owner: Some("alice".into()),
            history_limit: 25,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_owner.as_deref(), Some("alice"));
        assert_eq!(loaded.history_limit, 25);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.date_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactBookPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ContactBookError::Config(_)));
    }

    #[test]
    fn test_invalid_date_format_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactBookPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format":"%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ContactBookError::Config(_)));
        assert!(err.to_string().contains("%Q"));

        std::fs::write(paths.settings_file(), r#"{"date_format":"%d/%m/%Y"}"#).unwrap();
        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_default_date_format_is_valid() {
        assert!(Settings::default().validate().is_ok());
    }
}
