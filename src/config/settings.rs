//! User settings for the ledger
//!
//! Manages display preferences, the effective-date policy and the default
//! report selection.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::KindSelection;
use crate::services::effective_date::EffectiveDatePolicy;
use crate::storage::JsonFile;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display only
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Income shift thresholds for new and edited movements
    #[serde(default)]
    pub effective_date: EffectiveDatePolicy,

    /// Kinds a report includes when none are given
    #[serde(default = "KindSelection::default_set")]
    pub default_kinds: Vec<KindSelection>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "S/".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            effective_date: EffectiveDatePolicy::default(),
            default_kinds: KindSelection::default_set(),
        }
    }
}

impl Settings {
    fn file(paths: &LedgerPaths) -> JsonFile<Settings> {
        JsonFile::new(paths.settings_file())
    }

    /// Load settings from disk, or default settings if the file doesn't exist
    ///
    /// Defaults are not written here; `init` decides when to persist.
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        Self::file(paths)
            .load()
            .map_err(|e| LedgerError::Config(format!("Failed to load settings: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        Self::file(paths)
            .save(self)
            .map_err(|e| LedgerError::Config(format!("Failed to save settings: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "S/");
        assert_eq!(settings.effective_date.creation_threshold_days, 7);
        assert_eq!(settings.effective_date.edit_threshold_days, 5);
        assert_eq!(
            settings.default_kinds,
            vec![KindSelection::Income, KindSelection::Expense]
        );
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.effective_date.edit_threshold_days = 7;
        settings.default_kinds.push(KindSelection::Savings);
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.effective_date.edit_threshold_days, 7);
        assert!(loaded.default_kinds.contains(&KindSelection::Savings));
    }

    #[test]
    fn test_corrupt_settings_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "[1, 2").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "$"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.effective_date, EffectiveDatePolicy::default());
    }
}
