//! Store configuration
//!
//! Every field has a serde default, so a partial (or empty) config file
//! deserializes cleanly and older files keep working as fields are added.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::CaseSensitivity;
use crate::store::{StoreError, DATA_FILE_NAME};

/// Directory created under the platform data directory
pub const APP_DIR_NAME: &str = "NotepadPro";

/// Environment variable overriding the data file location
pub const DATA_PATH_ENV: &str = "NOTEPAD_DATA_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Data file used when `save_to_file`/`load_from_file` get no path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    /// Title given to notes created without one
    pub default_note_title: String,

    /// Name given to categories created without one
    pub default_category_name: String,

    pub search_case: CaseSensitivity,

    /// Character limit for note previews
    pub preview_length: usize,

    pub autosave: AutoSaveConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            default_note_title: "New Note".to_string(),
            default_category_name: "New Category".to_string(),
            search_case: CaseSensitivity::Insensitive,
            preview_length: 100,
            autosave: AutoSaveConfig::default(),
        }
    }
}

/// Periodic save settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSaveConfig {
    pub enabled: bool,
    pub interval_minutes: u64,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_minutes: 5,
        }
    }
}

impl StoreConfig {
    /// Defaults with the `NOTEPAD_DATA_PATH` override applied
    pub fn from_env() -> Self {
        Self::default().with_env_override(std::env::var_os(DATA_PATH_ENV))
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    fn with_env_override(mut self, value: Option<OsString>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            let path = PathBuf::from(value);
            tracing::info!("Using data path from {}: {}", DATA_PATH_ENV, path.display());
            self.data_path = Some(path);
        }
        self
    }

    /// Configured data path, or the platform default
    pub fn resolve_data_path(&self) -> Result<PathBuf, StoreError> {
        match &self.data_path {
            Some(path) => Ok(path.clone()),
            None => default_data_path(),
        }
    }

    /// Load a config file, falling back to defaults if it does not exist.
    ///
    /// An existing file that cannot be read or parsed is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| StoreError::parse(path, e))
    }
}

/// `<platform data dir>/NotepadPro/notepad_data.json`
pub fn default_data_path() -> Result<PathBuf, StoreError> {
    let data_dir = dirs::data_dir().ok_or(StoreError::NoDataDirectory)?;
    Ok(data_dir.join(APP_DIR_NAME).join(DATA_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.default_note_title, "New Note");
        assert_eq!(config.default_category_name, "New Category");
        assert_eq!(config.search_case, CaseSensitivity::Insensitive);
        assert_eq!(config.preview_length, 100);
        assert!(!config.autosave.enabled);
        assert_eq!(config.autosave.interval_minutes, 5);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"preview_length": 40, "autosave": {"enabled": true}}"#)
                .unwrap();
        assert_eq!(config.preview_length, 40);
        assert!(config.autosave.enabled);
        assert_eq!(config.autosave.interval_minutes, 5);
        assert_eq!(config.default_note_title, "New Note");
    }

    #[test]
    fn test_env_override() {
        let config = StoreConfig::default().with_env_override(Some("/tmp/notes.json".into()));
        assert_eq!(config.data_path, Some(PathBuf::from("/tmp/notes.json")));

        let config = StoreConfig::default().with_env_override(Some(OsString::new()));
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let config = StoreConfig::default().with_data_path("/srv/notes.json");
        assert_eq!(
            config.resolve_data_path().unwrap(),
            PathBuf::from("/srv/notes.json")
        );
    }

    #[test]
    fn test_default_data_path_file_name() {
        if let Ok(path) = default_data_path() {
            assert!(path.ends_with(Path::new(APP_DIR_NAME).join(DATA_FILE_NAME)));
        }
    }

    #[test]
    fn test_load_or_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        assert_eq!(
            StoreConfig::load_or_default(&path).unwrap(),
            StoreConfig::default()
        );

        fs::write(&path, r#"{"default_note_title": "Untitled"}"#).unwrap();
        assert_eq!(
            StoreConfig::load_or_default(&path).unwrap().default_note_title,
            "Untitled"
        );

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            StoreConfig::load_or_default(&path),
            Err(StoreError::Parse { .. })
        ));
    }
}
