//! User settings
//!
//! Stored as RON in the platform config directory. A missing or broken file
//! falls back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::catalog::CatalogSource;
use crate::picker::TypeFilter;
use crate::share::HistoryMode;

const SETTINGS_FILE: &str = "settings.ron";

/// Errors reading or writing the settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Picker preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether selection changes replace the location or push a new entry
    pub history_mode: HistoryMode,
    /// Directory holding `skills.json` and `perks.json`; bundled data if unset
    pub data_dir: Option<PathBuf>,
    /// Type filter the browse list starts with
    pub default_type_filter: TypeFilter,
}

impl Settings {
    pub fn catalog_source(&self) -> CatalogSource {
        match &self.data_dir {
            Some(dir) => CatalogSource::Directory(dir.clone()),
            None => CatalogSource::Bundled,
        }
    }
}

/// Platform location of the settings file
pub fn settings_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "loadout", "Loadout") {
        proj_dirs.config_dir().join(SETTINGS_FILE)
    } else {
        PathBuf::from(".").join(SETTINGS_FILE)
    }
}

/// Load settings from the platform location (or defaults)
pub fn load_settings() -> Settings {
    let path = settings_path();

    if !path.exists() {
        log::info!("No settings at {:?}, using defaults", path);
        return Settings::default();
    }

    match load_settings_from(&path) {
        Ok(settings) => {
            log::info!("Settings loaded from {:?}", path);
            settings
        }
        Err(e) => {
            log::warn!("Failed to load settings: {}, using defaults", e);
            Settings::default()
        }
    }
}

pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let data = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ron::from_str(&data)?)
}

pub fn save_settings(settings: &Settings) -> Result<(), SettingsError> {
    save_settings_to(settings, &settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let text = ron::ser::to_string_pretty(settings, ron::ser::PrettyConfig::default())?;
    fs::write(path, text).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Settings saved to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let settings = Settings {
            history_mode: HistoryMode::Push,
            data_dir: Some(PathBuf::from("/srv/loadout/data")),
            default_type_filter: TypeFilter::Perks,
        };
        save_settings_to(&settings, &path).unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(
            loaded.catalog_source(),
            CatalogSource::Directory(PathBuf::from("/srv/loadout/data"))
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "(history_mode: Push)").unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded.history_mode, HistoryMode::Push);
        assert_eq!(loaded.data_dir, None);
        assert_eq!(loaded.catalog_source(), CatalogSource::Bundled);
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "(history_mode: Sideways").unwrap();
        assert!(matches!(load_settings_from(&path), Err(SettingsError::Parse(_))));

        let missing = dir.path().join("missing.ron");
        assert!(matches!(load_settings_from(&missing), Err(SettingsError::Io { .. })));
    }
}
