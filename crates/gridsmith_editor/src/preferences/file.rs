//! Preferences file save/load operations

use super::EditorPreferences;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug)]
pub enum PreferencesError {
    Io(String),
    Parse(String),
    Serialize(String),
    NoConfigDir,
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::Io(e) => write!(f, "IO error: {}", e),
            PreferencesError::Parse(e) => write!(f, "Parse error: {}", e),
            PreferencesError::Serialize(e) => write!(f, "Serialize error: {}", e),
            PreferencesError::NoConfigDir => write!(f, "Could not determine config directory"),
        }
    }
}

impl std::error::Error for PreferencesError {}

impl EditorPreferences {
    /// Get the config directory path for the editor
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "gridsmith", "gridsmith")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load preferences from the config dir, returning defaults if that fails
    pub fn load() -> Self {
        let loaded = Self::config_dir()
            .ok_or(PreferencesError::NoConfigDir)
            .and_then(|dir| Self::load_from(&dir));
        match loaded {
            Ok(prefs) => prefs,
            Err(e) => {
                bevy::log::warn!("Could not load preferences: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load preferences from `dir`; a missing file means defaults
    pub fn load_from(dir: &Path) -> Result<Self, PreferencesError> {
        let path = dir.join(PREFERENCES_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&path).map_err(|e| PreferencesError::Io(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| PreferencesError::Parse(e.to_string()))
    }

    /// Save preferences into the config dir
    pub fn save(&self) -> Result<(), PreferencesError> {
        let dir = Self::config_dir().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&dir)
    }

    pub fn save_to(&self, dir: &Path) -> Result<(), PreferencesError> {
        std::fs::create_dir_all(dir).map_err(|e| PreferencesError::Io(e.to_string()))?;

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PreferencesError::Serialize(e.to_string()))?;

        let path = dir.join(PREFERENCES_FILE);
        std::fs::write(&path, content).map_err(|e| PreferencesError::Io(e.to_string()))?;

        bevy::log::info!("Saved preferences to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("gridsmith-prefs-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = scratch_dir();
        let prefs = EditorPreferences::load_from(&dir).unwrap();
        assert_eq!(prefs, EditorPreferences::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = scratch_dir();
        let prefs = EditorPreferences {
            mouse_sensitivity: 2.0,
            show_exit: false,
            ..Default::default()
        };
        prefs.save_to(&dir).unwrap();
        assert_eq!(EditorPreferences::load_from(&dir).unwrap(), prefs);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(PREFERENCES_FILE), "{ nope").unwrap();
        assert!(matches!(
            EditorPreferences::load_from(&dir),
            Err(PreferencesError::Parse(_))
        ));
        std::fs::remove_dir_all(&dir).ok();
    }
}
