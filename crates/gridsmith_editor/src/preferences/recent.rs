//! Recently opened files
//!
//! A plain text file next to the preferences, one path per line. It is read
//! once at startup and rewritten in full at exit.

use super::{EditorPreferences, PreferencesError};
use std::path::{Path, PathBuf};

const RECENT_FILE: &str = "recent.txt";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentFiles {
    paths: Vec<PathBuf>,
}

impl RecentFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the config dir, starting empty if that fails
    pub fn load() -> Self {
        let Some(dir) = EditorPreferences::config_dir() else {
            return Self::default();
        };
        match Self::load_from(&dir) {
            Ok(recent) => recent,
            Err(e) => {
                bevy::log::warn!("Could not read recent files: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(dir: &Path) -> Result<Self, PreferencesError> {
        let path = dir.join(RECENT_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).map_err(|e| PreferencesError::Io(e.to_string()))?;
        let mut recent = Self::default();
        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            recent.push(line);
        }
        Ok(recent)
    }

    pub fn save(&self) -> Result<(), PreferencesError> {
        let dir = EditorPreferences::config_dir().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&dir)
    }

    /// Truncate and rewrite the list
    pub fn save_to(&self, dir: &Path) -> Result<(), PreferencesError> {
        std::fs::create_dir_all(dir).map_err(|e| PreferencesError::Io(e.to_string()))?;
        let content = self
            .paths
            .iter()
            .map(|p| p.to_string_lossy())
            .collect::<Vec<_>>()
            .join("\n");
        std::fs::write(dir.join(RECENT_FILE), content)
            .map_err(|e| PreferencesError::Io(e.to_string()))
    }

    /// Remember a path; paths already in the list are not added again
    pub fn push(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.paths.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    pub fn remove(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
