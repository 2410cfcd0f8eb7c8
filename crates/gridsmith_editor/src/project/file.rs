//! Project file save/load operations

use super::EditorProject;
use crate::picker::FilePicker;
use gridsmith_core::{format, FormatError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectError {
    Io(String),
    Format(FormatError),
    NoPath,
    Cancelled,
    Unsupported(String),
}

impl std::fmt::Display for ProjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectError::Io(e) => write!(f, "IO error: {}", e),
            ProjectError::Format(e) => write!(f, "{}", e),
            ProjectError::NoPath => write!(f, "No file path set"),
            ProjectError::Cancelled => write!(f, "Cancelled"),
            ProjectError::Unsupported(what) => write!(f, "{} is not supported", what),
        }
    }
}

impl std::error::Error for ProjectError {}

impl From<FormatError> for ProjectError {
    fn from(e: FormatError) -> Self {
        ProjectError::Format(e)
    }
}

impl EditorProject {
    /// Load a project file and its sprite sheet
    pub fn open(path: &Path) -> Result<Self, ProjectError> {
        let map = format::load_path(path)?;
        Ok(Self::new(map, Some(path.to_path_buf())))
    }

    pub fn save_to(&mut self, path: &Path) -> Result<(), ProjectError> {
        format::save_path(&self.map, path)?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Save to the current path if set
    pub fn save(&mut self) -> Result<(), ProjectError> {
        match self.path.clone() {
            Some(path) => self.save_to(&path),
            None => Err(ProjectError::NoPath),
        }
    }

    /// Save to the current path, asking for one when the project has none
    pub fn save_with(&mut self, picker: &mut dyn FilePicker) -> Result<PathBuf, ProjectError> {
        match self.path.clone() {
            Some(path) => self.save_to(&path).map(|_| path),
            None => self.save_as(picker),
        }
    }

    /// Always ask for a new path
    pub fn save_as(&mut self, picker: &mut dyn FilePicker) -> Result<PathBuf, ProjectError> {
        let path = picker
            .save_project(&self.display_name())
            .ok_or(ProjectError::Cancelled)?;
        self.save_to(&path)?;
        Ok(path)
    }
}
