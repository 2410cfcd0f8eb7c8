//! File dialogs
//!
//! Dialogs block the frame they are opened from, which is fine for a
//! single-window editor. Tests and headless builds use [`NoPicker`].

use bevy::prelude::Resource;
use gridsmith_core::PROJECT_EXTENSION;
use std::path::PathBuf;

/// Image types offered when picking a sprite sheet
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

pub trait FilePicker {
    /// Pick an existing project file
    fn open_project(&mut self) -> Option<PathBuf>;
    /// Pick a sprite sheet image
    fn open_image(&mut self) -> Option<PathBuf>;
    /// Pick where to save a project
    fn save_project(&mut self, suggested_name: &str) -> Option<PathBuf>;
}

/// Picker that always reports a cancelled dialog
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPicker;

impl FilePicker for NoPicker {
    fn open_project(&mut self) -> Option<PathBuf> {
        None
    }

    fn open_image(&mut self) -> Option<PathBuf> {
        None
    }

    fn save_project(&mut self, _suggested_name: &str) -> Option<PathBuf> {
        None
    }
}

/// Native OS dialogs
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePicker;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
impl FilePicker for NativePicker {
    fn open_project(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Gridsmith World", &[PROJECT_EXTENSION])
            .pick_file()
    }

    fn open_image(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Image", IMAGE_EXTENSIONS)
            .pick_file()
    }

    fn save_project(&mut self, suggested_name: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Gridsmith World", &[PROJECT_EXTENSION])
            .set_file_name(suggested_name)
            .set_title("Save world as")
            .save_file()
            .map(with_project_extension)
    }
}

/// The picker the frontend opens dialogs with
#[derive(Resource)]
pub struct Picker(pub Box<dyn FilePicker + Send + Sync>);

impl Picker {
    pub fn new(picker: impl FilePicker + Send + Sync + 'static) -> Self {
        Self(Box::new(picker))
    }
}

impl Default for Picker {
    #[cfg(all(feature = "native", not(target_arch = "wasm32")))]
    fn default() -> Self {
        Self::new(NativePicker)
    }

    #[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
    fn default() -> Self {
        Self::new(NoPicker)
    }
}

/// Add the project extension when the user typed a bare name
pub fn with_project_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension(PROJECT_EXTENSION);
    }
    path
}

/// Scripted picker for tests: hands out queued answers in order
#[derive(Debug, Clone, Default)]
pub struct QueuedPicker {
    pub projects: Vec<PathBuf>,
    pub images: Vec<PathBuf>,
    pub saves: Vec<PathBuf>,
}

impl FilePicker for QueuedPicker {
    fn open_project(&mut self) -> Option<PathBuf> {
        (!self.projects.is_empty()).then(|| self.projects.remove(0))
    }

    fn open_image(&mut self) -> Option<PathBuf> {
        (!self.images.is_empty()).then(|| self.images.remove(0))
    }

    fn save_project(&mut self, _suggested_name: &str) -> Option<PathBuf> {
        (!self.saves.is_empty())
            .then(|| self.saves.remove(0))
            .map(with_project_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_project_extension() {
        assert_eq!(
            with_project_extension(PathBuf::from("maps/town")),
            PathBuf::from("maps/town.world")
        );
        assert_eq!(
            with_project_extension(PathBuf::from("maps/town.json")),
            PathBuf::from("maps/town.json")
        );
    }

    #[test]
    fn test_queued_picker_hands_out_in_order() {
        let mut picker = QueuedPicker {
            saves: vec![PathBuf::from("a"), PathBuf::from("b.world")],
            ..Default::default()
        };
        assert_eq!(picker.save_project("x"), Some(PathBuf::from("a.world")));
        assert_eq!(picker.save_project("x"), Some(PathBuf::from("b.world")));
        assert_eq!(picker.save_project("x"), None);
        assert_eq!(NoPicker.open_project(), None);
    }
}
