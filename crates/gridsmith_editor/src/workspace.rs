//! Open projects, tabs and the per-tick input dispatch

use bevy::log::{error, info, warn};
use bevy::prelude::Resource;
use bevy_egui::egui;
use gridsmith_core::{MapProject, TileSize, PROJECT_EXTENSION};
use std::path::{Path, PathBuf};

use crate::commands::{Bindings, EditorAction, KeyChord, Keymap};
use crate::input::{InputBatch, InputEvent, UiCommand};
use crate::picker::FilePicker;
use crate::preferences::{EditorPreferences, RecentFiles};
use crate::project::{EditorProject, ProjectError};

/// Tile sizes offered by the new-project dialog
pub const TILE_SIZE_PRESETS: [u32; 6] = [8, 16, 24, 32, 48, 64];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapType {
    #[default]
    Orthogonal,
    Isometric,
}

impl MapType {
    pub fn label(&self) -> &'static str {
        match self {
            MapType::Orthogonal => "Orthogonal",
            MapType::Isometric => "Isometric",
        }
    }
}

/// What the new-project dialog asks for
#[derive(Debug, Clone, PartialEq)]
pub struct NewProjectRequest {
    pub map_type: MapType,
    pub tile_size: u32,
    /// Sheet to start from; `None` asks with the image picker
    pub sprite_sheet: Option<PathBuf>,
}

impl Default for NewProjectRequest {
    fn default() -> Self {
        Self {
            map_type: MapType::Orthogonal,
            tile_size: TileSize::default().width(),
            sprite_sheet: None,
        }
    }
}

#[derive(Debug)]
pub enum Tab {
    Welcome,
    Project(Box<EditorProject>),
}

impl Tab {
    pub fn label(&self) -> String {
        match self {
            Tab::Welcome => "Welcome".to_string(),
            Tab::Project(project) if project.dirty => format!("{}*", project.display_name()),
            Tab::Project(project) => project.display_name(),
        }
    }
}

/// Window-level requests coming out of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub exit_requested: bool,
    pub toggle_fullscreen: bool,
}

/// Every open tab; the first tab is always the welcome page
#[derive(Resource, Debug)]
pub struct Workspace {
    tabs: Vec<Tab>,
    selected: usize,
    pub recent: RecentFiles,
    keymap: Keymap,
    /// Shown by the error popup until dismissed
    pub last_error: Option<String>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(&EditorPreferences::default(), RecentFiles::default())
    }
}

impl Workspace {
    pub fn new(preferences: &EditorPreferences, recent: RecentFiles) -> Self {
        Self {
            tabs: vec![Tab::Welcome],
            selected: 0,
            recent,
            keymap: Keymap::from_bindings(&preferences.bindings),
            last_error: None,
        }
    }

    pub fn set_bindings(&mut self, bindings: &Bindings) {
        self.keymap = Keymap::from_bindings(bindings);
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    // === Tabs ===

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_tab(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.selected = index;
        }
    }

    /// Close a project tab. The welcome tab stays.
    pub fn close_tab(&mut self, index: usize) {
        if index == 0 || index >= self.tabs.len() {
            return;
        }
        if let Tab::Project(project) = self.tabs.remove(index) {
            info!("Closed {}", project.display_name());
        }
        if self.selected >= index {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    pub fn current_project(&self) -> Option<&EditorProject> {
        match self.tabs.get(self.selected) {
            Some(Tab::Project(project)) => Some(project),
            _ => None,
        }
    }

    pub fn current_project_mut(&mut self) -> Option<&mut EditorProject> {
        match self.tabs.get_mut(self.selected) {
            Some(Tab::Project(project)) => Some(project),
            _ => None,
        }
    }

    pub fn projects(&self) -> impl Iterator<Item = &EditorProject> {
        self.tabs.iter().filter_map(|tab| match tab {
            Tab::Project(project) => Some(project.as_ref()),
            Tab::Welcome => None,
        })
    }

    fn projects_mut(&mut self) -> impl Iterator<Item = &mut EditorProject> {
        self.tabs.iter_mut().filter_map(|tab| match tab {
            Tab::Project(project) => Some(project.as_mut()),
            Tab::Welcome => None,
        })
    }

    /// Add a project tab and switch to it
    pub fn push_project(&mut self, project: EditorProject) -> usize {
        self.tabs.push(Tab::Project(Box::new(project)));
        self.selected = self.tabs.len() - 1;
        self.selected
    }

    fn report(&mut self, error: ProjectError) {
        if error == ProjectError::Cancelled {
            return;
        }
        error!("{}", error);
        self.last_error = Some(error.to_string());
    }

    // === Files ===

    /// Start a project on a sprite sheet
    pub fn new_project(
        &mut self,
        request: &NewProjectRequest,
        picker: &mut dyn FilePicker,
    ) -> Result<usize, ProjectError> {
        let result = self.try_new_project(request, picker);
        if let Err(e) = &result {
            self.report(e.clone());
        }
        result
    }

    fn try_new_project(
        &mut self,
        request: &NewProjectRequest,
        picker: &mut dyn FilePicker,
    ) -> Result<usize, ProjectError> {
        if request.map_type == MapType::Isometric {
            return Err(ProjectError::Unsupported("Isometric maps".to_string()));
        }
        let sheet = match &request.sprite_sheet {
            Some(path) => path.clone(),
            None => picker.open_image().ok_or(ProjectError::Cancelled)?,
        };
        let map = MapProject::new(sheet.clone(), TileSize::square(request.tile_size));
        info!("New project on {:?} ({})", sheet, map.tile_size);
        self.recent.push(sheet);
        Ok(self.push_project(EditorProject::new(map, None)))
    }

    pub fn open_path(&mut self, path: &Path) -> Result<usize, ProjectError> {
        match EditorProject::open(path) {
            Ok(project) => {
                info!("Opened {:?}", path);
                self.recent.push(path);
                Ok(self.push_project(project))
            }
            Err(e) => {
                self.report(e.clone());
                Err(e)
            }
        }
    }

    pub fn open_dialog(&mut self, picker: &mut dyn FilePicker) -> Result<usize, ProjectError> {
        let path = picker.open_project().ok_or(ProjectError::Cancelled)?;
        self.open_path(&path)
    }

    /// Open a recent entry: project files open, anything else is taken as a sheet
    pub fn open_recent(
        &mut self,
        path: &Path,
        picker: &mut dyn FilePicker,
    ) -> Result<usize, ProjectError> {
        if path.extension().is_some_and(|ext| ext == PROJECT_EXTENSION) {
            let result = self.open_path(path);
            if result.is_err() {
                self.recent.remove(path);
            }
            result
        } else {
            let request = NewProjectRequest {
                sprite_sheet: Some(path.to_path_buf()),
                ..Default::default()
            };
            self.new_project(&request, picker)
        }
    }

    /// Save the selected project; `save_as` always asks for a path
    pub fn save(
        &mut self,
        picker: &mut dyn FilePicker,
        save_as: bool,
    ) -> Result<PathBuf, ProjectError> {
        let Some(project) = self.current_project_mut() else {
            return Err(ProjectError::NoPath);
        };
        let result = if save_as {
            project.save_as(picker)
        } else {
            project.save_with(picker)
        };
        match &result {
            Ok(path) => {
                info!("Saved {:?}", path);
                self.recent.push(path.clone());
            }
            Err(e) => self.report(e.clone()),
        }
        result
    }

    /// Best-effort save of every open project
    pub fn save_all(&mut self, picker: &mut dyn FilePicker) -> Vec<Result<PathBuf, ProjectError>> {
        let results: Vec<_> = self
            .projects_mut()
            .map(|project| {
                let result = project.save_with(picker);
                match &result {
                    Ok(path) => info!("Saved {:?}", path),
                    Err(e) => warn!("Could not save {}: {}", project.display_name(), e),
                }
                result
            })
            .collect();
        for path in results.iter().flatten() {
            self.recent.push(path.clone());
        }
        results
    }

    /// Save everything and write the recent-files list
    pub fn exit(&mut self, picker: &mut dyn FilePicker) {
        self.save_all(picker);
        if let Err(e) = self.recent.save() {
            warn!("Could not write recent files: {}", e);
        }
    }

    // === Tick ===

    /// Apply one frame of input to the selected tab
    pub fn tick(
        &mut self,
        batch: &InputBatch,
        picker: &mut dyn FilePicker,
        preferences: &EditorPreferences,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if let Some(project) = self.current_project_mut() {
            project.apply_preferences(preferences);
            project.set_canvas(batch.canvas);
        }

        for event in &batch.events {
            match event {
                InputEvent::Key(chord) => self.handle_key(chord, picker, &mut outcome),
                InputEvent::Text(text) => {
                    if let Some(project) = self.current_project_mut() {
                        if project.is_typing() {
                            project.type_text(text);
                        }
                    }
                }
                InputEvent::Action(action) => self.dispatch(*action, picker, &mut outcome),
                InputEvent::Command(command) => self.handle_command(command, picker),
                pointer => {
                    if let Some(project) = self.current_project_mut() {
                        project.handle_pointer(pointer, preferences);
                    }
                }
            }
        }
        outcome
    }

    fn handle_key(
        &mut self,
        chord: &KeyChord,
        picker: &mut dyn FilePicker,
        outcome: &mut TickOutcome,
    ) {
        let typing = self.current_project().is_some_and(EditorProject::is_typing);
        if typing && chord.key == egui::Key::Backspace && !chord.ctrl && !chord.alt {
            if let Some(project) = self.current_project_mut() {
                project.backspace();
            }
            return;
        }
        for action in self.keymap.actions(chord) {
            if typing && !action.allowed_while_typing() {
                continue;
            }
            self.dispatch(action, picker, outcome);
        }
    }

    fn dispatch(
        &mut self,
        action: EditorAction,
        picker: &mut dyn FilePicker,
        outcome: &mut TickOutcome,
    ) {
        match action {
            EditorAction::Exit => outcome.exit_requested = true,
            EditorAction::ToggleFullscreen => {
                outcome.toggle_fullscreen = !outcome.toggle_fullscreen
            }
            EditorAction::ProjectSelectionLeft => self.selected = self.selected.saturating_sub(1),
            EditorAction::ProjectSelectionRight => {
                self.selected = (self.selected + 1).min(self.tabs.len() - 1)
            }
            EditorAction::Save => {
                let _ = self.save(picker, false);
            }
            EditorAction::SaveAs => {
                let _ = self.save(picker, true);
            }
            EditorAction::Load => {
                let _ = self.open_dialog(picker);
            }
            other => {
                if let Some(project) = self.current_project_mut() {
                    project.apply_action(other);
                }
            }
        }
    }

    fn handle_command(&mut self, command: &UiCommand, picker: &mut dyn FilePicker) {
        match command {
            UiCommand::SelectTile(cell) => {
                if let Some(project) = self.current_project_mut() {
                    project.select_tile(cell.clone());
                }
            }
            UiCommand::DeleteGroup(name) => {
                if let Some(project) = self.current_project_mut() {
                    project.delete_group(name);
                }
            }
            UiCommand::ToggleMatrix(name) => {
                if let Some(project) = self.current_project_mut() {
                    project.toggle_matrix(name);
                }
            }
            UiCommand::SelectTab(index) => self.select_tab(*index),
            UiCommand::CloseTab(index) => self.close_tab(*index),
            UiCommand::NewProject(request) => {
                let _ = self.new_project(request, picker);
            }
            UiCommand::OpenProject => {
                let _ = self.open_dialog(picker);
            }
            UiCommand::OpenRecent(path) => {
                let _ = self.open_recent(path, picker);
            }
        }
    }

    /// Window title for the selected tab
    pub fn title(&self, fps: Option<f64>) -> String {
        let Some(project) = self.current_project() else {
            return "gridsmith".to_string();
        };
        let path = project
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "untitled".to_string());
        format!(
            "{}{} - gridsmith | {} tiles | {:.0} FPS",
            path,
            if project.dirty { "*" } else { "" },
            project.map.cell_count(project.map.current_layer()),
            fps.unwrap_or(0.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::{NoPicker, QueuedPicker};

    fn workspace_with_sheet(sheet: &str) -> Workspace {
        let mut workspace = Workspace::default();
        let request = NewProjectRequest {
            tile_size: 16,
            sprite_sheet: Some(PathBuf::from(sheet)),
            ..Default::default()
        };
        workspace.new_project(&request, &mut NoPicker).unwrap();
        workspace
    }

    #[test]
    fn test_starts_on_welcome() {
        let workspace = Workspace::default();
        assert_eq!(workspace.tabs().len(), 1);
        assert!(workspace.current_project().is_none());
        assert_eq!(workspace.title(Some(60.0)), "gridsmith");
    }

    #[test]
    fn test_new_project_selects_its_tab() {
        let workspace = workspace_with_sheet("missing.png");
        assert_eq!(workspace.selected(), 1);
        let project = workspace.current_project().unwrap();
        assert_eq!(project.map.tile_size, TileSize::square(16));
        assert!(project.sheet.is_none());
        assert_eq!(workspace.recent.len(), 1);
    }

    #[test]
    fn test_isometric_is_rejected() {
        let mut workspace = Workspace::default();
        let request = NewProjectRequest {
            map_type: MapType::Isometric,
            sprite_sheet: Some(PathBuf::from("sheet.png")),
            ..Default::default()
        };
        assert!(matches!(
            workspace.new_project(&request, &mut NoPicker),
            Err(ProjectError::Unsupported(_))
        ));
        assert_eq!(workspace.tabs().len(), 1);
        assert_eq!(
            workspace.last_error.as_deref(),
            Some("Isometric maps is not supported")
        );
    }

    #[test]
    fn test_cancelled_picker_is_silent() {
        let mut workspace = Workspace::default();
        let result = workspace.new_project(&NewProjectRequest::default(), &mut QueuedPicker::default());
        assert_eq!(result, Err(ProjectError::Cancelled));
        assert!(workspace.last_error.is_none());
    }

    #[test]
    fn test_tab_selection_clamps() {
        let mut workspace = workspace_with_sheet("a.png");
        let batch = InputBatch::new(egui::Rect::NOTHING)
            .with(InputEvent::Action(EditorAction::ProjectSelectionRight));
        workspace.tick(&batch, &mut NoPicker, &EditorPreferences::default());
        assert_eq!(workspace.selected(), 1);

        let batch = InputBatch::new(egui::Rect::NOTHING)
            .with(InputEvent::Action(EditorAction::ProjectSelectionLeft))
            .with(InputEvent::Action(EditorAction::ProjectSelectionLeft));
        workspace.tick(&batch, &mut NoPicker, &EditorPreferences::default());
        assert_eq!(workspace.selected(), 0);
    }

    #[test]
    fn test_close_tab_keeps_welcome() {
        let mut workspace = workspace_with_sheet("a.png");
        workspace.close_tab(0);
        assert_eq!(workspace.tabs().len(), 2);
        workspace.close_tab(1);
        assert_eq!(workspace.tabs().len(), 1);
        assert_eq!(workspace.selected(), 0);
    }

    #[test]
    fn test_title_shows_tile_count() {
        let workspace = workspace_with_sheet("a.png");
        assert_eq!(
            workspace.title(Some(59.6)),
            "untitled - gridsmith | 0 tiles | 60 FPS"
        );
    }

    #[test]
    fn test_exit_action_is_reported() {
        let mut workspace = Workspace::default();
        let batch = InputBatch::new(egui::Rect::NOTHING)
            .with(InputEvent::Key(KeyChord::new(egui::Key::Q).ctrl()));
        let outcome = workspace.tick(&batch, &mut NoPicker, &EditorPreferences::default());
        assert!(outcome.exit_requested);
        assert!(!outcome.toggle_fullscreen);
    }
}
