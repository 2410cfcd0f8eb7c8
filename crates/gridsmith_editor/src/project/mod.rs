//! One open map and its editing session

mod file;

pub use file::ProjectError;

use bevy::log::{info, warn};
use bevy_egui::egui::Rect;
use gridsmith_core::{CellRef, MapProject};
use std::path::PathBuf;
use uuid::Uuid;

use crate::commands::EditorAction;
use crate::input::{InputEvent, PointerButton};
use crate::preferences::EditorPreferences;
use crate::render::Viewport;
use crate::sheet::{SheetView, SpriteSheet};
use crate::tools::{commit_rect, preview, Preview, RectDrag, Tool};

/// An open project tab: the map plus everything about how it is being edited
#[derive(Debug)]
pub struct EditorProject {
    pub id: Uuid,
    pub path: Option<PathBuf>,
    pub map: MapProject,
    pub viewport: Viewport,
    pub tool: Tool,
    pub selected: Option<CellRef>,
    pub sheet: Option<SpriteSheet>,
    pub sheet_view: SheetView,
    pub tile_mode: bool,
    pub dirty: bool,
    renaming: Option<String>,
    painting: bool,
    panning: bool,
    pub(crate) drag: Option<RectDrag>,
    pub(crate) hover: Option<(i32, i32)>,
    canvas: Rect,
}

impl EditorProject {
    /// Wrap a map, loading its sprite sheet from disk
    pub fn new(map: MapProject, path: Option<PathBuf>) -> Self {
        let sheet = match SpriteSheet::open(&map.sprite_sheet) {
            Ok(sheet) => Some(sheet),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };
        Self::with_sheet(map, path, sheet)
    }

    pub fn with_sheet(map: MapProject, path: Option<PathBuf>, sheet: Option<SpriteSheet>) -> Self {
        Self {
            id: Uuid::new_v4(),
            path,
            viewport: Viewport::new(map.tile_size),
            map,
            tool: Tool::default(),
            selected: None,
            sheet,
            sheet_view: SheetView::default(),
            tile_mode: false,
            dirty: false,
            renaming: None,
            painting: false,
            panning: false,
            drag: None,
            hover: None,
            canvas: Rect::NOTHING,
        }
    }

    pub fn display_name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string())
    }

    pub fn apply_preferences(&mut self, preferences: &EditorPreferences) {
        let (min, max) = preferences.zoom_bounds();
        self.viewport.set_zoom_range(min, max);
    }

    /// Screen area the project is drawn into
    pub fn set_canvas(&mut self, canvas: Rect) {
        self.canvas = canvas;
        self.viewport.set_origin(canvas.min);
        self.sheet_view.set_origin(canvas.min);
    }

    pub fn is_renaming(&self) -> bool {
        self.renaming.is_some()
    }

    /// Whether typed characters go to a text field instead of key bindings
    pub fn is_typing(&self) -> bool {
        self.is_renaming() || (self.tile_mode && self.sheet_view.has_selection())
    }

    pub fn preview(&self) -> Preview {
        preview(
            self.tool,
            &self.map,
            self.selected.as_ref(),
            self.hover,
            self.drag.as_ref(),
        )
    }

    // === Typing ===

    pub fn type_text(&mut self, text: &str) {
        if self.is_renaming() {
            for c in text.chars().filter(|c| !c.is_control()) {
                self.map.push_layer_name_char(c);
            }
            self.dirty = true;
        } else if self.tile_mode && self.sheet_view.has_selection() {
            self.sheet_view.push_text(text);
        }
    }

    pub fn backspace(&mut self) {
        if self.is_renaming() {
            self.map.pop_layer_name_char();
            self.dirty = true;
        } else if self.tile_mode && self.sheet_view.has_selection() {
            self.sheet_view.pop_char();
        }
    }

    // === Selection ===

    pub fn select_tile(&mut self, cell: CellRef) {
        if self.map.resolve(&cell).is_some() {
            info!("Selected tile '{}' from '{}'", cell.tile, cell.group);
            self.selected = Some(cell);
        }
    }

    /// Drop the selection if its tile no longer exists
    fn validate_selection(&mut self) {
        if self
            .selected
            .as_ref()
            .is_some_and(|cell| self.map.is_dangling(cell))
        {
            self.selected = None;
        }
    }

    pub fn delete_group(&mut self, name: &str) {
        if self.map.delete_group(name).is_some() {
            self.dirty = true;
            self.validate_selection();
        }
    }

    pub fn toggle_matrix(&mut self, name: &str) {
        if let Ok(group) = self.map.group_mut(name) {
            group.show_matrix = !group.show_matrix;
            self.dirty = true;
        }
    }

    // === Actions ===

    /// Apply a project-level action. Returns false when the action isn't
    /// handled here.
    pub fn apply_action(&mut self, action: EditorAction) -> bool {
        if let Some(tool) = Tool::from_action(action) {
            if self.tool != tool {
                info!("Tool: {}", tool.label());
            }
            self.tool = tool;
            self.drag = None;
            return true;
        }
        if let Some(slot) = action.matrix_slot() {
            if let Some(cell) = self.selected.clone() {
                if let Ok(group) = self.map.group_mut(&cell.group) {
                    info!("Matrix {} of '{}' set to '{}'", slot, cell.group, cell.tile);
                    group.set_matrix_slot(slot, cell.tile);
                    self.dirty = true;
                }
            }
            return true;
        }

        match action {
            EditorAction::ScaleTileUp => {
                self.map.tile_size = self.viewport.scale_tile_up();
                info!("Tile size {}", self.map.tile_size);
                self.dirty = true;
            }
            EditorAction::ScaleTileDown => {
                self.map.tile_size = self.viewport.scale_tile_down();
                info!("Tile size {}", self.map.tile_size);
                self.dirty = true;
            }
            EditorAction::ToggleTileMode => {
                self.tile_mode = !self.tile_mode;
                self.painting = false;
                self.drag = None;
                info!("Tile mode {}", if self.tile_mode { "on" } else { "off" });
            }
            EditorAction::ResetTile => self.selected = None,
            EditorAction::TileLookupRemoval => {
                if let Some(cell) = self.selected.take() {
                    if let Ok(group) = self.map.group_mut(&cell.group) {
                        group.delete_tile(&cell.tile);
                        info!("Deleted tile '{}' from '{}'", cell.tile, cell.group);
                        self.dirty = true;
                    }
                }
            }
            EditorAction::SelectionAccept => {
                if self.renaming.take().is_some() {
                    info!("Renamed layer to '{}'", self.map.current_layer_name());
                } else if self.tile_mode && self.sheet_view.accept(&mut self.map).is_some() {
                    self.dirty = true;
                }
            }
            EditorAction::CancelSelection => {
                if let Some(previous) = self.renaming.take() {
                    self.map.rename_current_layer(previous);
                } else if self.tile_mode {
                    self.sheet_view.cancel();
                }
            }
            EditorAction::SwitchSheetField => {
                if self.tile_mode {
                    self.sheet_view.switch_field();
                }
            }
            EditorAction::EditTile => {
                if let (true, Some(cell)) = (self.tile_mode, self.selected.as_ref()) {
                    self.sheet_view.edit_tile(&self.map, cell);
                }
            }
            EditorAction::ExportTile => {
                if self.tile_mode && self.sheet_view.export(&mut self.map) > 0 {
                    self.dirty = true;
                }
            }
            EditorAction::NewLayer => {
                let before = self.map.layer_count();
                self.map.next_layer();
                self.dirty |= self.map.layer_count() != before;
            }
            EditorAction::PreviousLayer => self.map.previous_layer(),
            EditorAction::DeleteLayer => {
                self.renaming = None;
                self.map.delete_current_layer();
                self.dirty = true;
            }
            EditorAction::RenameLayer => {
                if self.renaming.is_none() {
                    self.renaming = Some(self.map.current_layer_name().to_string());
                }
            }
            _ => return false,
        }
        true
    }

    // === Pointer ===

    pub fn handle_pointer(&mut self, event: &InputEvent, preferences: &EditorPreferences) {
        if self.tile_mode {
            self.handle_sheet_pointer(event, preferences);
        } else {
            self.handle_map_pointer(event, preferences);
        }
    }

    fn handle_map_pointer(&mut self, event: &InputEvent, preferences: &EditorPreferences) {
        match *event {
            InputEvent::PointerPressed { pos, button } => {
                if !self.canvas.contains(pos) {
                    return;
                }
                let cell = self.viewport.screen_to_cell(pos);
                match button {
                    PointerButton::Middle => self.panning = true,
                    PointerButton::Primary if self.tool.uses_drag() => {
                        self.drag = Some(RectDrag::new(cell));
                    }
                    PointerButton::Primary => {
                        self.painting = true;
                        self.paint(cell);
                    }
                }
            }
            InputEvent::PointerMoved { pos, delta } => {
                if self.panning {
                    self.viewport.pan(delta, preferences.mouse_sensitivity);
                }
                self.hover = self
                    .canvas
                    .contains(pos)
                    .then(|| self.viewport.screen_to_cell(pos));
                if let Some(cell) = self.hover {
                    if self.painting {
                        self.paint(cell);
                    }
                    if let Some(drag) = self.drag.as_mut() {
                        drag.end = cell;
                    }
                }
            }
            InputEvent::PointerReleased { pos, button } => match button {
                PointerButton::Middle => self.panning = false,
                PointerButton::Primary => {
                    self.painting = false;
                    if let Some(mut drag) = self.drag.take() {
                        if self.canvas.contains(pos) {
                            drag.end = self.viewport.screen_to_cell(pos);
                        }
                        let written =
                            commit_rect(self.tool, &mut self.map, self.selected.as_ref(), drag.rect());
                        if written > 0 {
                            self.dirty = true;
                        }
                    }
                }
            },
            InputEvent::Scroll { pos, lines } => {
                if self.canvas.contains(pos) {
                    self.viewport
                        .zoom_at(pos, lines * preferences.scroll_sensitivity);
                }
            }
            _ => {}
        }
    }

    fn handle_sheet_pointer(&mut self, event: &InputEvent, preferences: &EditorPreferences) {
        let size = self
            .sheet
            .as_ref()
            .map_or((0, 0), |s| (s.width(), s.height()));
        match *event {
            InputEvent::PointerPressed { pos, button } => {
                if !self.canvas.contains(pos) {
                    return;
                }
                match button {
                    PointerButton::Middle => self.panning = true,
                    PointerButton::Primary => self
                        .sheet_view
                        .begin_selection(self.sheet_view.screen_to_sheet(pos, size)),
                }
            }
            InputEvent::PointerMoved { pos, delta } => {
                if self.panning {
                    self.sheet_view.pan(delta, preferences.mouse_sensitivity);
                }
                if self.sheet_view.is_dragging() {
                    let px = self.sheet_view.screen_to_sheet(pos, size);
                    self.sheet_view.drag_selection(px);
                }
            }
            InputEvent::PointerReleased { pos, button } => match button {
                PointerButton::Middle => self.panning = false,
                PointerButton::Primary => {
                    let px = self.sheet_view.screen_to_sheet(pos, size);
                    self.sheet_view.end_selection(px);
                }
            },
            InputEvent::Scroll { pos, lines } => {
                if self.canvas.contains(pos) {
                    self.sheet_view
                        .zoom_by(lines * preferences.scroll_sensitivity);
                }
            }
            _ => {}
        }
    }

    /// Brush write at one cell: the selected tile, or erase with none selected
    fn paint(&mut self, cell: (i32, i32)) {
        let current = self.map.active_layer().get(cell);
        if current == self.selected.as_ref() {
            return;
        }
        self.map.paint(cell, self.selected.clone());
        self.dirty = true;
    }
}
