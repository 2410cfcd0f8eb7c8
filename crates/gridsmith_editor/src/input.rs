//! Per-tick input batch
//!
//! The frontend drains its window events into an [`InputBatch`] once per
//! frame and hands it to the workspace. Nothing else reads input.

use bevy_egui::egui::{Pos2, Rect, Vec2};
use gridsmith_core::CellRef;
use std::path::PathBuf;

use crate::commands::{EditorAction, KeyChord};
use crate::workspace::NewProjectRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
}

/// Requests coming from widgets rather than from the canvas or the keyboard
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    SelectTile(CellRef),
    DeleteGroup(String),
    ToggleMatrix(String),
    SelectTab(usize),
    CloseTab(usize),
    NewProject(NewProjectRequest),
    OpenProject,
    OpenRecent(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerPressed { pos: Pos2, button: PointerButton },
    PointerReleased { pos: Pos2, button: PointerButton },
    PointerMoved { pos: Pos2, delta: Vec2 },
    /// Wheel movement in lines, positive away from the user
    Scroll { pos: Pos2, lines: f32 },
    Key(KeyChord),
    Text(String),
    /// An action picked from a menu or toolbar, bypassing key bindings
    Action(EditorAction),
    Command(UiCommand),
}

/// Everything that happened since the last tick
#[derive(Debug, Clone, PartialEq)]
pub struct InputBatch {
    /// Screen area the map (or the sheet in tile mode) is drawn into
    pub canvas: Rect,
    pub events: Vec<InputEvent>,
}

impl InputBatch {
    pub fn new(canvas: Rect) -> Self {
        Self {
            canvas,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn with(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
