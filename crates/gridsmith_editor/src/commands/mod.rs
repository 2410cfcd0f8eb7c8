//! Editor actions and their key bindings

pub mod shortcuts;

pub use shortcuts::{Bindings, KeyChord, Keymap};

use gridsmith_core::MatrixSlot;
use serde::{Deserialize, Serialize};

/// Everything a key binding (or a menu entry) can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorAction {
    // Workspace
    Exit,
    ToggleFullscreen,
    ProjectSelectionLeft,
    ProjectSelectionRight,

    // Files
    Save,
    SaveAs,
    Load,

    // View
    ScaleTileUp,
    ScaleTileDown,
    ToggleTileMode,

    // Tools
    Brush,
    Rect,
    AutotileRect,
    ResetTile,
    TileLookupRemoval,

    // Sheet selection
    SelectionAccept,
    CancelSelection,
    SwitchSheetField,
    EditTile,
    ExportTile,

    // Layers
    NewLayer,
    PreviousLayer,
    DeleteLayer,
    RenameLayer,

    // Matrix slots, named by row then column
    MatrixTopLeft,
    MatrixTopMid,
    MatrixTopRight,
    MatrixMidLeft,
    MatrixMidMid,
    MatrixMidRight,
    MatrixBotLeft,
    MatrixBotMid,
    MatrixBotRight,
}

impl EditorAction {
    pub const ALL: [EditorAction; 33] = [
        EditorAction::Exit,
        EditorAction::ToggleFullscreen,
        EditorAction::ProjectSelectionLeft,
        EditorAction::ProjectSelectionRight,
        EditorAction::Save,
        EditorAction::SaveAs,
        EditorAction::Load,
        EditorAction::ScaleTileUp,
        EditorAction::ScaleTileDown,
        EditorAction::ToggleTileMode,
        EditorAction::Brush,
        EditorAction::Rect,
        EditorAction::AutotileRect,
        EditorAction::ResetTile,
        EditorAction::TileLookupRemoval,
        EditorAction::SelectionAccept,
        EditorAction::CancelSelection,
        EditorAction::SwitchSheetField,
        EditorAction::EditTile,
        EditorAction::ExportTile,
        EditorAction::NewLayer,
        EditorAction::PreviousLayer,
        EditorAction::DeleteLayer,
        EditorAction::RenameLayer,
        EditorAction::MatrixTopLeft,
        EditorAction::MatrixTopMid,
        EditorAction::MatrixTopRight,
        EditorAction::MatrixMidLeft,
        EditorAction::MatrixMidMid,
        EditorAction::MatrixMidRight,
        EditorAction::MatrixBotLeft,
        EditorAction::MatrixBotMid,
        EditorAction::MatrixBotRight,
    ];

    /// The matrix slot a `Matrix*` action assigns to
    pub fn matrix_slot(&self) -> Option<MatrixSlot> {
        match self {
            EditorAction::MatrixTopLeft => Some(MatrixSlot::TOP_LEFT),
            EditorAction::MatrixTopMid => Some(MatrixSlot::TOP),
            EditorAction::MatrixTopRight => Some(MatrixSlot::TOP_RIGHT),
            EditorAction::MatrixMidLeft => Some(MatrixSlot::LEFT),
            EditorAction::MatrixMidMid => Some(MatrixSlot::CENTER),
            EditorAction::MatrixMidRight => Some(MatrixSlot::RIGHT),
            EditorAction::MatrixBotLeft => Some(MatrixSlot::BOTTOM_LEFT),
            EditorAction::MatrixBotMid => Some(MatrixSlot::BOTTOM),
            EditorAction::MatrixBotRight => Some(MatrixSlot::BOTTOM_RIGHT),
            _ => None,
        }
    }

    /// Actions still honoured while a text field (layer rename, sheet names)
    /// is taking typed characters
    pub fn allowed_while_typing(&self) -> bool {
        matches!(
            self,
            EditorAction::Exit
                | EditorAction::ToggleFullscreen
                | EditorAction::Save
                | EditorAction::SaveAs
                | EditorAction::ToggleTileMode
                | EditorAction::SelectionAccept
                | EditorAction::CancelSelection
                | EditorAction::SwitchSheetField
                | EditorAction::EditTile
                | EditorAction::ExportTile
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditorAction::Exit => "Exit",
            EditorAction::ToggleFullscreen => "Toggle Fullscreen",
            EditorAction::ProjectSelectionLeft => "Previous Tab",
            EditorAction::ProjectSelectionRight => "Next Tab",
            EditorAction::Save => "Save",
            EditorAction::SaveAs => "Save As...",
            EditorAction::Load => "Load...",
            EditorAction::ScaleTileUp => "Double Tile Size",
            EditorAction::ScaleTileDown => "Halve Tile Size",
            EditorAction::ToggleTileMode => "Tile Mode",
            EditorAction::Brush => "Brush",
            EditorAction::Rect => "Rect",
            EditorAction::AutotileRect => "Autotile Rect",
            EditorAction::ResetTile => "Deselect Tile",
            EditorAction::TileLookupRemoval => "Delete Selected Tile",
            EditorAction::SelectionAccept => "Accept Selection",
            EditorAction::CancelSelection => "Cancel Selection",
            EditorAction::SwitchSheetField => "Switch Name Field",
            EditorAction::EditTile => "Edit Selected Tile",
            EditorAction::ExportTile => "Export Selection As Tiles",
            EditorAction::NewLayer => "Next / New Layer",
            EditorAction::PreviousLayer => "Previous Layer",
            EditorAction::DeleteLayer => "Delete Layer",
            EditorAction::RenameLayer => "Rename Layer",
            EditorAction::MatrixTopLeft => "Matrix Top Left",
            EditorAction::MatrixTopMid => "Matrix Top",
            EditorAction::MatrixTopRight => "Matrix Top Right",
            EditorAction::MatrixMidLeft => "Matrix Left",
            EditorAction::MatrixMidMid => "Matrix Center",
            EditorAction::MatrixMidRight => "Matrix Right",
            EditorAction::MatrixBotLeft => "Matrix Bottom Left",
            EditorAction::MatrixBotMid => "Matrix Bottom",
            EditorAction::MatrixBotRight => "Matrix Bottom Right",
        }
    }
}
