//! Map painting tools

use bevy::log::{info, warn};
use gridsmith_autotile::{autotile_current_layer, fill_rect, plan_autotile_rect};
use gridsmith_core::{CellRect, CellRef, MapProject};

use crate::commands::EditorAction;

/// Currently selected painting tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    /// Paint the selected tile under the cursor, or erase with nothing selected
    #[default]
    Brush,
    /// Fill a dragged rectangle with the selected tile
    Rect,
    /// Fill a dragged rectangle through the selected tile's group matrix
    AutotileRect,
}

impl Tool {
    pub fn from_action(action: EditorAction) -> Option<Self> {
        match action {
            EditorAction::Brush => Some(Tool::Brush),
            EditorAction::Rect => Some(Tool::Rect),
            EditorAction::AutotileRect => Some(Tool::AutotileRect),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tool::Brush => "Brush",
            Tool::Rect => "Rect",
            Tool::AutotileRect => "Autotile Rect",
        }
    }

    /// Whether the tool works on a dragged rectangle instead of single cells
    pub fn uses_drag(&self) -> bool {
        matches!(self, Tool::Rect | Tool::AutotileRect)
    }
}

/// Rectangle being dragged out with a rect tool, in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectDrag {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl RectDrag {
    pub fn new(cell: (i32, i32)) -> Self {
        Self {
            start: cell,
            end: cell,
        }
    }

    /// Covered cells, inclusive of both ends in any drag direction
    pub fn rect(&self) -> CellRect {
        CellRect::from_corners(self.start, self.end)
    }
}

/// Ghost tiles and outline drawn over the map before a tool commits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub cells: Vec<((i32, i32), CellRef)>,
    pub outline: Option<CellRect>,
}

impl Preview {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.outline.is_none()
    }
}

/// What the current tool would place right now
pub fn preview(
    tool: Tool,
    project: &MapProject,
    selected: Option<&CellRef>,
    hover: Option<(i32, i32)>,
    drag: Option<&RectDrag>,
) -> Preview {
    match tool {
        Tool::Brush => match (selected, hover) {
            (Some(tile), Some(cell)) => Preview {
                cells: vec![(cell, tile.clone())],
                outline: None,
            },
            _ => Preview::default(),
        },
        Tool::Rect => {
            let Some(drag) = drag else {
                return Preview::default();
            };
            let rect = drag.rect();
            Preview {
                cells: selected
                    .map(|tile| rect.cells().map(|cell| (cell, tile.clone())).collect())
                    .unwrap_or_default(),
                outline: Some(rect),
            }
        }
        Tool::AutotileRect => {
            let (Some(drag), Some(tile)) = (drag, selected) else {
                return Preview::default();
            };
            let rect = drag.rect();
            project
                .group(&tile.group)
                .ok()
                .and_then(|group| plan_autotile_rect(group, rect))
                .map(|plan| Preview {
                    cells: plan.iter().collect(),
                    outline: Some(rect),
                })
                .unwrap_or_default()
        }
    }
}

/// Commit a finished rectangle drag on the current layer
///
/// Returns the number of cells written.
pub fn commit_rect(
    tool: Tool,
    project: &mut MapProject,
    selected: Option<&CellRef>,
    rect: CellRect,
) -> usize {
    match tool {
        Tool::Brush => 0,
        Tool::Rect => fill_rect(project.active_layer_mut(), rect, selected),
        Tool::AutotileRect => {
            let Some(tile) = selected else {
                info!("Autotile needs a selected tile");
                return 0;
            };
            match autotile_current_layer(project, &tile.group, rect) {
                Ok(true) => rect.area(),
                Ok(false) => 0,
                Err(e) => {
                    warn!("Autotile failed: {}", e);
                    0
                }
            }
        }
    }
}
