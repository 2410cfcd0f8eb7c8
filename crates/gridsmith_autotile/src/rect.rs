//! Autotile rectangle placement
//!
//! Every cell of the rectangle is classified by its position along each axis:
//! first (-1), last (1) or in between (0). The pair picks a matrix slot, and the
//! group's effective matrix (with corner fallback) picks the tile.
//!
//! ```text
//!   width 4, height 3          width 3, height 1     width 1, height 3
//!   (-1,-1)(0,-1)(0,-1)(1,-1)  (-1,-1)(0,-1)(1,-1)   (-1,-1)
//!   (-1, 0)(0, 0)(0, 0)(1, 0)                        (-1, 0)
//!   (-1, 1)(0, 1)(0, 1)(1, 1)                        (-1, 1)
//! ```
//!
//! A single row uses the top-row slots, a single column the left-column slots,
//! and a single cell the center.

use gridsmith_core::{CellRect, CellRef, Layer, MapProject, MatrixSlot, TileError, TileGroup};
use tracing::{debug, info};

// =============================================================================
// Slot classification
// =============================================================================

/// What part of a rectangle a cell sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    Corner,
    Edge,
    Center,
}

impl SlotRole {
    pub fn of(slot: MatrixSlot) -> Self {
        if slot.is_corner() {
            SlotRole::Corner
        } else if slot.is_edge() {
            SlotRole::Edge
        } else {
            SlotRole::Center
        }
    }
}

/// Position of `offset` along an axis of length `len`
fn axis_role(offset: i32, len: i32, other_len: i32) -> i32 {
    if len == 1 {
        if other_len == 1 {
            0
        } else {
            -1
        }
    } else if offset == 0 {
        -1
    } else if offset == len - 1 {
        1
    } else {
        0
    }
}

/// Matrix slot for `cell` inside `rect`, or `None` if the cell is outside it
pub fn slot_for_cell(rect: CellRect, cell: (i32, i32)) -> Option<MatrixSlot> {
    if !rect.contains(cell) {
        return None;
    }
    let (width, height) = (rect.width(), rect.height());
    MatrixSlot::new(
        axis_role(cell.0 - rect.left, width, height),
        axis_role(cell.1 - rect.top, height, width),
    )
}

// =============================================================================
// Planning
// =============================================================================

/// Tile assignment for every cell of an autotiled rectangle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutotilePlan {
    pub group: String,
    pub rect: CellRect,
    cells: Vec<((i32, i32), String)>,
}

impl AutotilePlan {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Planned tile for `cell`; cells are stored row-major over `rect`
    pub fn get(&self, cell: (i32, i32)) -> Option<&str> {
        if !self.rect.contains(cell) {
            return None;
        }
        let index = (cell.1 - self.rect.top) as usize * self.rect.width() as usize
            + (cell.0 - self.rect.left) as usize;
        self.cells.get(index).map(|(_, tile)| tile.as_str())
    }

    /// Planned cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), CellRef)> + '_ {
        self.cells
            .iter()
            .map(|(pos, tile)| (*pos, CellRef::new(self.group.clone(), tile.clone())))
    }

    /// Write the plan into a layer
    pub fn apply(&self, layer: &mut Layer) {
        for (pos, cell) in self.iter() {
            layer.set(pos, cell);
        }
    }
}

/// Work out what an autotile rectangle would place, without touching any layer
///
/// Returns `None` when the group's matrix is incomplete or the rectangle is empty.
pub fn plan_autotile_rect(group: &TileGroup, rect: CellRect) -> Option<AutotilePlan> {
    if !group.is_matrix_complete() || rect.is_empty() {
        return None;
    }
    let matrix = group.effective_matrix();

    let mut cells = Vec::with_capacity(rect.area());
    for pos in rect.cells() {
        let slot = slot_for_cell(rect, pos)?;
        // A complete matrix resolves every slot: corners fall back to edges
        let tile = matrix.get(slot)?;
        cells.push((pos, tile.to_string()));
    }

    Some(AutotilePlan {
        group: group.name.clone(),
        rect,
        cells,
    })
}

// =============================================================================
// Application
// =============================================================================

/// Autotile `rect` on `layer` with `group`
///
/// Nothing is written unless the group's matrix is complete. Returns whether
/// the rectangle was placed.
pub fn apply_autotile_rect(layer: &mut Layer, group: &TileGroup, rect: CellRect) -> bool {
    match plan_autotile_rect(group, rect) {
        Some(plan) => {
            plan.apply(layer);
            debug!(
                "Autotiled {}x{} with '{}'",
                rect.width(),
                rect.height(),
                group.name
            );
            true
        }
        None => {
            info!(
                "Autotile skipped: matrix of '{}' is incomplete",
                group.name
            );
            false
        }
    }
}

/// Autotile `rect` on the project's current layer using the named group
pub fn autotile_current_layer(
    project: &mut MapProject,
    group: &str,
    rect: CellRect,
) -> Result<bool, TileError> {
    let plan = plan_autotile_rect(project.group(group)?, rect);
    Ok(match plan {
        Some(plan) => {
            plan.apply(project.active_layer_mut());
            true
        }
        None => false,
    })
}
