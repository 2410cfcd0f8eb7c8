//! Rectangle tools for gridsmith maps
//!
//! This crate provides the two rectangle tools of the editor:
//! - Plain fill: every cell of the rectangle gets the same tile (or is erased)
//! - Autotile: each cell gets the tile for its role in the rectangle
//!   (corner, edge or center), read from the group's 3x3 matrix
//!
//! # Example
//!
//! ```rust,ignore
//! use gridsmith_autotile::{apply_autotile_rect, plan_autotile_rect};
//! use gridsmith_core::{CellRect, Layer, MatrixSlot, TileGroup};
//!
//! let mut group = TileGroup::new("ground");
//! group.set_matrix_slot(MatrixSlot::CENTER, "mid");
//! // ... the four edges
//!
//! let mut layer = Layer::new();
//! let rect = CellRect::from_corners((0, 0), (3, 3));
//! if let Some(plan) = plan_autotile_rect(&group, rect) {
//!     plan.apply(&mut layer);
//! }
//! ```

pub mod fill;
pub mod rect;

pub use fill::fill_rect;
pub use rect::{
    apply_autotile_rect, autotile_current_layer, plan_autotile_rect, slot_for_cell, AutotilePlan,
    SlotRole,
};
