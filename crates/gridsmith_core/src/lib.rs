//! Core data structures for gridsmith
//!
//! This crate provides the editor-independent model of a tile map:
//! - `TileRegion` / `TileSize` - sprite-sheet geometry
//! - `TileGroup` - named tiles plus a 3x3 autotile matrix
//! - `Layer` - a sparse grid of placed tile references
//! - `MapProject` - the canonical project shape shared by every file version
//! - `format` - versioned `.world` load/save

mod error;
pub mod format;
mod grid;
mod project;
mod region;
mod tile_group;

pub use error::{FormatError, TileError};
pub use grid::{CellRect, CellRef, Layer};
pub use project::{MapProject, DEFAULT_GROUP, FIRST_LAYER_NAME};
pub use region::{TileRegion, TileSize};
pub use tile_group::{EffectiveMatrix, MatrixSlot, TileGroup};

/// File extension used for saved projects
pub const PROJECT_EXTENSION: &str = "world";
