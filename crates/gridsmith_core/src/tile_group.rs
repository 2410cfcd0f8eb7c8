//! Tile groups and the 3x3 autotile matrix

use crate::error::TileError;
use crate::region::TileRegion;
use std::collections::HashMap;

/// One of the nine relative positions of the autotile matrix
///
/// `dx` runs west (-1) to east (1), `dy` runs north (-1) to south (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatrixSlot {
    dx: i8,
    dy: i8,
}

impl MatrixSlot {
    pub const TOP_LEFT: MatrixSlot = MatrixSlot { dx: -1, dy: -1 };
    pub const TOP: MatrixSlot = MatrixSlot { dx: 0, dy: -1 };
    pub const TOP_RIGHT: MatrixSlot = MatrixSlot { dx: 1, dy: -1 };
    pub const LEFT: MatrixSlot = MatrixSlot { dx: -1, dy: 0 };
    pub const CENTER: MatrixSlot = MatrixSlot { dx: 0, dy: 0 };
    pub const RIGHT: MatrixSlot = MatrixSlot { dx: 1, dy: 0 };
    pub const BOTTOM_LEFT: MatrixSlot = MatrixSlot { dx: -1, dy: 1 };
    pub const BOTTOM: MatrixSlot = MatrixSlot { dx: 0, dy: 1 };
    pub const BOTTOM_RIGHT: MatrixSlot = MatrixSlot { dx: 1, dy: 1 };

    /// All slots in row-major order (north row first)
    pub const ALL: [MatrixSlot; 9] = [
        Self::TOP_LEFT,
        Self::TOP,
        Self::TOP_RIGHT,
        Self::LEFT,
        Self::CENTER,
        Self::RIGHT,
        Self::BOTTOM_LEFT,
        Self::BOTTOM,
        Self::BOTTOM_RIGHT,
    ];

    /// Slots that must be filled before autotiling is allowed
    pub const REQUIRED: [MatrixSlot; 5] = [
        Self::CENTER,
        Self::TOP,
        Self::BOTTOM,
        Self::LEFT,
        Self::RIGHT,
    ];

    /// Returns `None` unless both offsets are in `-1..=1`
    pub fn new(dx: i32, dy: i32) -> Option<Self> {
        if (-1..=1).contains(&dx) && (-1..=1).contains(&dy) {
            Some(Self {
                dx: dx as i8,
                dy: dy as i8,
            })
        } else {
            None
        }
    }

    pub fn dx(&self) -> i32 {
        self.dx as i32
    }

    pub fn dy(&self) -> i32 {
        self.dy as i32
    }

    pub fn is_corner(&self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    pub fn is_edge(&self) -> bool {
        (self.dx == 0) != (self.dy == 0)
    }

    pub fn is_center(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// The slot a corner reads from when it is empty: the edge on the same side
    pub fn fallback(&self) -> Option<MatrixSlot> {
        if self.is_corner() {
            Some(MatrixSlot { dx: self.dx, dy: 0 })
        } else {
            None
        }
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        ((self.dy + 1) * 3 + (self.dx + 1)) as usize
    }

    /// `"x,y"` key used in saved files
    pub fn key(&self) -> String {
        format!("{},{}", self.dx, self.dy)
    }

    pub fn parse_key(key: &str) -> Option<Self> {
        let (x, y) = key.split_once(',')?;
        let x = x.trim().parse::<f64>().ok()?;
        let y = y.trim().parse::<f64>().ok()?;
        Self::new(x as i32, y as i32)
    }
}

impl std::fmt::Display for MatrixSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

/// The matrix as read through the corner fallback rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveMatrix {
    slots: [Option<String>; 9],
}

impl EffectiveMatrix {
    pub fn get(&self, slot: MatrixSlot) -> Option<&str> {
        self.slots[slot.index()].as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MatrixSlot, Option<&str>)> {
        MatrixSlot::ALL
            .iter()
            .map(move |slot| (*slot, self.slots[slot.index()].as_deref()))
    }
}

/// A named set of tiles with an optional autotile matrix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileGroup {
    pub name: String,
    tiles: HashMap<String, TileRegion>,
    matrix: [Option<String>; 9],
    /// Where the palette panel for this group is drawn
    pub position: [f32; 2],
    /// Whether the palette shows the matrix editor for this group
    pub show_matrix: bool,
}

impl TileGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Insert or overwrite a tile
    pub fn set_tile(&mut self, id: impl Into<String>, region: TileRegion) {
        self.tiles.insert(id.into(), region);
    }

    pub fn get_tile(&self, id: &str) -> Result<TileRegion, TileError> {
        self.tiles
            .get(id)
            .copied()
            .ok_or_else(|| TileError::NotFound {
                group: self.name.clone(),
                tile: id.to_string(),
            })
    }

    pub fn has_tile(&self, id: &str) -> bool {
        self.tiles.contains_key(id)
    }

    /// Remove a tile. Matrix slots and placed cells that reference it are left
    /// dangling and get dropped when they are next read.
    pub fn delete_tile(&mut self, id: &str) -> Option<TileRegion> {
        self.tiles.remove(id)
    }

    /// Rename a tile, keeping matrix slots pointed at it
    pub fn rename_tile(&mut self, from: &str, to: impl Into<String>) -> Result<(), TileError> {
        let region = self.get_tile(from)?;
        let to = to.into();
        self.tiles.remove(from);
        for slot in self.matrix.iter_mut() {
            if slot.as_deref() == Some(from) {
                *slot = Some(to.clone());
            }
        }
        self.tiles.insert(to, region);
        Ok(())
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile ids in sorted order
    pub fn tile_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.tiles.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn tiles(&self) -> impl Iterator<Item = (&str, TileRegion)> {
        self.tiles.iter().map(|(id, region)| (id.as_str(), *region))
    }

    pub fn set_matrix_slot(&mut self, slot: MatrixSlot, id: impl Into<String>) {
        self.matrix[slot.index()] = Some(id.into());
    }

    pub fn clear_matrix_slot(&mut self, slot: MatrixSlot) -> Option<String> {
        self.matrix[slot.index()].take()
    }

    /// Raw slot value, without the corner fallback
    pub fn matrix_slot(&self, slot: MatrixSlot) -> Option<&str> {
        self.matrix[slot.index()].as_deref()
    }

    /// Read the matrix through the fallback rule: an empty corner takes the
    /// value of the edge on its own side of the same row of the matrix
    /// (`(dx, dy)` reads `(dx, 0)`). Edges and center never fall back.
    pub fn effective_matrix(&self) -> EffectiveMatrix {
        let mut slots: [Option<String>; 9] = Default::default();
        for slot in MatrixSlot::ALL {
            let value = self.matrix[slot.index()].clone().or_else(|| {
                slot.fallback()
                    .and_then(|edge| self.matrix[edge.index()].clone())
            });
            slots[slot.index()] = value;
        }
        EffectiveMatrix { slots }
    }

    /// True when the center and all four edges are set
    pub fn is_matrix_complete(&self) -> bool {
        MatrixSlot::REQUIRED
            .iter()
            .all(|slot| self.matrix[slot.index()].is_some())
    }
}
