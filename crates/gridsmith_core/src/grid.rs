//! Sparse layered grid addressing

use std::collections::HashMap;

/// Reference from a grid cell to a tile in some group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub group: String,
    pub tile: String,
}

impl CellRef {
    pub fn new(group: impl Into<String>, tile: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            tile: tile.into(),
        }
    }
}

/// A rectangle of grid cells, half-open on the right and bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl CellRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The rectangle covering both cells inclusively, whatever the drag direction
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            left: a.0.min(b.0),
            top: a.1.min(b.1),
            right: a.0.max(b.0) + 1,
            bottom: a.1.max(b.1) + 1,
        }
    }

    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn contains(&self, cell: (i32, i32)) -> bool {
        cell.0 >= self.left && cell.0 < self.right && cell.1 >= self.top && cell.1 < self.bottom
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (left, right) = (self.left, self.right);
        (self.top..self.bottom).flat_map(move |y| (left..right).map(move |x| (x, y)))
    }
}

/// One sparse layer of placed tiles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    cells: HashMap<(i32, i32), CellRef>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: (i32, i32)) -> Option<&CellRef> {
        self.cells.get(&cell)
    }

    /// Place a tile, returning what was there before
    pub fn set(&mut self, cell: (i32, i32), tile: CellRef) -> Option<CellRef> {
        self.cells.insert(cell, tile)
    }

    pub fn erase(&mut self, cell: (i32, i32)) -> Option<CellRef> {
        self.cells.remove(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &CellRef)> {
        self.cells.iter().map(|(pos, tile)| (*pos, tile))
    }

    /// Cells in sorted `(y, x)` order, for deterministic output
    pub fn sorted(&self) -> Vec<((i32, i32), &CellRef)> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_unstable_by_key(|((x, y), _)| (*y, *x));
        cells
    }

    /// Placed cells inside `rect`
    ///
    /// Walks whichever is smaller: the rectangle or the layer.
    pub fn cells_in(&self, rect: CellRect) -> Vec<((i32, i32), &CellRef)> {
        if rect.area() <= self.cells.len() {
            rect.cells()
                .filter_map(|pos| self.cells.get(&pos).map(|tile| (pos, tile)))
                .collect()
        } else {
            self.iter().filter(|(pos, _)| rect.contains(*pos)).collect()
        }
    }

    /// Remove the given cells. Callers collect first, then prune, so the map
    /// is never mutated while it is being iterated.
    pub fn prune(&mut self, dangling: &[(i32, i32)]) -> usize {
        dangling
            .iter()
            .filter(|pos| self.cells.remove(pos).is_some())
            .count()
    }

    /// Drop every cell for which `keep` returns false
    pub fn retain_valid(&mut self, keep: impl Fn(&CellRef) -> bool) -> usize {
        let dangling: Vec<(i32, i32)> = self
            .iter()
            .filter(|(_, tile)| !keep(tile))
            .map(|(pos, _)| pos)
            .collect();
        self.prune(&dangling)
    }
}
