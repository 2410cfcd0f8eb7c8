//! Screen ↔ grid addressing under pan and zoom

use bevy_egui::egui::{pos2, vec2, Pos2, Rect, Vec2};
use gridsmith_core::{CellRect, TileSize};

/// Screen points this close to a cell edge count as on it (absorbs f32 rounding)
const SNAP_PIXELS: f64 = 1.0 / 32.0;

pub const DEFAULT_ZOOM_RANGE: (f32, f32) = (0.25, 15.0);

/// Pan/zoom transform of the map canvas
///
/// `offset` is kept in unzoomed sheet pixels. The bold point (screen position
/// of cell (0, 0)) is cached and recomputed on every transform change.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    offset: Vec2,
    zoom: f32,
    tile_size: TileSize,
    zoom_range: (f32, f32),
    origin: Pos2,
    bold: Pos2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(TileSize::default())
    }
}

impl Viewport {
    pub fn new(tile_size: TileSize) -> Self {
        let mut viewport = Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            tile_size,
            zoom_range: DEFAULT_ZOOM_RANGE,
            origin: Pos2::ZERO,
            bold: Pos2::ZERO,
        };
        viewport.update_bold();
        viewport
    }

    pub fn with_zoom_range(mut self, min: f32, max: f32) -> Self {
        self.set_zoom_range(min, max);
        self
    }

    fn update_bold(&mut self) {
        self.bold = self.origin + self.offset * self.zoom;
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    pub fn zoom_range(&self) -> (f32, f32) {
        self.zoom_range
    }

    /// Screen position of cell (0, 0)
    pub fn bold_point(&self) -> Pos2 {
        self.bold
    }

    /// On-screen size of one cell
    pub fn cell_size(&self) -> Vec2 {
        vec2(
            self.tile_size.width() as f32 * self.zoom,
            self.tile_size.height() as f32 * self.zoom,
        )
    }

    // === Transform changes ===

    /// Move the canvas' top-left corner (window resize, panel drag)
    pub fn set_origin(&mut self, origin: Pos2) {
        if self.origin != origin {
            self.origin = origin;
            self.update_bold();
        }
    }

    /// Drag the map by a screen-space delta
    pub fn pan(&mut self, delta: Vec2, sensitivity: f32) {
        self.offset += delta * sensitivity / self.zoom;
        self.update_bold();
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.update_bold();
    }

    pub fn set_zoom_range(&mut self, min: f32, max: f32) {
        let min = min.max(f32::EPSILON);
        self.zoom_range = (min, max.max(min));
        self.set_zoom(self.zoom);
    }

    /// Set the zoom (clamped), returning whether it changed
    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        let zoom = zoom.clamp(self.zoom_range.0, self.zoom_range.1);
        if zoom == self.zoom {
            return false;
        }
        self.zoom = zoom;
        self.update_bold();
        true
    }

    /// Add `amount` to the zoom, keeping the map point under `anchor` in place
    pub fn zoom_at(&mut self, anchor: Pos2, amount: f32) -> bool {
        let before = self.screen_to_world(anchor);
        if !self.set_zoom(self.zoom + amount) {
            return false;
        }
        self.offset = (anchor - self.origin) / self.zoom - before;
        self.update_bold();
        true
    }

    pub fn set_tile_size(&mut self, tile_size: TileSize) {
        self.tile_size = tile_size;
    }

    pub fn scale_tile_up(&mut self) -> TileSize {
        self.tile_size = self.tile_size.scale_up();
        self.tile_size
    }

    pub fn scale_tile_down(&mut self) -> TileSize {
        self.tile_size = self.tile_size.scale_down();
        self.tile_size
    }

    // === Addressing ===

    /// Unzoomed map position (relative to cell (0, 0)) under a screen point
    fn screen_to_world(&self, pos: Pos2) -> Vec2 {
        (pos - self.origin) / self.zoom - self.offset
    }

    /// Grid cell containing a screen point
    pub fn screen_to_cell(&self, pos: Pos2) -> (i32, i32) {
        let cell = self.cell_size();
        let rel = pos - self.bold;
        (snap_floor(rel.x, cell.x), snap_floor(rel.y, cell.y))
    }

    /// Screen position of a cell's top-left corner
    pub fn cell_to_screen(&self, cell: (i32, i32)) -> Pos2 {
        let size = self.cell_size();
        pos2(
            self.bold.x + cell.0 as f32 * size.x,
            self.bold.y + cell.1 as f32 * size.y,
        )
    }

    /// Screen rectangle covered by a cell
    pub fn cell_rect(&self, cell: (i32, i32)) -> Rect {
        Rect::from_min_size(self.cell_to_screen(cell), self.cell_size())
    }

    /// Screen rectangle covered by a block of cells
    pub fn cells_rect(&self, cells: CellRect) -> Rect {
        Rect::from_min_max(
            self.cell_to_screen((cells.left, cells.top)),
            self.cell_to_screen((cells.right, cells.bottom)),
        )
    }

    /// Cells touching `area`, widened by one cell on every side
    pub fn visible_cell_range(&self, area: Rect) -> CellRect {
        let (left, top) = self.screen_to_cell(area.min);
        let (right, bottom) = self.screen_to_cell(area.max);
        CellRect::new(left - 1, top - 1, right + 2, bottom + 2)
    }
}

/// `floor(offset / cell)`, except offsets within [`SNAP_PIXELS`] of a cell edge land on it
fn snap_floor(offset: f32, cell: f32) -> i32 {
    let (offset, cell) = (offset as f64, cell as f64);
    let nearest = (offset / cell).round();
    if (offset - nearest * cell).abs() < SNAP_PIXELS {
        nearest as i32
    } else {
        (offset / cell).floor() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        let mut vp = Viewport::new(TileSize::square(16));
        vp.set_origin(pos2(100.0, 50.0));
        vp
    }

    #[test]
    fn test_bold_point_follows_transform() {
        let mut vp = viewport();
        assert_eq!(vp.bold_point(), pos2(100.0, 50.0));

        vp.pan(vec2(10.0, -20.0), 1.0);
        assert_eq!(vp.bold_point(), pos2(110.0, 30.0));

        vp.set_zoom(2.0);
        // offset stays fixed in map pixels, so it doubles on screen
        assert_eq!(vp.bold_point(), pos2(120.0, 10.0));
    }

    #[test]
    fn test_screen_to_cell() {
        let vp = viewport();
        assert_eq!(vp.screen_to_cell(pos2(100.0, 50.0)), (0, 0));
        assert_eq!(vp.screen_to_cell(pos2(115.9, 65.9)), (0, 0));
        assert_eq!(vp.screen_to_cell(pos2(116.0, 66.0)), (1, 1));
        assert_eq!(vp.screen_to_cell(pos2(99.0, 49.0)), (-1, -1));
        assert_eq!(vp.screen_to_cell(pos2(100.0 - 33.0, 50.0)), (-3, 0));
    }

    #[test]
    fn test_screen_to_cell_floors_near_edges_of_large_cells() {
        let mut vp = Viewport::new(TileSize::square(64));
        vp.set_zoom(15.0);
        assert_eq!(vp.cell_size().x, 960.0);
        assert_eq!(vp.screen_to_cell(pos2(959.5, 0.0)), (0, 0));
        assert_eq!(vp.screen_to_cell(pos2(959.9, 959.0)), (0, 0));
        assert_eq!(vp.screen_to_cell(pos2(960.0, 0.0)), (1, 0));
        assert_eq!(vp.screen_to_cell(pos2(-0.5, 0.0)), (-1, 0));
    }

    #[test]
    fn test_cell_round_trip_under_odd_transforms() {
        let mut vp = viewport();
        for (zoom, pan, size) in [
            (1.0, vec2(0.0, 0.0), 16),
            (0.3, vec2(-17.3, 4.1), 16),
            (2.7, vec2(123.4, -56.7), 24),
            (13.1, vec2(0.01, 999.9), 5),
        ] {
            vp.set_tile_size(TileSize::square(size));
            vp.set_zoom(zoom);
            vp.pan(pan, 1.0);
            for x in -40..40 {
                for y in [-1000, -7, 0, 3, 512] {
                    let cell = (x, y);
                    assert_eq!(vp.screen_to_cell(vp.cell_to_screen(cell)), cell);
                }
            }
        }
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = viewport();
        assert!(vp.set_zoom(100.0));
        assert_eq!(vp.zoom(), 15.0);
        assert!(!vp.set_zoom(20.0));
        vp.set_zoom(0.0);
        assert_eq!(vp.zoom(), 0.25);
    }

    #[test]
    fn test_zoom_at_keeps_anchor_cell() {
        let mut vp = viewport();
        let anchor = pos2(300.0, 200.0);
        let before = vp.screen_to_cell(anchor);
        assert!(vp.zoom_at(anchor, 1.0));
        assert_eq!(vp.zoom(), 2.0);
        assert_eq!(vp.screen_to_cell(anchor), before);
    }

    #[test]
    fn test_visible_range_has_slack() {
        let vp = viewport();
        let area = Rect::from_min_size(pos2(100.0, 50.0), vec2(64.0, 32.0));
        // 4x2 cells on screen, plus one cell of slack on every side
        let range = vp.visible_cell_range(area);
        assert_eq!(range, CellRect::new(-1, -1, 6, 4));
    }

    #[test]
    fn test_tile_scaling_floors_at_one() {
        let mut vp = Viewport::new(TileSize::square(2));
        assert_eq!(vp.scale_tile_down(), TileSize::square(1));
        assert_eq!(vp.scale_tile_down(), TileSize::square(1));
        assert_eq!(vp.scale_tile_up(), TileSize::square(2));
    }
}
