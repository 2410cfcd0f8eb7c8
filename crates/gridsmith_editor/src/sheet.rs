//! Sprite sheet image and the tile-mode sheet view
//!
//! Tile mode shows the whole sheet instead of the map. A rubber-band selection
//! in sheet pixels, plus a group and a name typed into two text fields, becomes
//! a tile (accept) or a run of grid-aligned tiles (export).

use bevy::log::{info, warn};
use bevy_egui::egui::{pos2, Pos2, Rect, Vec2};
use gridsmith_core::{CellRef, MapProject, TileRegion, TileSize, DEFAULT_GROUP};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Sheet zoom bounds in tile mode
pub const SHEET_ZOOM_RANGE: (f32, f32) = (1.0, 15.0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    Io(String),
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetError::Io(e) => write!(f, "Could not read sprite sheet: {}", e),
        }
    }
}

impl std::error::Error for SheetError {}

// =============================================================================
// Sprite sheet
// =============================================================================

/// A decoded sprite sheet with sub-region extraction
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    path: PathBuf,
    image: RgbaImage,
}

impl SpriteSheet {
    pub fn open(path: &Path) -> Result<Self, SheetError> {
        let image = image::open(path)
            .map_err(|e| SheetError::Io(format!("{}: {}", path.display(), e)))?
            .to_rgba8();
        info!(
            "Loaded sprite sheet {:?} ({}x{})",
            path,
            image.width(),
            image.height()
        );
        Ok(Self {
            path: path.to_path_buf(),
            image,
        })
    }

    pub fn from_image(path: impl Into<PathBuf>, image: RgbaImage) -> Self {
        Self {
            path: path.into(),
            image,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixels of one region, clipped to the sheet; `None` if nothing is left
    pub fn tile_image(&self, region: TileRegion) -> Option<RgbaImage> {
        let region = region.clamped_to(self.width(), self.height());
        if region.is_empty() {
            return None;
        }
        Some(
            imageops::crop_imm(&self.image, region.x, region.y, region.width, region.height)
                .to_image(),
        )
    }

    /// A region scaled to `width`x`height` with nearest-neighbour sampling
    pub fn scaled_tile(&self, region: TileRegion, width: u32, height: u32) -> Option<RgbaImage> {
        let tile = self.tile_image(region)?;
        Some(imageops::resize(
            &tile,
            width.max(1),
            height.max(1),
            FilterType::Nearest,
        ))
    }
}

// =============================================================================
// Tile mode view
// =============================================================================

/// Which text field typed characters go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetField {
    #[default]
    Name,
    Group,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetView {
    zoom: f32,
    offset: Vec2,
    origin: Pos2,
    drag: Option<((u32, u32), (u32, u32))>,
    selection: Option<TileRegion>,
    pub group_field: String,
    pub name_field: String,
    focus: SheetField,
}

impl Default for SheetView {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
            origin: Pos2::ZERO,
            drag: None,
            selection: None,
            group_field: String::new(),
            name_field: String::new(),
            focus: SheetField::default(),
        }
    }
}

impl SheetView {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_origin(&mut self, origin: Pos2) {
        self.origin = origin;
    }

    pub fn zoom_by(&mut self, amount: f32) -> bool {
        let zoom = (self.zoom + amount).clamp(SHEET_ZOOM_RANGE.0, SHEET_ZOOM_RANGE.1);
        let changed = zoom != self.zoom;
        self.zoom = zoom;
        changed
    }

    pub fn pan(&mut self, delta: Vec2, sensitivity: f32) {
        self.offset += delta * sensitivity / self.zoom;
    }

    /// Sheet pixel under a screen point, clamped to the sheet
    pub fn screen_to_sheet(&self, pos: Pos2, sheet_size: (u32, u32)) -> (u32, u32) {
        let p = (pos - self.origin) / self.zoom - self.offset;
        (
            p.x.clamp(0.0, sheet_size.0 as f32) as u32,
            p.y.clamp(0.0, sheet_size.1 as f32) as u32,
        )
    }

    pub fn sheet_to_screen(&self, x: f32, y: f32) -> Pos2 {
        self.origin + (Vec2::new(x, y) + self.offset) * self.zoom
    }

    /// Screen rectangle of a sheet region
    pub fn region_rect(&self, region: TileRegion) -> Rect {
        Rect::from_min_max(
            self.sheet_to_screen(region.x as f32, region.y as f32),
            self.sheet_to_screen(region.right() as f32, region.bottom() as f32),
        )
    }

    /// Screen rectangle of the whole sheet
    pub fn sheet_rect(&self, sheet_size: (u32, u32)) -> Rect {
        Rect::from_min_max(
            self.sheet_to_screen(0.0, 0.0),
            self.sheet_to_screen(sheet_size.0 as f32, sheet_size.1 as f32),
        )
    }

    // === Selection ===

    pub fn begin_selection(&mut self, px: (u32, u32)) {
        self.drag = Some((px, px));
        self.selection = None;
    }

    pub fn drag_selection(&mut self, px: (u32, u32)) {
        if let Some((_, end)) = self.drag.as_mut() {
            *end = px;
        }
    }

    /// Finish the rubber band; the selection is normalized whatever the drag direction
    pub fn end_selection(&mut self, px: (u32, u32)) -> Option<TileRegion> {
        let (start, _) = self.drag.take()?;
        let region = TileRegion::from_corners(start, px);
        self.selection = (!region.is_empty()).then_some(region);
        self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The committed selection
    pub fn selection(&self) -> Option<TileRegion> {
        self.selection
    }

    /// What to highlight: the rubber band while dragging, else the selection
    pub fn visible_selection(&self) -> Option<TileRegion> {
        match self.drag {
            Some((start, end)) => Some(TileRegion::from_corners(start, end)),
            None => self.selection,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    // === Text fields ===

    pub fn focus(&self) -> SheetField {
        self.focus
    }

    pub fn switch_field(&mut self) {
        self.focus = match self.focus {
            SheetField::Name => SheetField::Group,
            SheetField::Group => SheetField::Name,
        };
    }

    fn active_field(&mut self) -> &mut String {
        match self.focus {
            SheetField::Name => &mut self.name_field,
            SheetField::Group => &mut self.group_field,
        }
    }

    pub fn push_text(&mut self, text: &str) {
        self.active_field()
            .extend(text.chars().filter(|c| !c.is_control()));
    }

    pub fn pop_char(&mut self) {
        self.active_field().pop();
    }

    fn target_group(&self) -> &str {
        if self.group_field.is_empty() {
            DEFAULT_GROUP
        } else {
            &self.group_field
        }
    }

    // === Operations ===

    /// Store the selection as one tile, overwriting any tile of the same name
    pub fn accept(&mut self, project: &mut MapProject) -> Option<CellRef> {
        let region = self.selection?;
        if self.name_field.is_empty() {
            warn!("Tile needs a name before it can be stored");
            return None;
        }
        let cell = CellRef::new(self.target_group(), self.name_field.clone());
        project
            .ensure_group(&cell.group)
            .set_tile(cell.tile.clone(), region);
        info!("Stored tile '{}' in '{}' at {:?}", cell.tile, cell.group, region);
        self.selection = None;
        Some(cell)
    }

    /// Slice the selection into tile-sized pieces on the tile grid
    ///
    /// A piece starts at every sheet pixel inside the selection whose
    /// coordinates are multiples of the tile size. Pieces are named
    /// `"{name} - {x}x{y}"`. Returns how many tiles were stored.
    pub fn export(&mut self, project: &mut MapProject) -> usize {
        let Some(region) = self.selection else {
            return 0;
        };
        if self.name_field.is_empty() {
            warn!("Tiles need a name before they can be exported");
            return 0;
        }
        let pieces = export_pieces(region, project.tile_size);
        let group_name = self.target_group().to_string();
        let group = project.ensure_group(&group_name);
        for piece in &pieces {
            group.set_tile(
                format!("{} - {}x{}", self.name_field, piece.x, piece.y),
                *piece,
            );
        }
        info!("Exported {} tiles into '{}'", pieces.len(), group_name);
        self.selection = None;
        pieces.len()
    }

    pub fn cancel(&mut self) {
        self.drag = None;
        self.selection = None;
        self.group_field.clear();
        self.name_field.clear();
    }

    /// Load an existing tile back into the selection and the name fields
    pub fn edit_tile(&mut self, project: &MapProject, cell: &CellRef) -> bool {
        let Some(region) = project.resolve(cell) else {
            return false;
        };
        self.drag = None;
        self.selection = Some(region);
        self.group_field = cell.group.clone();
        self.name_field = cell.tile.clone();
        true
    }
}

/// Grid-aligned tile regions starting inside `selection`
pub fn export_pieces(selection: TileRegion, tile_size: TileSize) -> Vec<TileRegion> {
    let (tw, th) = (tile_size.width(), tile_size.height());
    let first_x = selection.x.div_ceil(tw) * tw;
    let first_y = selection.y.div_ceil(th) * th;
    let mut pieces = Vec::new();
    for x in (first_x..selection.right()).step_by(tw as usize) {
        for y in (first_y..selection.bottom()).step_by(th as usize) {
            pieces.push(TileRegion::new(x, y, tw, th));
        }
    }
    pieces
}

/// Screen position of the text fields' top-left corner inside the canvas
pub fn fields_anchor(canvas: Rect) -> Pos2 {
    pos2(canvas.left() + 8.0, canvas.top() + 8.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn test_tile_image_is_clipped() {
        let sheet = SpriteSheet::from_image("sheet.png", checker(16, 16));
        let tile = sheet.tile_image(TileRegion::new(12, 12, 8, 8)).unwrap();
        assert_eq!(tile.dimensions(), (4, 4));
        assert!(sheet.tile_image(TileRegion::new(16, 0, 4, 4)).is_none());
        assert!(sheet.tile_image(TileRegion::new(u32::MAX, 0, 16, 16)).is_none());
    }

    #[test]
    fn test_scaled_tile_keeps_pixels_crisp() {
        let sheet = SpriteSheet::from_image("sheet.png", checker(16, 16));
        let scaled = sheet.scaled_tile(TileRegion::new(0, 0, 8, 8), 32, 32).unwrap();
        assert_eq!(scaled.dimensions(), (32, 32));
        assert_eq!(scaled.get_pixel(0, 0), &image::Rgba([255, 255, 255, 255]));
        assert_eq!(scaled.get_pixel(20, 0), &image::Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_selection_is_normalized() {
        let mut view = SheetView::default();
        view.begin_selection((40, 30));
        view.drag_selection((20, 35));
        assert_eq!(view.visible_selection(), Some(TileRegion::new(20, 30, 20, 5)));
        let region = view.end_selection((10, 10));
        assert_eq!(region, Some(TileRegion::new(10, 10, 30, 20)));
        assert!(!view.is_dragging());
    }

    #[test]
    fn test_empty_drag_selects_nothing() {
        let mut view = SheetView::default();
        view.begin_selection((5, 5));
        assert_eq!(view.end_selection((5, 9)), None);
        assert!(!view.has_selection());
    }

    #[test]
    fn test_screen_to_sheet_clamps() {
        let mut view = SheetView::default();
        view.set_origin(pos2(100.0, 100.0));
        view.zoom_by(1.0);
        assert_eq!(view.screen_to_sheet(pos2(120.0, 110.0), (64, 64)), (10, 5));
        assert_eq!(view.screen_to_sheet(pos2(0.0, 1000.0), (64, 64)), (0, 64));
    }

    #[test]
    fn test_sheet_zoom_range() {
        let mut view = SheetView::default();
        assert!(!view.zoom_by(-3.0));
        assert_eq!(view.zoom(), 1.0);
        view.zoom_by(100.0);
        assert_eq!(view.zoom(), 15.0);
    }

    #[test]
    fn test_fields_take_typed_text() {
        let mut view = SheetView::default();
        view.push_text("grass");
        view.switch_field();
        view.push_text("ground\n");
        view.pop_char();
        assert_eq!(view.name_field, "grass");
        assert_eq!(view.group_field, "groun");
    }

    #[test]
    fn test_accept_stores_tile() {
        let mut project = MapProject::default();
        let mut view = SheetView::default();
        view.begin_selection((0, 0));
        view.end_selection((16, 16));
        view.push_text("grass");

        let cell = view.accept(&mut project).unwrap();
        assert_eq!(cell, CellRef::new("all", "grass"));
        assert_eq!(project.resolve(&cell), Some(TileRegion::new(0, 0, 16, 16)));
        assert!(!view.has_selection());

        // Same name again overwrites
        view.begin_selection((16, 0));
        view.end_selection((32, 8));
        view.accept(&mut project);
        assert_eq!(project.resolve(&cell), Some(TileRegion::new(16, 0, 16, 8)));
        assert_eq!(project.group("all").unwrap().tile_count(), 1);
    }

    #[test]
    fn test_accept_needs_name() {
        let mut project = MapProject::default();
        let mut view = SheetView::default();
        view.begin_selection((0, 0));
        view.end_selection((16, 16));
        assert!(view.accept(&mut project).is_none());
        assert!(view.has_selection());
    }

    #[test]
    fn test_export_slices_on_tile_grid() {
        let mut project = MapProject::new("sheet.png", TileSize::square(16));
        let mut view = SheetView::default();
        view.begin_selection((8, 0));
        view.end_selection((48, 20));
        view.switch_field();
        view.push_text("water");
        view.switch_field();
        view.push_text("wave");

        assert_eq!(view.export(&mut project), 4);
        let group = project.group("water").unwrap();
        assert_eq!(
            group.tile_ids(),
            vec!["wave - 16x0", "wave - 16x16", "wave - 32x0", "wave - 32x16"]
        );
        assert_eq!(
            group.get_tile("wave - 32x16"),
            Ok(TileRegion::new(32, 16, 16, 16))
        );
    }

    #[test]
    fn test_export_pieces_start_inside_selection() {
        let pieces = export_pieces(TileRegion::new(0, 0, 33, 1), TileSize::square(16));
        let xs: Vec<u32> = pieces.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 16, 32]);
    }

    #[test]
    fn test_edit_tile_loads_selection() {
        let mut project = MapProject::default();
        project
            .ensure_group("trees")
            .set_tile("oak", TileRegion::new(32, 0, 16, 32));
        let mut view = SheetView::default();
        assert!(view.edit_tile(&project, &CellRef::new("trees", "oak")));
        assert_eq!(view.selection(), Some(TileRegion::new(32, 0, 16, 32)));
        assert_eq!(view.group_field, "trees");
        assert_eq!(view.name_field, "oak");
        assert!(!view.edit_tile(&project, &CellRef::new("trees", "pine")));
    }

    #[test]
    fn test_cancel_clears_everything() {
        let mut view = SheetView::default();
        view.begin_selection((0, 0));
        view.end_selection((4, 4));
        view.push_text("x");
        view.cancel();
        assert!(!view.has_selection());
        assert!(view.name_field.is_empty());
    }
}
