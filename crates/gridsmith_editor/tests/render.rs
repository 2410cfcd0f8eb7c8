use bevy_egui::egui::{pos2, vec2, Color32, Pos2, Rect};
use gridsmith_core::{CellRef, MapProject, TileRegion, TileSize};
use gridsmith_editor::project::EditorProject;
use gridsmith_editor::render::{DrawSurface, GridRenderer, RenderColors};
use gridsmith_editor::sheet::SpriteSheet;
use image::RgbaImage;

/// Records draw calls; textures are upload indices
#[derive(Default)]
struct Recorder {
    uploads: usize,
    blits: Vec<(usize, Rect)>,
    rects: Vec<(Rect, Color32, bool)>,
    lines: usize,
    texts: Vec<String>,
}

impl DrawSurface for Recorder {
    type Texture = usize;

    fn upload(&mut self, _name: &str, _image: &RgbaImage) -> usize {
        self.uploads += 1;
        self.uploads
    }

    fn blit(&mut self, texture: &usize, rect: Rect, _tint: Color32) {
        self.blits.push((*texture, rect));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color32, filled: bool) {
        self.rects.push((rect, color, filled));
    }

    fn draw_line(&mut self, _from: Pos2, _to: Pos2, _color: Color32) {
        self.lines += 1;
    }

    fn draw_text(&mut self, _pos: Pos2, text: &str, _color: Color32) {
        self.texts.push(text.to_string());
    }
}

fn canvas() -> Rect {
    Rect::from_min_size(pos2(0.0, 0.0), vec2(320.0, 240.0))
}

fn painted_project(with_sheet: bool) -> EditorProject {
    let mut map = MapProject::new("sheet.png", TileSize::square(16));
    let group = map.ensure_group("ground");
    group.set_tile("grass", TileRegion::new(0, 0, 16, 16));
    group.set_tile("dirt", TileRegion::new(16, 0, 16, 16));
    map.paint((0, 0), Some(CellRef::new("ground", "grass")));
    map.paint((1, 0), Some(CellRef::new("ground", "grass")));
    map.paint((2, 1), Some(CellRef::new("ground", "dirt")));
    let sheet = with_sheet
        .then(|| SpriteSheet::from_image("sheet.png", RgbaImage::new(64, 64)));
    EditorProject::with_sheet(map, None, sheet)
}

#[test]
fn test_tiles_are_scaled_once_per_region() {
    let mut project = painted_project(true);
    let mut renderer = GridRenderer::new();
    let mut surface = Recorder::default();

    let stats = renderer.render(&mut surface, &mut project, canvas());
    assert_eq!(stats.cells_drawn, 3);
    assert_eq!(stats.pruned, 0);
    assert_eq!(surface.uploads, 2);
    assert_eq!(surface.blits.len(), 3);
    assert_eq!(renderer.cache().len(), 2);
    assert!(surface.lines > 0);

    let mut second = Recorder::default();
    let stats = renderer.render(&mut second, &mut project, canvas());
    assert_eq!(stats.cells_drawn, 3);
    assert!(!stats.cache_cleared);
    assert_eq!(second.uploads, 0);
}

#[test]
fn test_zoom_change_rebuilds_cache() {
    let mut project = painted_project(true);
    let mut renderer = GridRenderer::new();
    renderer.render(&mut Recorder::default(), &mut project, canvas());

    assert!(project.viewport.set_zoom(2.0));
    let mut surface = Recorder::default();
    let stats = renderer.render(&mut surface, &mut project, canvas());
    assert!(stats.cache_cleared);
    assert_eq!(surface.uploads, 2);
    let (_, rect) = surface.blits[0];
    assert_eq!(rect.width(), 32.0);

    // Panning keeps the scaled tiles
    project.viewport.pan(vec2(5.0, 0.0), 1.0);
    let mut panned = Recorder::default();
    let stats = renderer.render(&mut panned, &mut project, canvas());
    assert!(!stats.cache_cleared);
    assert_eq!(panned.uploads, 0);
}

#[test]
fn test_deleted_tiles_are_pruned_after_drawing() {
    let mut project = painted_project(true);
    project
        .map
        .group_mut("ground")
        .unwrap()
        .delete_tile("grass");
    assert_eq!(project.map.cell_count(0), 3);

    let mut renderer = GridRenderer::new();
    let stats = renderer.render(&mut Recorder::default(), &mut project, canvas());
    assert_eq!(stats.cells_drawn, 1);
    assert_eq!(stats.pruned, 2);
    assert_eq!(project.map.cell_count(0), 1);
}

#[test]
fn test_cells_outside_the_canvas_are_kept() {
    let mut project = painted_project(true);
    project
        .map
        .paint((100, 100), Some(CellRef::new("ground", "dirt")));

    let mut renderer = GridRenderer::new();
    let stats = renderer.render(&mut Recorder::default(), &mut project, canvas());
    assert_eq!(stats.cells_drawn, 3);
    assert_eq!(project.map.cell_count(0), 4);
}

#[test]
fn test_missing_sheet_draws_placeholders() {
    let mut project = painted_project(false);
    let mut renderer = GridRenderer::new();
    let mut surface = Recorder::default();

    let stats = renderer.render(&mut surface, &mut project, canvas());
    assert_eq!(stats.cells_drawn, 3);
    assert_eq!(surface.uploads, 0);
    let placeholders = surface
        .rects
        .iter()
        .filter(|(_, color, filled)| *filled && *color == RenderColors::default().missing_sheet)
        .count();
    assert_eq!(placeholders, 3);
}

#[test]
fn test_tile_mode_draws_the_sheet() {
    let mut project = painted_project(true);
    project.tile_mode = true;
    let mut renderer = GridRenderer::new();
    let mut surface = Recorder::default();

    renderer.render(&mut surface, &mut project, canvas());
    assert_eq!(surface.uploads, 1);
    assert_eq!(surface.blits.len(), 1);
    // One outline per stored tile
    assert_eq!(surface.rects.len(), 2);
    assert!(surface.texts.iter().any(|t| t.contains("name: ")));

    // The sheet texture is reused by later frames
    let mut again = Recorder::default();
    renderer.render(&mut again, &mut project, canvas());
    assert_eq!(again.uploads, 0);
}
