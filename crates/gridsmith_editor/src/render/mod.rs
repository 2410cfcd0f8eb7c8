//! Map and sheet rendering over an abstract draw surface
//!
//! Each frame the visible cell range is re-derived from the viewport, so the
//! renderer keeps no per-cell state beyond the scaled tile cache.

pub mod cache;
pub mod viewport;

pub use cache::TileCache;
pub use viewport::Viewport;

use bevy_egui::egui::{pos2, Color32, Pos2, Rect};
use gridsmith_core::{MapProject, TileRegion};
use image::RgbaImage;
use std::path::PathBuf;

use crate::project::EditorProject;
use crate::sheet::{fields_anchor, SheetField, SpriteSheet};
use crate::tools::{Preview, Tool};

/// Grid lines are skipped below this on-screen cell size
const MIN_GRID_CELL: f32 = 4.0;
const TEXT_LINE_HEIGHT: f32 = 18.0;

/// Drawing capabilities the renderer needs from the frontend
pub trait DrawSurface {
    type Texture;

    /// Turn pixels into something [`DrawSurface::blit`] can draw
    fn upload(&mut self, name: &str, image: &RgbaImage) -> Self::Texture;
    /// Draw a texture stretched over `rect`, multiplied by `tint`
    fn blit(&mut self, texture: &Self::Texture, rect: Rect, tint: Color32);
    fn draw_rect(&mut self, rect: Rect, color: Color32, filled: bool);
    fn draw_line(&mut self, from: Pos2, to: Pos2, color: Color32);
    fn draw_text(&mut self, pos: Pos2, text: &str, color: Color32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderColors {
    pub grid: Color32,
    pub axis: Color32,
    pub preview_tint: Color32,
    pub preview_outline: Color32,
    pub missing_sheet: Color32,
    pub tile_outline: Color32,
    pub selected_tile: Color32,
    pub selection: Color32,
    pub text: Color32,
}

impl Default for RenderColors {
    fn default() -> Self {
        Self {
            grid: Color32::from_gray(60),
            axis: Color32::from_rgb(200, 200, 200),
            preview_tint: Color32::from_white_alpha(150),
            preview_outline: Color32::from_rgb(255, 200, 0),
            missing_sheet: Color32::from_rgb(200, 0, 200),
            tile_outline: Color32::from_gray(120),
            selected_tile: Color32::from_rgb(0, 200, 255),
            selection: Color32::from_rgb(255, 80, 80),
            text: Color32::WHITE,
        }
    }
}

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub cells_drawn: usize,
    pub pruned: usize,
    pub cache_cleared: bool,
}

/// Per-project renderer owning the scaled tile cache
pub struct GridRenderer<T> {
    cache: TileCache<T>,
    sheet_texture: Option<(PathBuf, T)>,
    pub colors: RenderColors,
}

impl<T> Default for GridRenderer<T> {
    fn default() -> Self {
        Self {
            cache: TileCache::new(),
            sheet_texture: None,
            colors: RenderColors::default(),
        }
    }
}

impl<T> GridRenderer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &TileCache<T> {
        &self.cache
    }

    /// The whole sheet as one texture, uploaded on first use
    pub fn sheet_texture<S>(&mut self, surface: &mut S, sheet: &SpriteSheet) -> &T
    where
        S: DrawSurface<Texture = T>,
    {
        let stale = self
            .sheet_texture
            .as_ref()
            .is_none_or(|(path, _)| path != sheet.path());
        if stale {
            self.sheet_texture = None;
        }
        let (_, texture) = self.sheet_texture.get_or_insert_with(|| {
            (
                sheet.path().to_path_buf(),
                surface.upload("sprite sheet", sheet.image()),
            )
        });
        texture
    }

    /// Draw the project into `canvas`: the sheet in tile mode, the map otherwise
    pub fn render<S>(&mut self, surface: &mut S, project: &mut EditorProject, canvas: Rect) -> RenderStats
    where
        S: DrawSurface<Texture = T>,
    {
        project.set_canvas(canvas);
        if project.tile_mode {
            self.render_sheet(surface, project, canvas);
            RenderStats::default()
        } else {
            self.render_map(surface, project, canvas)
        }
    }

    fn render_map<S>(&mut self, surface: &mut S, project: &mut EditorProject, canvas: Rect) -> RenderStats
    where
        S: DrawSurface<Texture = T>,
    {
        let preview = project.preview();
        let EditorProject {
            map,
            viewport,
            sheet,
            hover,
            tool,
            ..
        } = project;
        let mut stats = RenderStats {
            cache_cleared: self.cache.validate(viewport.zoom(), viewport.tile_size()),
            ..Default::default()
        };
        let range = viewport.visible_cell_range(canvas);
        let cell_size = viewport.cell_size();

        if cell_size.x >= MIN_GRID_CELL && cell_size.y >= MIN_GRID_CELL {
            for x in range.left..=range.right {
                let sx = viewport.cell_to_screen((x, 0)).x;
                if sx >= canvas.left() && sx <= canvas.right() {
                    surface.draw_line(
                        pos2(sx, canvas.top()),
                        pos2(sx, canvas.bottom()),
                        self.colors.grid,
                    );
                }
            }
            for y in range.top..=range.bottom {
                let sy = viewport.cell_to_screen((0, y)).y;
                if sy >= canvas.top() && sy <= canvas.bottom() {
                    surface.draw_line(
                        pos2(canvas.left(), sy),
                        pos2(canvas.right(), sy),
                        self.colors.grid,
                    );
                }
            }
        }

        for index in 0..map.layer_count() {
            let mut visible: Vec<((i32, i32), TileRegion)> = Vec::new();
            let mut dangling: Vec<(i32, i32)> = Vec::new();
            if let Some(layer) = map.layer(index) {
                for (pos, cell) in layer.cells_in(range) {
                    match map.resolve(cell) {
                        Some(region) => visible.push((pos, region)),
                        None => dangling.push(pos),
                    }
                }
            }
            for (pos, region) in visible {
                let rect = viewport.cell_rect(pos);
                self.draw_tile(surface, sheet.as_ref(), region, rect, Color32::WHITE);
                stats.cells_drawn += 1;
            }
            if !dangling.is_empty() {
                if let Some(layer) = map.layer_mut(index) {
                    stats.pruned += layer.prune(&dangling);
                }
            }
        }

        self.draw_preview(surface, map, sheet.as_ref(), viewport, &preview);
        if *tool == Tool::Brush {
            if let Some(cell) = hover {
                surface.draw_rect(viewport.cell_rect(*cell), self.colors.preview_outline, false);
            }
        }

        let bold = viewport.bold_point();
        if canvas.x_range().contains(bold.x) {
            surface.draw_line(
                pos2(bold.x, canvas.top()),
                pos2(bold.x, canvas.bottom()),
                self.colors.axis,
            );
        }
        if canvas.y_range().contains(bold.y) {
            surface.draw_line(
                pos2(canvas.left(), bold.y),
                pos2(canvas.right(), bold.y),
                self.colors.axis,
            );
        }
        stats
    }

    fn draw_tile<S>(
        &mut self,
        surface: &mut S,
        sheet: Option<&SpriteSheet>,
        region: TileRegion,
        rect: Rect,
        tint: Color32,
    ) where
        S: DrawSurface<Texture = T>,
    {
        let Some(sheet) = sheet else {
            surface.draw_rect(rect, self.colors.missing_sheet, true);
            return;
        };
        let width = rect.width().round().max(1.0) as u32;
        let height = rect.height().round().max(1.0) as u32;
        let texture = self.cache.get_or_try_insert_with(region, || {
            sheet
                .scaled_tile(region, width, height)
                .map(|pixels| surface.upload(&format!("tile {:?}", region), &pixels))
        });
        match texture {
            Some(texture) => surface.blit(texture, rect, tint),
            None => surface.draw_rect(rect, self.colors.missing_sheet, true),
        }
    }

    fn draw_preview<S>(
        &mut self,
        surface: &mut S,
        map: &MapProject,
        sheet: Option<&SpriteSheet>,
        viewport: &Viewport,
        preview: &Preview,
    ) where
        S: DrawSurface<Texture = T>,
    {
        for (pos, cell) in &preview.cells {
            if let Some(region) = map.resolve(cell) {
                let tint = self.colors.preview_tint;
                self.draw_tile(surface, sheet, region, viewport.cell_rect(*pos), tint);
            }
        }
        if let Some(outline) = preview.outline {
            surface.draw_rect(viewport.cells_rect(outline), self.colors.preview_outline, false);
        }
    }

    fn render_sheet<S>(&mut self, surface: &mut S, project: &EditorProject, canvas: Rect)
    where
        S: DrawSurface<Texture = T>,
    {
        let view = &project.sheet_view;
        match &project.sheet {
            Some(sheet) => {
                let rect = view.sheet_rect((sheet.width(), sheet.height()));
                let texture = self.sheet_texture(surface, sheet);
                surface.blit(texture, rect, Color32::WHITE);
            }
            None => surface.draw_text(
                canvas.center(),
                "sprite sheet not loaded",
                self.colors.missing_sheet,
            ),
        }

        for name in project.map.group_names() {
            let Ok(group) = project.map.group(name) else {
                continue;
            };
            for (id, region) in group.tiles() {
                let selected = project
                    .selected
                    .as_ref()
                    .is_some_and(|s| s.group == name && s.tile == id);
                let color = if selected {
                    self.colors.selected_tile
                } else {
                    self.colors.tile_outline
                };
                surface.draw_rect(view.region_rect(region), color, false);
            }
        }

        if let Some(selection) = view.visible_selection() {
            surface.draw_rect(view.region_rect(selection), self.colors.selection, false);
        }

        let anchor = fields_anchor(canvas);
        let marker = |field: SheetField| if view.focus() == field { "> " } else { "  " };
        surface.draw_text(
            anchor,
            &format!("{}group: {}", marker(SheetField::Group), view.group_field),
            self.colors.text,
        );
        surface.draw_text(
            pos2(anchor.x, anchor.y + TEXT_LINE_HEIGHT),
            &format!("{}name: {}", marker(SheetField::Name), view.name_field),
            self.colors.text,
        );
    }
}

/// A tile id's on-sheet region as normalized texture coordinates
pub fn sheet_uv(sheet: &SpriteSheet, region: TileRegion) -> Rect {
    let (w, h) = (sheet.width().max(1) as f32, sheet.height().max(1) as f32);
    Rect::from_min_max(
        pos2(region.x as f32 / w, region.y as f32 / h),
        pos2(region.right() as f32 / w, region.bottom() as f32 / h),
    )
}
