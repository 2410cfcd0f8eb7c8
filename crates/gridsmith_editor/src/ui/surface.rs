//! egui implementation of the renderer's draw surface

use bevy_egui::egui::{self, pos2, Color32, Pos2, Rect, Stroke, StrokeKind};
use image::RgbaImage;

use crate::render::DrawSurface;

const FULL_UV: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

/// Paints into one egui layer; textures are registered with the context
pub struct EguiSurface<'a> {
    ctx: &'a egui::Context,
    painter: egui::Painter,
}

impl<'a> EguiSurface<'a> {
    pub fn new(ctx: &'a egui::Context, painter: egui::Painter) -> Self {
        Self { ctx, painter }
    }
}

impl DrawSurface for EguiSurface<'_> {
    type Texture = egui::TextureHandle;

    fn upload(&mut self, name: &str, image: &RgbaImage) -> egui::TextureHandle {
        let size = [image.width() as usize, image.height() as usize];
        let pixels = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        self.ctx
            .load_texture(name, pixels, egui::TextureOptions::NEAREST)
    }

    fn blit(&mut self, texture: &egui::TextureHandle, rect: Rect, tint: Color32) {
        self.painter.image(texture.id(), rect, FULL_UV, tint);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color32, filled: bool) {
        if filled {
            self.painter.rect_filled(rect, 0.0, color);
        } else {
            self.painter
                .rect_stroke(rect, 0.0, Stroke::new(1.0, color), StrokeKind::Inside);
        }
    }

    fn draw_line(&mut self, from: Pos2, to: Pos2, color: Color32) {
        self.painter
            .line_segment([from, to], Stroke::new(1.0, color));
    }

    fn draw_text(&mut self, pos: Pos2, text: &str, color: Color32) {
        self.painter.text(
            pos,
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::monospace(14.0),
            color,
        );
    }
}
