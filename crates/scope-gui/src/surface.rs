use glam::Vec2;
use nih_plug_egui::egui;
use scope_render::{Color, Stroke, Surface};

pub fn to_color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn to_stroke(s: Stroke) -> egui::Stroke {
    egui::Stroke::new(s.width, to_color32(s.color))
}

/// Draws onto an egui painter inside `rect`. Logical coordinates are relative to the
/// rect's top-left corner.
pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, p: Vec2) -> egui::Pos2 {
        egui::pos2(self.rect.min.x + p.x, self.rect.min.y + p.y)
    }
}

impl Surface for EguiSurface<'_> {
    fn resize_to_display(&mut self) -> bool {
        // egui tessellates at the current pixels-per-point on its own
        self.rect.width() >= 2.0 && self.rect.height() >= 2.0
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.rect.width(), self.rect.height())
    }

    fn clear(&mut self) {
        // Every egui frame starts from an empty shape list.
    }

    fn stroke_path(&mut self, points: &[Vec2], stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        let pts: Vec<egui::Pos2> = points.iter().map(|&p| self.to_screen(p)).collect();
        self.painter.add(egui::Shape::line(pts, to_stroke(stroke)));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.painter.circle_filled(self.to_screen(center), radius, to_color32(color));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) {
        self.painter.circle_stroke(self.to_screen(center), radius, to_stroke(stroke));
    }
}
