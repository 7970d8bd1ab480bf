use nih_plug_egui::egui;
use scope_core::{LayoutConfig, PercentRect, Rect};
use scope_render::ExportLayout;

pub fn to_rect(r: egui::Rect) -> Rect {
    Rect::new(r.min.x as f64, r.min.y as f64, r.width() as f64, r.height() as f64)
}

fn place(pct: &PercentRect, container: egui::Rect) -> egui::Rect {
    let r = pct.resolve(&to_rect(container));
    egui::Rect::from_min_size(
        egui::pos2(r.x as f32, r.y as f32),
        egui::vec2(r.width as f32, r.height as f32),
    )
}

/// Largest rect with the background's aspect ratio that fits in `available`, centered.
pub fn fit_background(available: egui::Rect, image_size: [u32; 2]) -> egui::Rect {
    let [w, h] = image_size;
    if w == 0 || h == 0 || available.width() <= 0.0 || available.height() <= 0.0 {
        return egui::Rect::from_min_size(available.min, egui::Vec2::ZERO);
    }
    let aspect = w as f32 / h as f32;
    let mut size = egui::vec2(available.width(), available.width() / aspect);
    if size.y > available.height() {
        size = egui::vec2(available.height() * aspect, available.height());
    }
    egui::Rect::from_center_size(available.center(), size)
}

/// Where the scope's regions sit on screen this frame, in egui points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScopeGeometry {
    pub background: egui::Rect,
    pub screen: egui::Rect,
    pub knob_vertical: egui::Rect,
    pub knob_horizontal: egui::Rect,
    pub horizontal_shift: egui::Rect,
}

impl ScopeGeometry {
    pub fn resolve(background: egui::Rect, layout: &LayoutConfig) -> Self {
        Self {
            background,
            screen: place(&layout.screen, background),
            knob_vertical: place(&layout.knob_vertical, background),
            knob_horizontal: place(&layout.knob_horizontal, background),
            horizontal_shift: place(&layout.horizontal_shift, background),
        }
    }

    pub fn export_layout(&self, layout: &LayoutConfig) -> ExportLayout {
        ExportLayout {
            background_display: to_rect(self.background),
            screen: layout.screen,
            knob_vertical: to_rect(self.knob_vertical),
            knob_horizontal: to_rect(self.knob_horizontal),
        }
    }
}
