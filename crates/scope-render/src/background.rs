use glam::Vec2;
use image::RgbaImage;
use scope_core::constants::{DIV_X, DIV_Y};
use scope_core::{LayoutConfig, Rect};
use std::path::Path;

use crate::raster::RasterSurface;
use crate::surface::{Color, Stroke, Surface};

const PANEL: Color = Color::from_hex(0xc9c5b9);
const PANEL_EDGE: Color = Color::from_hex(0x8d897e);
const SCREEN: Color = Color::from_hex(0xd8e4d0);
const GRATICULE: Color = Color::rgba(60, 80, 60, 110);
const KNOB_BODY: Color = Color::from_hex(0x2b2b2b);
const KNOB_RIM: Color = Color::from_hex(0x5a5a5a);

/// Decode a background image from disk.
pub fn load_background(path: &Path) -> Result<RgbaImage, String> {
    let img = image::open(path).map_err(|e| format!("failed to load image: {e}"))?;
    let rgba = img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(format!("background {:?} is empty", path));
    }
    Ok(rgba)
}

/// The configured background, or a generated panel when none is set or it fails to load.
pub fn background_for(layout: &LayoutConfig) -> RgbaImage {
    if let Some(path) = &layout.background_path {
        match load_background(path) {
            Ok(img) => return img,
            Err(e) => log::warn!("falling back to generated panel: {}", e),
        }
    }
    default_panel(layout)
}

/// Draw a plain instrument panel matching `layout`: screen cutout with graticule and
/// knob bodies.
pub fn default_panel(layout: &LayoutConfig) -> RgbaImage {
    let [w, h] = layout.default_background_size;
    let (w, h) = (w.max(1), h.max(1));
    let mut surface = RasterSurface::from_image(RgbaImage::new(w, h));
    let full = Rect::new(0.0, 0.0, w as f64, h as f64);

    surface.fill_rect(Vec2::ZERO, Vec2::new(w as f32, h as f32), PANEL_EDGE);
    surface.fill_rect(Vec2::splat(6.0), Vec2::new(w as f32 - 6.0, h as f32 - 6.0), PANEL);

    let screen = layout.screen.resolve(&full);
    let (min, max) = corners(&screen);
    surface.fill_rect(min - Vec2::splat(4.0), max + Vec2::splat(4.0), PANEL_EDGE);
    surface.fill_rect(min, max, SCREEN);
    draw_graticule(&mut surface, min, max);

    for knob in [&layout.knob_vertical, &layout.knob_horizontal, &layout.horizontal_shift] {
        let r = knob.resolve(&full);
        let c = r.center().as_vec2();
        let radius = (r.width.min(r.height) / 2.0) as f32;
        surface.fill_circle(c, radius, KNOB_RIM);
        surface.fill_circle(c, radius * 0.85, KNOB_BODY);
    }

    surface.into_image()
}

fn corners(r: &Rect) -> (Vec2, Vec2) {
    let min = Vec2::new(r.x as f32, r.y as f32);
    (min, min + Vec2::new(r.width as f32, r.height as f32))
}

fn draw_graticule(surface: &mut RasterSurface, min: Vec2, max: Vec2) {
    let size = max - min;
    let stroke = Stroke::new(1.0, GRATICULE);
    for i in 0..=DIV_X as u32 {
        let x = min.x + size.x * i as f32 / DIV_X as f32;
        surface.stroke_line(Vec2::new(x, min.y), Vec2::new(x, max.y), stroke);
    }
    for i in 0..=DIV_Y as u32 {
        let y = min.y + size.y * i as f32 / DIV_Y as f32;
        surface.stroke_line(Vec2::new(min.x, y), Vec2::new(max.x, y), stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_panel_size() {
        let layout = LayoutConfig::default();
        let img = default_panel(&layout);
        assert_eq!(img.dimensions(), (1200, 700));
        assert!(img.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_missing_background_falls_back() {
        let layout = LayoutConfig {
            background_path: Some("/no/such/panel.png".into()),
            default_background_size: [64, 32],
            ..LayoutConfig::default()
        };
        assert_eq!(background_for(&layout).dimensions(), (64, 32));
    }

    #[test]
    fn test_load_background_error_message() {
        let err = load_background(Path::new("/no/such/panel.png")).unwrap_err();
        assert!(err.starts_with("failed to load image"));
    }
}
