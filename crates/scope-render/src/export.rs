use glam::Vec2;
use image::{ImageFormat, RgbaImage};
use scope_core::{export_file_name, PercentRect, Rect, ScopeState, WaveformParams};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use crate::raster::RasterSurface;
use crate::settings::NeedleStyle;
use crate::surface::{Stroke, Surface};

/// Where things sat on screen when the export was requested.
///
/// All rectangles share one coordinate space (e.g. window points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportLayout {
    /// The background image as displayed.
    pub background_display: Rect,
    /// Screen cutout, as percentages of the background image.
    pub screen: PercentRect,
    pub knob_vertical: Rect,
    pub knob_horizontal: Rect,
}

/// A finished export: encoded-ready image plus its suggested file name.
pub struct Snapshot {
    pub file_name: String,
    pub image: RgbaImage,
}

/// Rebuilds the scope at the background's native resolution.
#[derive(Debug, Clone, Default)]
pub struct ExportCompositor {
    pub needle: NeedleStyle,
}

impl ExportCompositor {
    pub fn new(needle: NeedleStyle) -> Self {
        Self { needle }
    }

    /// Composite background, the live trace, and both knob needles.
    ///
    /// `live` is the live surface's backing store; it is scaled into the screen cutout.
    /// Needle angles come from `state`, so they always match the trace.
    pub fn compose(
        &self,
        background: &RgbaImage,
        live: &RgbaImage,
        state: &ScopeState,
        layout: &ExportLayout,
    ) -> RgbaImage {
        let (out_w, out_h) = background.dimensions();
        let mut out = RasterSurface::from_image(background.clone());

        let (sx, sy, sw, sh) = layout.screen.resolve_pixels(out_w, out_h);
        out.draw_image(live, sx, sy, sw, sh);

        let bg = &layout.background_display;
        if bg.width > 0.0 && bg.height > 0.0 {
            let scale = Vec2::new(out_w as f32 / bg.width as f32, out_h as f32 / bg.height as f32);
            self.draw_needle(&mut out, bg, &layout.knob_vertical, scale, state.vertical_needle_angle());
            self.draw_needle(&mut out, bg, &layout.knob_horizontal, scale, state.horizontal_needle_angle());
        } else {
            log::warn!("background has no displayed size; exporting without needles");
        }

        out.into_image()
    }

    /// Compose and name a snapshot of the current state.
    pub fn snapshot(
        &self,
        background: &RgbaImage,
        live: &RgbaImage,
        state: &ScopeState,
        params: &WaveformParams,
        layout: &ExportLayout,
    ) -> Snapshot {
        Snapshot {
            file_name: export_file_name(params),
            image: self.compose(background, live, state, layout),
        }
    }

    fn draw_needle(&self, out: &mut RasterSurface, bg: &Rect, knob: &Rect, scale: Vec2, angle_deg: f64) {
        let avg = (scale.x + scale.y) / 2.0;
        let center = Vec2::new(
            ((knob.x - bg.x) + knob.width / 2.0) as f32 * scale.x,
            ((knob.y - bg.y) + knob.height / 2.0) as f32 * scale.y,
        );
        let extent = (knob.width as f32 * scale.x).min(knob.height as f32 * scale.y);
        let len = extent * self.needle.length_ratio;

        // 0 degrees points up, clockwise positive
        let th = angle_deg.to_radians() as f32;
        let tip = center + Vec2::new(th.sin(), -th.cos()) * len;

        out.stroke_line(center, tip, Stroke::new(self.needle.backing_width * avg, self.needle.backing_color));
        out.stroke_line(center, tip, Stroke::new(self.needle.width * avg, self.needle.color));

        let cap = extent * self.needle.cap_ratio;
        out.fill_circle(center, cap, self.needle.cap_fill);
        out.stroke_circle(
            center,
            cap,
            Stroke::new(self.needle.cap_outline.width * avg, self.needle.cap_outline.color),
        );
    }
}

/// PNG-encode an image in memory.
pub fn encode_png(image: &RgbaImage) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(bytes)
}

/// Write a snapshot into `dir` under its own file name. Returns the full path.
pub fn write_snapshot(dir: &Path, snapshot: &Snapshot) -> io::Result<PathBuf> {
    let path = dir.join(&snapshot.file_name);
    write_png(&path, &snapshot.image)?;
    Ok(path)
}

pub fn write_png(path: &Path, image: &RgbaImage) -> io::Result<()> {
    let bytes = encode_png(image)?;
    std::fs::write(path, bytes)?;
    log::info!("snapshot saved to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn layout() -> ExportLayout {
        ExportLayout {
            background_display: Rect::new(0.0, 0.0, 100.0, 50.0),
            screen: PercentRect::new(10.0, 10.0, 50.0, 80.0),
            knob_vertical: Rect::new(70.0, 10.0, 10.0, 10.0),
            knob_horizontal: Rect::new(85.0, 10.0, 10.0, 10.0),
        }
    }

    #[test]
    fn test_output_matches_background_resolution() {
        let bg = RgbaImage::from_pixel(200, 100, Rgba([200, 200, 200, 255]));
        let live = RgbaImage::from_pixel(37, 23, Rgba([0, 128, 0, 255]));
        let out = ExportCompositor::default().compose(&bg, &live, &ScopeState::new(), &layout());
        assert_eq!(out.dimensions(), (200, 100));
        // trace region: x 20..120, y 10..90
        assert_eq!(out.get_pixel(60, 50).0, [0, 128, 0, 255]);
        assert_eq!(out.get_pixel(5, 5).0, [200, 200, 200, 255]);
    }

    #[test]
    fn test_needle_follows_scale_state() {
        let bg = RgbaImage::from_pixel(200, 100, Rgba([200, 200, 200, 255]));
        let live = RgbaImage::new(10, 10);
        let mut state = ScopeState::new();
        // vertical knob at index 0 points straight up
        state.set_vertical_index(0);
        let out = ExportCompositor::default().compose(&bg, &live, &state, &layout());
        // knob center (150, 30), length 0.45 * 20 = 9 px upward
        assert_eq!(out.get_pixel(150, 24).0, [0x11, 0x11, 0x11, 255]);
        assert_eq!(out.get_pixel(150, 36).0, [200, 200, 200, 255]);
    }

    #[test]
    fn test_snapshot_file_name() {
        let bg = RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 255]));
        let params = WaveformParams { frequency_hz: 1000.0, ..WaveformParams::default() };
        let snap = ExportCompositor::default().snapshot(&bg, &RgbaImage::new(4, 4), &ScopeState::new(), &params, &layout());
        assert_eq!(snap.file_name, "sine_f-1kHz_Umax-2V_Ucc-0V.png");
    }

    #[test]
    fn test_encode_png_signature() {
        let bytes = encode_png(&RgbaImage::new(3, 3)).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
