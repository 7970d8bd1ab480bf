use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// An axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// A rectangle expressed as percentages of a containing image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PercentRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Resolve against a container rectangle.
    pub fn resolve(&self, container: &Rect) -> Rect {
        Rect {
            x: container.x + container.width * self.left / 100.0,
            y: container.y + container.height * self.top / 100.0,
            width: container.width * self.width / 100.0,
            height: container.height * self.height / 100.0,
        }
    }

    /// Resolve against an image of `width`×`height` pixels, rounding to whole pixels.
    pub fn resolve_pixels(&self, width: u32, height: u32) -> (i64, i64, u32, u32) {
        let w = width as f64;
        let h = height as f64;
        (
            (w * self.left / 100.0).round() as i64,
            (h * self.top / 100.0).round() as i64,
            (w * self.width / 100.0).round().max(0.0) as u32,
            (h * self.height / 100.0).round().max(0.0) as u32,
        )
    }
}

/// Placement of the scope artwork's interactive regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// The screen cutout the trace is drawn into.
    pub screen: PercentRect,
    /// Volts/div knob.
    pub knob_vertical: PercentRect,
    /// Seconds/div knob.
    pub knob_horizontal: PercentRect,
    /// Horizontal position control.
    pub horizontal_shift: PercentRect,
    /// Background artwork. A generated panel is used when unset.
    pub background_path: Option<PathBuf>,
    /// Size of the generated panel.
    pub default_background_size: [u32; 2],
    /// Where snapshots are written when no save dialog is available.
    pub export_dir: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            screen: PercentRect::new(12.6, 16.2, 52.4, 59.0),
            knob_vertical: PercentRect::new(72.0, 20.0, 9.0, 15.4),
            knob_horizontal: PercentRect::new(85.0, 20.0, 9.0, 15.4),
            horizontal_shift: PercentRect::new(85.0, 55.0, 6.0, 10.3),
            background_path: None,
            default_background_size: [1200, 700],
            export_dir: PathBuf::from("."),
        }
    }
}

/// Read a layout file. Missing fields take their defaults.
pub fn load_layout(path: &Path) -> io::Result<LayoutConfig> {
    let json = std::fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Like [`load_layout`], but falls back to defaults on any error.
pub fn load_layout_or_default(path: &Path) -> LayoutConfig {
    match load_layout(path) {
        Ok(layout) => layout,
        Err(e) => {
            log::warn!("using default layout, could not read {:?}: {}", path, e);
            LayoutConfig::default()
        }
    }
}

pub fn save_layout(path: &Path, layout: &LayoutConfig) -> io::Result<()> {
    let json = serde_json::to_string_pretty(layout)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}

/// Position of `click` inside `area`, as percentages. Used to calibrate [`LayoutConfig`].
pub fn calibration_percent(click: DVec2, area: &Rect) -> DVec2 {
    DVec2::new(
        (click.x - area.x) / area.width * 100.0,
        (click.y - area.y) / area.height * 100.0,
    )
}

/// Log a calibration click in the same shape as the layout fields.
pub fn log_calibration(click: DVec2, area: &Rect) {
    if area.width <= 0.0 || area.height <= 0.0 {
        return;
    }
    let pct = calibration_percent(click, area);
    log::debug!("--left: {:.1}%;  --top: {:.1}%;", pct.x, pct.y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_pixels_rounds() {
        let r = PercentRect::new(10.0, 20.0, 50.0, 25.0);
        assert_eq!(r.resolve_pixels(1001, 399), (100, 80, 501, 100));
    }

    #[test]
    fn test_resolve_against_container() {
        let r = PercentRect::new(50.0, 50.0, 10.0, 20.0);
        let out = r.resolve(&Rect::new(100.0, 0.0, 200.0, 100.0));
        assert_eq!(out, Rect::new(200.0, 50.0, 20.0, 20.0));
        assert_eq!(out.center(), DVec2::new(210.0, 60.0));
    }

    #[test]
    fn test_calibration_percent() {
        let area = Rect::new(10.0, 10.0, 200.0, 100.0);
        let pct = calibration_percent(DVec2::new(60.0, 35.0), &area);
        assert!((pct.x - 25.0).abs() < 1e-12);
        assert!((pct.y - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_layout_json_partial() {
        let layout: LayoutConfig =
            serde_json::from_str(r#"{ "screen": { "left": 1, "top": 2, "width": 3, "height": 4 } }"#)
                .unwrap();
        assert_eq!(layout.screen, PercentRect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(layout.knob_vertical, LayoutConfig::default().knob_vertical);
    }

    #[test]
    fn test_layout_save_load() {
        let path = std::env::temp_dir().join(format!("rscope_layout_{}.json", std::process::id()));
        let mut layout = LayoutConfig::default();
        layout.export_dir = PathBuf::from("/tmp/snaps");
        save_layout(&path, &layout).unwrap();
        assert_eq!(load_layout(&path).unwrap(), layout);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_layout_falls_back() {
        let layout = load_layout_or_default(Path::new("/definitely/not/here.json"));
        assert_eq!(layout, LayoutConfig::default());
    }
}
