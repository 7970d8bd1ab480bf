use glam::Vec2;

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBB`, opaque.
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Same color with alpha `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Line width and color. Strokes have round caps and joins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Something the trace can be drawn on.
///
/// Coordinates are logical units with the origin top-left and Y growing downward; an
/// implementation maps them onto its backing store.
pub trait Surface {
    /// Match the backing store to the displayed size.
    ///
    /// Returns false when the surface is too small to draw on (not laid out yet); the
    /// caller must skip the frame.
    fn resize_to_display(&mut self) -> bool;

    /// Displayed size in logical units.
    fn size(&self) -> Vec2;

    fn clear(&mut self);

    /// One connected polyline.
    fn stroke_path(&mut self, points: &[Vec2], stroke: Stroke);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        self.stroke_path(&[from, to], stroke);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke);
}
