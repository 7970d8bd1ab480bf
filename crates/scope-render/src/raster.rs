use glam::Vec2;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::surface::{Color, Stroke, Surface};

/// Smallest displayed extent, in logical units, that is worth drawing.
const MIN_DISPLAY_EXTENT: f32 = 2.0;

/// CPU surface backed by an [`RgbaImage`].
///
/// The displayed size is in logical units; the backing store is that size times `scale`
/// (the device pixel ratio), and every draw call is scaled to match.
pub struct RasterSurface {
    image: RgbaImage,
    display_size: Vec2,
    scale: f32,
}

impl RasterSurface {
    /// A surface displayed at `width`×`height` logical units with pixel ratio `scale`.
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        let mut surface = Self {
            image: RgbaImage::new(0, 0),
            display_size: Vec2::new(width, height),
            scale: if scale > 0.0 { scale } else { 1.0 },
        };
        surface.resize_to_display();
        surface
    }

    /// A 1:1 surface wrapping an existing image.
    pub fn from_image(image: RgbaImage) -> Self {
        let display_size = Vec2::new(image.width() as f32, image.height() as f32);
        Self { image, display_size, scale: 1.0 }
    }

    /// Update the displayed size, e.g. after a window resize. Takes effect on the next
    /// [`Surface::resize_to_display`].
    pub fn set_display_size(&mut self, width: f32, height: f32, scale: f32) {
        self.display_size = Vec2::new(width, height);
        if scale > 0.0 {
            self.scale = scale;
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Backing store size in device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Fill an axis-aligned rectangle given in logical units.
    pub fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        let (w, h) = self.image.dimensions();
        let x0 = (min.x * self.scale).round().clamp(0.0, w as f32) as u32;
        let y0 = (min.y * self.scale).round().clamp(0.0, h as f32) as u32;
        let x1 = (max.x * self.scale).round().clamp(0.0, w as f32) as u32;
        let y1 = (max.y * self.scale).round().clamp(0.0, h as f32) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                blend(self.image.get_pixel_mut(x, y), color, 1.0);
            }
        }
    }

    /// Draw `src` scaled into the device-pixel rectangle at (`x`, `y`) of `width`×`height`.
    pub fn draw_image(&mut self, src: &RgbaImage, x: i64, y: i64, width: u32, height: u32) {
        if width == 0 || height == 0 || src.width() == 0 || src.height() == 0 {
            return;
        }
        if src.dimensions() == (width, height) {
            imageops::overlay(&mut self.image, src, x, y);
        } else {
            let scaled = imageops::resize(src, width, height, FilterType::Triangle);
            imageops::overlay(&mut self.image, &scaled, x, y);
        }
    }

    fn to_device(&self, p: Vec2) -> Vec2 {
        p * self.scale
    }

    /// Visit every pixel in the device-space box around `min..max`, clipped to the image.
    fn pixel_bounds(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(w as f32);
        let y1 = max.y.ceil().min(h as f32);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl Surface for RasterSurface {
    fn resize_to_display(&mut self) -> bool {
        if !(self.display_size.x >= MIN_DISPLAY_EXTENT && self.display_size.y >= MIN_DISPLAY_EXTENT) {
            return false;
        }
        let w = (self.display_size.x * self.scale).round() as u32;
        let h = (self.display_size.y * self.scale).round() as u32;
        if self.image.dimensions() != (w, h) {
            self.image = RgbaImage::new(w, h);
        }
        true
    }

    fn size(&self) -> Vec2 {
        self.display_size
    }

    fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = Rgba(Color::TRANSPARENT.to_array());
        }
    }

    fn stroke_path(&mut self, points: &[Vec2], stroke: Stroke) {
        if points.is_empty() || stroke.width <= 0.0 {
            return;
        }
        let pts: Vec<Vec2> = points.iter().map(|&p| self.to_device(p)).collect();
        let half = stroke.width * self.scale / 2.0;
        let pad = Vec2::splat(half + 1.0);

        let (mut lo, mut hi) = (pts[0], pts[0]);
        for &p in &pts {
            lo = lo.min(p);
            hi = hi.max(p);
        }
        let Some((bx0, by0, bx1, by1)) = self.pixel_bounds(lo - pad, hi + pad) else {
            return;
        };

        // Coverage is accumulated with max() so overlapping segments never double-blend.
        let mask_w = (bx1 - bx0) as usize;
        let mut mask = vec![0.0f32; mask_w * (by1 - by0) as usize];

        let segments: Vec<(Vec2, Vec2)> = if pts.len() == 1 {
            vec![(pts[0], pts[0])]
        } else {
            pts.windows(2).map(|w| (w[0], w[1])).collect()
        };

        for (a, b) in segments {
            let Some((x0, y0, x1, y1)) = self.pixel_bounds(a.min(b) - pad, a.max(b) + pad) else {
                continue;
            };
            for y in y0..y1 {
                for x in x0..x1 {
                    let c = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let cov = (half + 0.5 - distance_to_segment(c, a, b)).clamp(0.0, 1.0);
                    if cov > 0.0 {
                        let idx = (y - by0) as usize * mask_w + (x - bx0) as usize;
                        if cov > mask[idx] {
                            mask[idx] = cov;
                        }
                    }
                }
            }
        }

        for y in by0..by1 {
            for x in bx0..bx1 {
                let cov = mask[(y - by0) as usize * mask_w + (x - bx0) as usize];
                if cov > 0.0 {
                    blend(self.image.get_pixel_mut(x, y), stroke.color, cov);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let c = self.to_device(center);
        let r = radius * self.scale;
        if r <= 0.0 {
            return;
        }
        let pad = Vec2::splat(r + 1.0);
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(c - pad, c + pad) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(c);
                let cov = (r + 0.5 - d).clamp(0.0, 1.0);
                if cov > 0.0 {
                    blend(self.image.get_pixel_mut(x, y), color, cov);
                }
            }
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) {
        let c = self.to_device(center);
        let r = radius * self.scale;
        let half = stroke.width * self.scale / 2.0;
        if r <= 0.0 || half <= 0.0 {
            return;
        }
        let pad = Vec2::splat(r + half + 1.0);
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(c - pad, c + pad) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(c);
                let cov = (half + 0.5 - (d - r).abs()).clamp(0.0, 1.0);
                if cov > 0.0 {
                    blend(self.image.get_pixel_mut(x, y), stroke.color, cov);
                }
            }
        }
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Source-over blend of `color` scaled by `coverage` onto a straight-alpha pixel.
fn blend(dst: &mut Rgba<u8>, color: Color, coverage: f32) {
    let sa = color.a as f32 / 255.0 * coverage;
    if sa <= 0.0 {
        return;
    }
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        dst.0 = Color::TRANSPARENT.to_array();
        return;
    }
    let mix = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    dst.0 = [
        mix(color.r, dst.0[0]),
        mix(color.g, dst.0[1]),
        mix(color.b, dst.0[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ];
}
