use crate::surface::{Color, Stroke};

/// Colors and widths for the live trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub trace: Stroke,
    /// DC reference line.
    pub dc_line: Stroke,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            trace: Stroke::new(4.0, Color::from_hex(0x0a7d2c)),
            dc_line: Stroke::new(2.0, Color::from_hex(0xdd1111)),
        }
    }
}

/// Needle drawing parameters for exported knobs. Widths are in background display
/// units and get scaled to the export resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedleStyle {
    /// Needle length as a fraction of the knob's smaller side.
    pub length_ratio: f32,
    pub backing_width: f32,
    pub backing_color: Color,
    pub width: f32,
    pub color: Color,
    /// Center cap radius as a fraction of the knob's smaller side.
    pub cap_ratio: f32,
    pub cap_fill: Color,
    pub cap_outline: Stroke,
}

impl Default for NeedleStyle {
    fn default() -> Self {
        Self {
            length_ratio: 0.45,
            backing_width: 6.0,
            backing_color: Color::WHITE.with_alpha(0.85),
            width: 4.0,
            color: Color::from_hex(0x111111),
            cap_ratio: 0.09,
            cap_fill: Color::from_hex(0xe9e7df),
            cap_outline: Stroke::new(1.0, Color::BLACK.with_alpha(0.25)),
        }
    }
}
