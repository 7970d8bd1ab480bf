use glam::Vec2;
use scope_core::constants::DC_LINE_EPSILON;
use scope_core::{sample_waveform, ScopeState, WaveformParams};

use crate::settings::RenderStyle;
use crate::surface::Surface;

/// Far enough off-screen to be invisible while staying well inside f32 range.
const COORD_LIMIT: f64 = 1.0e6;

fn to_coord(v: f64) -> f32 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(-COORD_LIMIT, COORD_LIMIT) as f32
}

/// Draws the DC reference line and the sampled trace onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct LiveRenderer {
    pub style: RenderStyle,
}

impl LiveRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Render one frame. Returns false (and draws nothing) if the surface is not laid out.
    ///
    /// Safe to call on every state change; identical inputs produce identical output.
    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        state: &ScopeState,
        params: &WaveformParams,
        show_dc: bool,
    ) -> bool {
        if !surface.resize_to_display() {
            return false;
        }

        let size = surface.size();
        let width = size.x as f64;
        let height = size.y as f64;

        let samples = sample_waveform(params, &state.timebase(), width);
        let transform = state.screen_transform(height);

        surface.clear();

        if show_dc && params.dc_offset.abs() > DC_LINE_EPSILON {
            let y = to_coord(transform.voltage_to_y(params.dc_offset));
            surface.stroke_line(Vec2::new(0.0, y), Vec2::new(size.x, y), self.style.dc_line);
        }

        let points: Vec<Vec2> = samples
            .iter()
            .map(|s| Vec2::new(s.pixel_x as f32, to_coord(transform.voltage_to_y(s.voltage))))
            .collect();
        surface.stroke_path(&points, self.style.trace);

        true
    }
}
