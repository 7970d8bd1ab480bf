use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::constants::{DIV_X, MAX_DUTY_RATIO, MIN_DUTY_RATIO, MIN_FREQUENCY_HZ, TIME_SCALE_CORRECTION};

/// Periodic signal shapes the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveShape {
    #[default]
    Sine,
    Square,
    Triangle,
}

impl WaveShape {
    pub const ALL: [WaveShape; 3] = [WaveShape::Sine, WaveShape::Square, WaveShape::Triangle];

    /// Lowercase identifier, also used in export file names.
    pub fn id(&self) -> &'static str {
        match self {
            WaveShape::Sine => "sine",
            WaveShape::Square => "square",
            WaveShape::Triangle => "triangle",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WaveShape::Sine => "Sine",
            WaveShape::Square => "Square",
            WaveShape::Triangle => "Triangle",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "sine" => Some(WaveShape::Sine),
            "square" => Some(WaveShape::Square),
            "triangle" => Some(WaveShape::Triangle),
            _ => None,
        }
    }

    /// Whether the duty ratio has any effect on this shape.
    pub fn uses_duty(&self) -> bool {
        matches!(self, WaveShape::Square)
    }
}

/// Snapshot of the electrical parameters for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformParams {
    pub shape: WaveShape,
    pub frequency_hz: f64,
    pub amplitude: f64,
    pub dc_offset: f64,
    /// Fraction of a square period spent high.
    pub duty_ratio: f64,
}

impl Default for WaveformParams {
    fn default() -> Self {
        Self {
            shape: WaveShape::Sine,
            frequency_hz: 50.0,
            amplitude: 2.0,
            dc_offset: 0.0,
            duty_ratio: 0.5,
        }
    }
}

impl WaveformParams {
    /// Copy with frequency floored, amplitude made non-negative, and duty clamped.
    pub fn sanitized(&self) -> Self {
        Self {
            shape: self.shape,
            frequency_hz: self.frequency_hz.max(MIN_FREQUENCY_HZ),
            amplitude: self.amplitude.abs(),
            dc_offset: self.dc_offset,
            duty_ratio: self.duty_ratio.clamp(MIN_DUTY_RATIO, MAX_DUTY_RATIO),
        }
    }

    /// Signal value at time `t` in seconds, excluding DC offset.
    pub fn shape_value(&self, t: f64) -> f64 {
        let f = self.frequency_hz.max(MIN_FREQUENCY_HZ);
        let a = self.amplitude;
        match self.shape {
            WaveShape::Sine => a * (TAU * f * t).sin(),
            WaveShape::Square => {
                let period = 1.0 / f;
                let phase = t / period;
                let mut frac = phase - phase.floor();
                if frac < 0.0 {
                    frac += 1.0;
                }
                if frac < self.duty_ratio {
                    a
                } else {
                    -a
                }
            }
            WaveShape::Triangle => {
                let period = 1.0 / f;
                let phase = t / period;
                let frac = phase - (phase + 0.5).floor();
                a * (2.0 * (2.0 * frac).abs() - 1.0)
            }
        }
    }

    /// Signal value at time `t` in seconds, including DC offset.
    pub fn value_at(&self, t: f64) -> f64 {
        self.shape_value(t) + self.dc_offset
    }
}

/// One trace point: a pixel column and the voltage displayed there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub pixel_x: f64,
    pub voltage: f64,
}

/// The visible time window for a timebase setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timebase {
    pub seconds_per_div: f64,
    /// Horizontal pan, in divisions. Time zero sits at this division.
    pub center_div: f64,
}

impl Timebase {
    /// Seconds spanned by the full screen width.
    pub fn window_seconds(&self) -> f64 {
        self.seconds_per_div * DIV_X * TIME_SCALE_CORRECTION
    }

    pub fn time_offset(&self) -> f64 {
        self.center_div * self.seconds_per_div
    }

    /// Seconds per pixel column for a screen `width` pixels wide.
    pub fn time_step(&self, width: f64) -> f64 {
        self.window_seconds() / (width.max(2.0) - 1.0)
    }

    /// Time at pixel column `x`.
    pub fn time_at(&self, x: f64, width: f64) -> f64 {
        x * self.time_step(width) - self.time_offset()
    }
}

/// Sample the waveform once per pixel column across a screen `width` pixels wide.
///
/// Widths below two are treated as two. Fractional widths get one extra column.
pub fn sample_waveform(params: &WaveformParams, timebase: &Timebase, width: f64) -> Vec<Sample> {
    let w = if width.is_finite() { width.max(2.0) } else { 2.0 };
    let step = timebase.time_step(w);
    let offset = timebase.time_offset();
    let columns = w.ceil() as usize;

    (0..columns)
        .map(|x| {
            let pixel_x = x as f64;
            let t = pixel_x * step - offset;
            Sample {
                pixel_x,
                voltage: params.value_at(t),
            }
        })
        .collect()
}
