//! Fixed grid geometry and knob step tables.

/// Horizontal divisions on the graticule.
pub const DIV_X: f64 = 10.0;
/// Vertical divisions on the graticule.
pub const DIV_Y: f64 = 8.0;

/// Pixel nudge applied to the vertical center so the trace sits on the drawn center line.
pub const CENTER_TWEAK_PX: f64 = -2.0;

/// Horizontal timebase calibration factor. Empirical; matches the reference screen artwork.
pub const TIME_SCALE_CORRECTION: f64 = 1.039;

/// Frequencies below this are treated as this value.
pub const MIN_FREQUENCY_HZ: f64 = 0.000001;

pub const MIN_DUTY_RATIO: f64 = 0.05;
pub const MAX_DUTY_RATIO: f64 = 0.95;
/// Duty bounds as shown in the duty controls.
pub const MIN_DUTY_PERCENT: f64 = 5.0;
pub const MAX_DUTY_PERCENT: f64 = 95.0;

/// DC offsets with a smaller magnitude do not get a reference line.
pub const DC_LINE_EPSILON: f64 = 1e-6;

/// Vertical pan per wheel notch, in divisions.
pub const WHEEL_STEP_DIV: f64 = 0.2;

/// Knob travel in degrees, clockwise from 12 o'clock.
pub const KNOB_MIN_ANGLE: f64 = 0.0;
pub const KNOB_MAX_ANGLE: f64 = 330.0;

pub const VOLTS_PER_DIV_STEPS: [f64; 12] = [
    5.0, 2.0, 1.0, 0.5, 0.2, 0.1, 0.05, 0.02, 0.01, 0.005, 0.002, 0.001,
];

pub const SECONDS_PER_DIV_STEPS: [f64; 12] = [
    0.5, 0.2, 0.1, 0.05, 0.02, 0.01, 0.005, 0.002, 0.001, 0.0005, 0.0002, 0.0001,
];

pub const DEFAULT_VOLTS_PER_DIV: f64 = 1.0;
pub const DEFAULT_SECONDS_PER_DIV: f64 = 0.002;

// Fallbacks for unparsable parameter fields.
pub const DEFAULT_FREQUENCY_HZ: f64 = 50.0;
pub const DEFAULT_AMPLITUDE: f64 = 2.0;
pub const DEFAULT_OFFSET: f64 = 0.0;
pub const DEFAULT_DUTY_PERCENT: f64 = 50.0;
