use scope_core::constants::{DIV_X, TIME_SCALE_CORRECTION};
use scope_core::{sample_waveform, ScopeState, WaveShape, WaveformParams};
use std::f64::consts::TAU;

// ── Helpers ──────────────────────────────────────────────────────

const WIDTH: f64 = 1001.0;

fn sine_50hz() -> WaveformParams {
    WaveformParams {
        shape: WaveShape::Sine,
        frequency_hz: 50.0,
        amplitude: 2.0,
        dc_offset: 0.0,
        duty_ratio: 0.5,
    }
}

// ── 1. Scenarios ─────────────────────────────────────────────────

#[test]
fn sine_crosses_zero_at_horizontal_center() {
    let state = ScopeState::new();
    let tb = state.timebase();
    assert_eq!(tb.seconds_per_div, 0.002);

    let samples = sample_waveform(&sine_50hz(), &tb, WIDTH);
    let step = tb.time_step(WIDTH);
    let x0 = (tb.time_offset() / step).round() as usize;

    let expected_slope = TAU * 50.0 * 2.0;
    assert!(
        samples[x0].voltage.abs() <= expected_slope * step,
        "voltage near t=0 should be ~0, got {}",
        samples[x0].voltage
    );

    let slope = (samples[x0 + 1].voltage - samples[x0 - 1].voltage) / (2.0 * step);
    assert!(
        (slope - expected_slope).abs() / expected_slope < 0.01,
        "slope {} should match {}",
        slope,
        expected_slope
    );
}

#[test]
fn square_quarter_duty_is_high_a_quarter_of_the_time() {
    let state = ScopeState::new();
    let tb = state.timebase();
    let window = tb.seconds_per_div * DIV_X * TIME_SCALE_CORRECTION;
    let params = WaveformParams {
        shape: WaveShape::Square,
        frequency_hz: 1.0 / window,
        amplitude: 1.0,
        dc_offset: 0.0,
        duty_ratio: 0.25,
    };

    let samples = sample_waveform(&params, &tb, WIDTH);
    let high = samples.iter().filter(|s| s.voltage > 0.0).count();
    let fraction = high as f64 / samples.len() as f64;
    assert!((fraction - 0.25).abs() < 2.0 / WIDTH, "high fraction {}", fraction);
    assert!(samples.iter().all(|s| s.voltage == 1.0 || s.voltage == -1.0));
}

// ── 2. Invariants ────────────────────────────────────────────────

#[test]
fn samples_are_bounded_for_every_shape() {
    let state = ScopeState::new();
    for shape in WaveShape::ALL {
        for freq in [1.0, 50.0, 1234.0, 1e6] {
            let params = WaveformParams { shape, frequency_hz: freq, dc_offset: 0.5, ..sine_50hz() };
            for s in sample_waveform(&params, &state.timebase(), 640.0) {
                assert!(s.voltage.is_finite());
                assert!(s.voltage >= 0.5 - 2.0 - 1e-9 && s.voltage <= 0.5 + 2.0 + 1e-9);
            }
        }
    }
}

#[test]
fn pixel_columns_are_consecutive() {
    let state = ScopeState::new();
    let samples = sample_waveform(&sine_50hz(), &state.timebase(), 320.0);
    assert_eq!(samples.len(), 320);
    for (i, s) in samples.iter().enumerate() {
        assert_eq!(s.pixel_x, i as f64);
    }
}

#[test]
fn sampling_is_deterministic() {
    let mut state = ScopeState::new();
    state.set_horizontal_center(3.3);
    let a = sample_waveform(&sine_50hz(), &state.timebase(), 500.0);
    let b = sample_waveform(&sine_50hz(), &state.timebase(), 500.0);
    assert_eq!(a, b);
}

#[test]
fn zero_amplitude_is_flat_at_offset() {
    let state = ScopeState::new();
    for shape in WaveShape::ALL {
        let params = WaveformParams { shape, amplitude: 0.0, dc_offset: -1.25, ..sine_50hz() };
        for s in sample_waveform(&params, &state.timebase(), 100.0) {
            assert!((s.voltage + 1.25).abs() < 1e-12);
        }
    }
}

#[test]
fn horizontal_pan_shifts_time() {
    let mut state = ScopeState::new();
    let centered = sample_waveform(&sine_50hz(), &state.timebase(), WIDTH);
    state.set_horizontal_center(0.0);
    let left = sample_waveform(&sine_50hz(), &state.timebase(), WIDTH);
    // with no pan offset the first column is t = 0
    assert!(left[0].voltage.abs() < 1e-12);
    assert!((centered[100].voltage - left[100].voltage).abs() > 1e-3);
}
