//! Human-readable magnitudes for knob labels, text fields, and export file names.

use crate::waveform::WaveformParams;

/// Fixed-point format with trailing zeros (and a dangling `.`) removed.
pub fn trim_fixed(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

pub fn format_volts_per_div(v: f64) -> String {
    if v >= 1.0 {
        format!("{} V/div", trim_fixed(v, 6))
    } else if v >= 1e-3 {
        format!("{} mV/div", trim_fixed(v * 1e3, 6))
    } else {
        format!("{} µV/div", trim_fixed(v * 1e6, 6))
    }
}

pub fn format_seconds_per_div(s: f64) -> String {
    if s >= 1.0 {
        format!("{} s/div", trim_fixed(s, 6))
    } else if s >= 1e-3 {
        format!("{} ms/div", trim_fixed(s * 1e3, 6))
    } else {
        format!("{} µs/div", trim_fixed(s * 1e6, 6))
    }
}

/// Base unit for [`format_si`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiUnit {
    Hertz,
    Volt,
}

/// Compact SI rendering used in file names: `1kHz`, `250mV`, `-1.5V`.
///
/// Three decimals at most. ASCII `u` stands in for micro so the result is filename-safe.
pub fn format_si(value: f64, unit: SiUnit) -> String {
    let a = value.abs();
    let (suffix, scale) = match unit {
        SiUnit::Hertz => {
            if a >= 1e6 {
                ("MHz", 1e6)
            } else if a >= 1e3 {
                ("kHz", 1e3)
            } else {
                ("Hz", 1.0)
            }
        }
        SiUnit::Volt => {
            if a == 0.0 || a >= 1.0 {
                ("V", 1.0)
            } else if a >= 1e-3 {
                ("mV", 1e-3)
            } else {
                ("uV", 1e-6)
            }
        }
    };
    let n = ((value / scale) * 1000.0).round() / 1000.0;
    format!("{}{}", trim_fixed(n, 3), suffix)
}

/// File name for an exported snapshot, e.g. `sine_f-1kHz_Umax-2V_Ucc-0V.png`.
pub fn export_file_name(params: &WaveformParams) -> String {
    format!(
        "{}_f-{}_Umax-{}_Ucc-{}.png",
        params.shape.id(),
        format_si(params.frequency_hz, SiUnit::Hertz),
        format_si(params.amplitude.abs(), SiUnit::Volt),
        format_si(params.dc_offset, SiUnit::Volt),
    )
}
