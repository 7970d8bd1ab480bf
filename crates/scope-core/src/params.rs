//! Text-field parameter inputs and their two-way synchronization.

use crate::constants::{
    DEFAULT_AMPLITUDE, DEFAULT_DUTY_PERCENT, DEFAULT_FREQUENCY_HZ, DEFAULT_OFFSET, MAX_DUTY_PERCENT,
    MAX_DUTY_RATIO, MIN_DUTY_PERCENT, MIN_DUTY_RATIO, MIN_FREQUENCY_HZ,
};
use crate::format::trim_fixed;
use crate::waveform::{WaveShape, WaveformParams};

/// Parse a user-typed number. Accepts `,` as the decimal separator.
pub fn parse_number(raw: &str, fallback: f64) -> f64 {
    parse_strict(raw).unwrap_or(fallback)
}

fn parse_strict(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn reciprocal_text(value: f64) -> String {
    trim_fixed(1.0 / value, 6)
}

/// Raw contents of the parameter panel, as the user typed them.
#[derive(Debug, Clone)]
pub struct ParamInputs {
    pub shape: WaveShape,
    pub frequency: String,
    pub period: String,
    pub amplitude: String,
    pub offset: String,
    /// Duty slider position, in percent.
    pub duty_slider: f64,
    /// Duty numeric field, in percent. This is the value the generator reads.
    pub duty_number: String,
    pub show_dc: bool,
    syncing: bool,
}

impl Default for ParamInputs {
    fn default() -> Self {
        let mut inputs = Self {
            shape: WaveShape::Sine,
            frequency: "50".to_string(),
            period: String::new(),
            amplitude: "2".to_string(),
            offset: "0".to_string(),
            duty_slider: DEFAULT_DUTY_PERCENT,
            duty_number: "50".to_string(),
            show_dc: true,
            syncing: false,
        };
        inputs.sync_period_from_frequency();
        inputs
    }
}

impl ParamInputs {
    /// Validated snapshot for the sampler. Unparsable fields fall back to defaults.
    pub fn waveform(&self) -> WaveformParams {
        let duty = parse_number(&self.duty_number, DEFAULT_DUTY_PERCENT) / 100.0;
        WaveformParams {
            shape: self.shape,
            frequency_hz: parse_number(&self.frequency, DEFAULT_FREQUENCY_HZ).max(MIN_FREQUENCY_HZ),
            amplitude: parse_number(&self.amplitude, DEFAULT_AMPLITUDE).abs(),
            dc_offset: parse_number(&self.offset, DEFAULT_OFFSET),
            duty_ratio: duty.clamp(MIN_DUTY_RATIO, MAX_DUTY_RATIO),
        }
    }

    /// Frequency as typed, without the generator's floor. Used for file names.
    pub fn raw_frequency(&self) -> f64 {
        parse_number(&self.frequency, DEFAULT_FREQUENCY_HZ)
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing
    }

    pub fn duty_enabled(&self) -> bool {
        self.shape.uses_duty()
    }

    /// The frequency field changed: rewrite the period field. Returns true if it did.
    pub fn sync_period_from_frequency(&mut self) -> bool {
        if self.syncing {
            return false;
        }
        let Some(f) = parse_strict(&self.frequency).filter(|f| *f > 0.0) else {
            return false;
        };
        self.syncing = true;
        self.period = reciprocal_text(f);
        self.syncing = false;
        true
    }

    /// The period field changed: rewrite the frequency field. Returns true if it did.
    pub fn sync_frequency_from_period(&mut self) -> bool {
        if self.syncing {
            return false;
        }
        let Some(p) = parse_strict(&self.period).filter(|p| *p > 0.0) else {
            return false;
        };
        self.syncing = true;
        self.frequency = reciprocal_text(p);
        self.syncing = false;
        true
    }

    pub fn set_frequency_text(&mut self, text: impl Into<String>) -> bool {
        self.frequency = text.into();
        self.sync_period_from_frequency()
    }

    pub fn set_period_text(&mut self, text: impl Into<String>) -> bool {
        self.period = text.into();
        self.sync_frequency_from_period()
    }

    /// The duty slider moved: mirror it into the numeric field.
    pub fn sync_duty_from_slider(&mut self) {
        self.duty_number = trim_fixed(self.duty_slider, 6);
    }

    /// The duty numeric field changed: clamp, round, and mirror it into the slider.
    pub fn sync_duty_from_number(&mut self) {
        let v = parse_number(&self.duty_number, DEFAULT_DUTY_PERCENT)
            .round()
            .clamp(MIN_DUTY_PERCENT, MAX_DUTY_PERCENT);
        self.duty_number = trim_fixed(v, 0);
        self.duty_slider = v;
    }

    /// Run `f` as if a sync were in progress; sync calls made inside are ignored.
    pub fn with_sync_guard<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let was = self.syncing;
        self.syncing = true;
        let r = f(self);
        self.syncing = was;
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12.5", 0.0), 12.5);
        assert_eq!(parse_number(" 3,25 ", 0.0), 3.25);
        assert_eq!(parse_number("abc", 50.0), 50.0);
        assert_eq!(parse_number("", 2.0), 2.0);
        assert_eq!(parse_number("inf", 7.0), 7.0);
        assert_eq!(parse_number("-4", 0.0), -4.0);
    }

    #[test]
    fn test_parse_strict_agrees_with_parse_number() {
        for raw in ["0,5", " 20 ", "x", "", "NaN", "1e3"] {
            assert_eq!(parse_strict(raw).unwrap_or(-1.0), parse_number(raw, -1.0));
        }
        assert_eq!(parse_strict("1e3"), Some(1000.0));
        assert_eq!(parse_strict("NaN"), None);
    }

    #[test]
    fn test_defaults_and_fallbacks() {
        let mut inputs = ParamInputs::default();
        assert_eq!(inputs.period, "0.02");
        inputs.frequency = "garbage".into();
        inputs.amplitude = "".into();
        inputs.offset = "x".into();
        inputs.duty_number = "?".into();
        let p = inputs.waveform();
        assert_eq!(p.frequency_hz, 50.0);
        assert_eq!(p.amplitude, 2.0);
        assert_eq!(p.dc_offset, 0.0);
        assert_eq!(p.duty_ratio, 0.5);
    }

    #[test]
    fn test_clamps() {
        let mut inputs = ParamInputs::default();
        inputs.frequency = "0".into();
        inputs.amplitude = "-3".into();
        inputs.duty_number = "99".into();
        let p = inputs.waveform();
        assert_eq!(p.frequency_hz, MIN_FREQUENCY_HZ);
        assert_eq!(p.amplitude, 3.0);
        assert_eq!(p.duty_ratio, 0.95);
    }

    #[test]
    fn test_frequency_period_sync() {
        let mut inputs = ParamInputs::default();
        assert!(inputs.set_frequency_text("1000"));
        assert_eq!(inputs.period, "0.001");
        assert!(inputs.set_period_text("0,004"));
        assert_eq!(inputs.frequency, "250");
        assert!(inputs.set_frequency_text("3"));
        assert_eq!(inputs.period, "0.333333");
    }

    #[test]
    fn test_sync_ignores_non_positive() {
        let mut inputs = ParamInputs::default();
        assert!(!inputs.set_frequency_text("0"));
        assert_eq!(inputs.period, "0.02");
        assert!(!inputs.set_period_text("-1"));
        assert_eq!(inputs.frequency, "0");
    }

    #[test]
    fn test_sync_guard_blocks_reentry() {
        let mut inputs = ParamInputs::default();
        let synced = inputs.with_sync_guard(|i| {
            i.frequency = "10".into();
            i.sync_period_from_frequency()
        });
        assert!(!synced);
        assert_eq!(inputs.period, "0.02");
        assert!(!inputs.is_syncing());
    }

    #[test]
    fn test_duty_sync() {
        let mut inputs = ParamInputs::default();
        inputs.duty_slider = 30.0;
        inputs.sync_duty_from_slider();
        assert_eq!(inputs.duty_number, "30");

        inputs.duty_number = "2".into();
        inputs.sync_duty_from_number();
        assert_eq!(inputs.duty_number, "5");
        assert_eq!(inputs.duty_slider, 5.0);

        inputs.duty_number = "62,6".into();
        inputs.sync_duty_from_number();
        assert_eq!(inputs.duty_number, "63");
    }

    #[test]
    fn test_duty_enabled_only_for_square() {
        let mut inputs = ParamInputs::default();
        assert!(!inputs.duty_enabled());
        inputs.shape = WaveShape::Square;
        assert!(inputs.duty_enabled());
    }
}
