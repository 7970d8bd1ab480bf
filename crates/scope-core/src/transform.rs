use crate::constants::{CENTER_TWEAK_PX, DIV_X, DIV_Y};

/// Maps voltages to vertical pixel positions for one screen size and scale setting.
///
/// Pixel Y grows downward, so positive voltages sit above the center line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    pub px_per_div_y: f64,
    pub center_y: f64,
    pub px_per_volt: f64,
}

impl ScreenTransform {
    pub fn new(height: f64, vertical_center_div: f64, volts_per_div: f64) -> Self {
        let px_per_div_y = height / DIV_Y;
        Self {
            px_per_div_y,
            center_y: vertical_center_div * px_per_div_y + CENTER_TWEAK_PX,
            px_per_volt: px_per_div_y / volts_per_div,
        }
    }

    pub fn voltage_to_y(&self, v: f64) -> f64 {
        self.center_y - v * self.px_per_volt
    }

    /// Inverse of [`Self::voltage_to_y`].
    pub fn y_to_voltage(&self, y: f64) -> f64 {
        (self.center_y - y) / self.px_per_volt
    }
}

/// Horizontal pixels per division for a screen `width` pixels wide.
pub fn px_per_div_x(width: f64) -> f64 {
    width / DIV_X
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_scale() {
        let t = ScreenTransform::new(400.0, 4.0, 1.0);
        assert_eq!(t.px_per_div_y, 50.0);
        assert_eq!(t.center_y, 198.0);
        assert_eq!(t.px_per_volt, 50.0);
        assert_eq!(t.voltage_to_y(0.0), 198.0);
        assert_eq!(t.voltage_to_y(2.0), 98.0);
        assert_eq!(t.voltage_to_y(-1.0), 248.0);
    }

    #[test]
    fn test_roundtrip() {
        for &vdiv in &[5.0, 1.0, 0.02, 0.001] {
            let t = ScreenTransform::new(333.0, 2.6, vdiv);
            for i in -50..50 {
                let v = i as f64 * 0.137 * vdiv;
                assert!((t.y_to_voltage(t.voltage_to_y(v)) - v).abs() < 1e-9 * vdiv.max(1.0));
            }
        }
    }

    #[test]
    fn test_px_per_div_x() {
        assert_eq!(px_per_div_x(800.0), 80.0);
    }
}
