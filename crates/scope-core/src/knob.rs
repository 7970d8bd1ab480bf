use glam::DVec2;

use crate::constants::{KNOB_MAX_ANGLE, KNOB_MIN_ANGLE, SECONDS_PER_DIV_STEPS, VOLTS_PER_DIV_STEPS};
use crate::format::{format_seconds_per_div, format_volts_per_div};

/// Which quantity a step list holds. Drives label formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepUnit {
    VoltsPerDiv,
    SecondsPerDiv,
}

/// An ordered, read-only table of knob detents.
#[derive(Debug, Clone, Copy)]
pub struct StepList {
    steps: &'static [f64],
    unit: StepUnit,
}

impl StepList {
    pub const fn new(steps: &'static [f64], unit: StepUnit) -> Self {
        Self { steps, unit }
    }

    pub const fn volts_per_div() -> Self {
        Self::new(&VOLTS_PER_DIV_STEPS, StepUnit::VoltsPerDiv)
    }

    pub const fn seconds_per_div() -> Self {
        Self::new(&SECONDS_PER_DIV_STEPS, StepUnit::SecondsPerDiv)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn unit(&self) -> StepUnit {
        self.unit
    }

    /// Step magnitude at `index`, clamped into the table. An empty table reads as zero.
    pub fn value(&self, index: usize) -> f64 {
        self.steps.get(self.clamp_index(index)).copied().unwrap_or(0.0)
    }

    /// Position of an exact magnitude in the table.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        self.steps.iter().position(|&s| s == value)
    }

    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.steps.len().saturating_sub(1))
    }

    /// Needle angle in degrees for a detent.
    pub fn angle_for_index(&self, index: usize) -> f64 {
        let last = self.steps.len().saturating_sub(1);
        if last == 0 {
            return KNOB_MIN_ANGLE;
        }
        let idx = self.clamp_index(index);
        KNOB_MIN_ANGLE + (KNOB_MAX_ANGLE - KNOB_MIN_ANGLE) * (idx as f64 / last as f64)
    }

    /// Nearest detent for a needle angle in degrees.
    pub fn index_for_angle(&self, angle: f64) -> usize {
        let last = self.steps.len().saturating_sub(1);
        let ratio = (angle - KNOB_MIN_ANGLE) / (KNOB_MAX_ANGLE - KNOB_MIN_ANGLE);
        let idx = (ratio * last as f64).round();
        if idx.is_nan() || idx <= 0.0 {
            0
        } else {
            (idx as usize).min(last)
        }
    }

    /// Human-readable label for a detent, e.g. `500 mV/div`.
    pub fn label(&self, index: usize) -> String {
        let value = self.value(index);
        match self.unit {
            StepUnit::VoltsPerDiv => format_volts_per_div(value),
            StepUnit::SecondsPerDiv => format_seconds_per_div(value),
        }
    }
}

/// Clockwise angle in degrees from 12 o'clock for an offset from the knob center.
///
/// Screen coordinates: `y` grows downward. The result is in `[0, 360)`.
pub fn polar_angle_cw(offset: DVec2) -> f64 {
    let a = offset.y.atan2(offset.x).to_degrees();
    (a + 450.0) % 360.0
}

/// Pointer offset from the knob center to a needle angle clamped to the knob's travel.
pub fn pointer_angle(offset: DVec2) -> f64 {
    polar_angle_cw(offset).clamp(KNOB_MIN_ANGLE, KNOB_MAX_ANGLE)
}

/// Emitted whenever a knob lands on a different detent.
#[derive(Debug, Clone, PartialEq)]
pub struct KnobChange {
    pub index: usize,
    pub label: String,
    pub needle_angle: f64,
}

/// Drag-tracking controller for one rotary knob.
///
/// The knob does not own its index; callers pass the current one in and store the new
/// one from the returned [`KnobChange`].
#[derive(Debug, Clone)]
pub struct Knob {
    steps: StepList,
    dragging: bool,
}

impl Knob {
    pub fn new(steps: StepList) -> Self {
        Self { steps, dragging: false }
    }

    pub fn steps(&self) -> &StepList {
        &self.steps
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer pressed on the knob: starts a drag and applies the angle under the cursor.
    pub fn press(&mut self, offset: DVec2, current: usize) -> Option<KnobChange> {
        self.dragging = true;
        self.drag(offset, current)
    }

    /// Pointer moved. No-op unless a drag is active.
    pub fn drag(&mut self, offset: DVec2, current: usize) -> Option<KnobChange> {
        if !self.dragging {
            return None;
        }
        let index = self.steps.index_for_angle(pointer_angle(offset));
        self.apply_index(index, current)
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Change to `index` if it differs from `current`.
    pub fn apply_index(&self, index: usize, current: usize) -> Option<KnobChange> {
        let index = self.steps.clamp_index(index);
        if index == current {
            return None;
        }
        let label = self.steps.label(index);
        log::debug!("knob -> {}", label);
        Some(KnobChange {
            index,
            label,
            needle_angle: self.steps.angle_for_index(index),
        })
    }
}
