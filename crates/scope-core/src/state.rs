use crate::constants::{DEFAULT_SECONDS_PER_DIV, DEFAULT_VOLTS_PER_DIV, DIV_X, DIV_Y, WHEEL_STEP_DIV};
use crate::knob::{KnobChange, StepList};
use crate::transform::{px_per_div_x, ScreenTransform};
use crate::waveform::Timebase;

/// Selected detents on the two scale knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleState {
    pub vertical_index: usize,
    pub horizontal_index: usize,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self {
            vertical_index: StepList::volts_per_div().index_of(DEFAULT_VOLTS_PER_DIV).unwrap_or(0),
            horizontal_index: StepList::seconds_per_div()
                .index_of(DEFAULT_SECONDS_PER_DIV)
                .unwrap_or(0),
        }
    }
}

/// Pan state, in divisions from the top/left edge of the graticule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOffsets {
    pub vertical_center_div: f64,
    pub horizontal_center_div: f64,
}

impl Default for ViewOffsets {
    fn default() -> Self {
        Self {
            vertical_center_div: DIV_Y / 2.0,
            horizontal_center_div: DIV_X / 2.0,
        }
    }
}

/// An in-progress horizontal shift drag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ShiftDrag {
    start_x: f64,
    start_center: f64,
}

/// All mutable scope view state. Every change goes through a setter so invariants hold.
#[derive(Debug, Clone)]
pub struct ScopeState {
    scale: ScaleState,
    offsets: ViewOffsets,
    volts_steps: StepList,
    seconds_steps: StepList,
    shift_drag: Option<ShiftDrag>,
}

impl Default for ScopeState {
    fn default() -> Self {
        Self {
            scale: ScaleState::default(),
            offsets: ViewOffsets::default(),
            volts_steps: StepList::volts_per_div(),
            seconds_steps: StepList::seconds_per_div(),
            shift_drag: None,
        }
    }
}

impl ScopeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> ScaleState {
        self.scale
    }

    pub fn offsets(&self) -> ViewOffsets {
        self.offsets
    }

    pub fn volts_steps(&self) -> &StepList {
        &self.volts_steps
    }

    pub fn seconds_steps(&self) -> &StepList {
        &self.seconds_steps
    }

    pub fn volts_per_div(&self) -> f64 {
        self.volts_steps.value(self.scale.vertical_index)
    }

    pub fn seconds_per_div(&self) -> f64 {
        self.seconds_steps.value(self.scale.horizontal_index)
    }

    pub fn vertical_needle_angle(&self) -> f64 {
        self.volts_steps.angle_for_index(self.scale.vertical_index)
    }

    pub fn horizontal_needle_angle(&self) -> f64 {
        self.seconds_steps.angle_for_index(self.scale.horizontal_index)
    }

    pub fn vertical_label(&self) -> String {
        self.volts_steps.label(self.scale.vertical_index)
    }

    pub fn horizontal_label(&self) -> String {
        self.seconds_steps.label(self.scale.horizontal_index)
    }

    /// Set the volts/div detent. Returns true if it changed.
    pub fn set_vertical_index(&mut self, index: usize) -> bool {
        let index = self.volts_steps.clamp_index(index);
        let changed = index != self.scale.vertical_index;
        self.scale.vertical_index = index;
        changed
    }

    /// Set the seconds/div detent. Returns true if it changed.
    pub fn set_horizontal_index(&mut self, index: usize) -> bool {
        let index = self.seconds_steps.clamp_index(index);
        let changed = index != self.scale.horizontal_index;
        self.scale.horizontal_index = index;
        changed
    }

    pub fn apply_vertical_change(&mut self, change: &KnobChange) -> bool {
        self.set_vertical_index(change.index)
    }

    pub fn apply_horizontal_change(&mut self, change: &KnobChange) -> bool {
        self.set_horizontal_index(change.index)
    }

    /// Move the vertical center by `delta_div`, clamped to the graticule.
    pub fn pan_vertical(&mut self, delta_div: f64) {
        self.offsets.vertical_center_div =
            (self.offsets.vertical_center_div + delta_div).clamp(0.0, DIV_Y);
    }

    /// One scroll-wheel notch. Positive `delta_y` moves the center down a step.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y == 0.0 {
            return;
        }
        let step = if delta_y > 0.0 { WHEEL_STEP_DIV } else { -WHEEL_STEP_DIV };
        self.pan_vertical(step);
    }

    pub fn recenter_vertical(&mut self) {
        self.offsets.vertical_center_div = DIV_Y / 2.0;
    }

    pub fn set_horizontal_center(&mut self, center_div: f64) {
        self.offsets.horizontal_center_div = center_div.clamp(0.0, DIV_X);
    }

    pub fn recenter_horizontal(&mut self) {
        self.shift_drag = None;
        self.offsets.horizontal_center_div = DIV_X / 2.0;
    }

    /// Start a horizontal shift drag at pointer x `client_x`.
    pub fn begin_horizontal_shift(&mut self, client_x: f64) {
        self.shift_drag = Some(ShiftDrag {
            start_x: client_x,
            start_center: self.offsets.horizontal_center_div,
        });
    }

    /// Continue a shift drag. `screen_width` converts pixels into divisions.
    ///
    /// Returns false (and leaves state alone) when no drag is active.
    pub fn drag_horizontal_shift(&mut self, client_x: f64, screen_width: f64) -> bool {
        let Some(drag) = self.shift_drag else {
            return false;
        };
        let per_div = px_per_div_x(screen_width);
        if !(per_div > 0.0) {
            return false;
        }
        let delta_div = (client_x - drag.start_x) / per_div;
        self.set_horizontal_center(drag.start_center + delta_div);
        true
    }

    pub fn end_horizontal_shift(&mut self) {
        self.shift_drag = None;
    }

    pub fn is_shifting(&self) -> bool {
        self.shift_drag.is_some()
    }

    pub fn timebase(&self) -> Timebase {
        Timebase {
            seconds_per_div: self.seconds_per_div(),
            center_div: self.offsets.horizontal_center_div,
        }
    }

    pub fn screen_transform(&self, height: f64) -> ScreenTransform {
        ScreenTransform::new(height, self.offsets.vertical_center_div, self.volts_per_div())
    }
}
