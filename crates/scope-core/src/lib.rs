pub mod constants;
pub mod format;
pub mod knob;
pub mod layout;
pub mod params;
pub mod state;
pub mod transform;
pub mod waveform;

pub use format::{export_file_name, format_si, SiUnit};
pub use knob::{Knob, KnobChange, StepList, StepUnit};
pub use layout::{LayoutConfig, PercentRect, Rect};
pub use params::{parse_number, ParamInputs};
pub use state::{ScaleState, ScopeState, ViewOffsets};
pub use transform::ScreenTransform;
pub use waveform::{sample_waveform, Sample, Timebase, WaveShape, WaveformParams};
