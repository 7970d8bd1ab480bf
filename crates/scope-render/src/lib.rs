pub mod background;
pub mod export;
pub mod live;
pub mod raster;
pub mod settings;
pub mod surface;

pub use background::{background_for, default_panel, load_background};
pub use export::{encode_png, write_png, write_snapshot, ExportCompositor, ExportLayout, Snapshot};
pub use live::LiveRenderer;
pub use raster::RasterSurface;
pub use settings::{NeedleStyle, RenderStyle};
pub use surface::{Color, Stroke, Surface};
