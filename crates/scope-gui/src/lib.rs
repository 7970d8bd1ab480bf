pub mod editor;
pub mod knob;
pub mod panel;
pub mod scope;
pub mod surface;
pub mod theme;

pub use editor::ScopeEditor;
pub use scope::ScopeGeometry;
pub use surface::EguiSurface;
