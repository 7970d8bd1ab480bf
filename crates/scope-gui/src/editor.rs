use glam::DVec2;
use image::RgbaImage;
use nih_plug_egui::egui;
use scope_core::layout::log_calibration;
use scope_core::{Knob, LayoutConfig, ParamInputs, ScopeState, StepList, WaveformParams};
use scope_render::{background_for, write_png, ExportCompositor, LiveRenderer, RasterSurface};
use std::io;
use std::path::{Path, PathBuf};

use crate::knob::{knob_control, paint_needle};
use crate::panel::{draw_param_panel, PanelAction};
use crate::scope::{fit_background, to_rect, ScopeGeometry};
use crate::surface::EguiSurface;
use crate::theme;

/// Everything the scope window owns between frames.
pub struct ScopeEditor {
    pub state: ScopeState,
    pub inputs: ParamInputs,
    pub layout: LayoutConfig,
    background: RgbaImage,
    texture: Option<egui::TextureHandle>,
    knob_vertical: Knob,
    knob_horizontal: Knob,
    renderer: LiveRenderer,
    compositor: ExportCompositor,
    export_pending: bool,
    status: Option<String>,
    /// Where the scope was laid out on the last frame.
    geometry: Option<ScopeGeometry>,
}

impl ScopeEditor {
    pub fn new(layout: LayoutConfig) -> Self {
        let background = background_for(&layout);
        log::info!(
            "scope background {}x{}",
            background.width(),
            background.height()
        );
        Self {
            state: ScopeState::new(),
            inputs: ParamInputs::default(),
            layout,
            background,
            texture: None,
            knob_vertical: Knob::new(StepList::volts_per_div()),
            knob_horizontal: Knob::new(StepList::seconds_per_div()),
            renderer: LiveRenderer::default(),
            compositor: ExportCompositor::default(),
            export_pending: false,
            status: None,
            geometry: None,
        }
    }

    /// Draw one frame of the editor.
    ///
    /// Call this from within the `nih_plug_egui::create_egui_editor` update closure.
    pub fn draw(&mut self, ctx: &egui::Context) {
        theme::apply(ctx);

        egui::SidePanel::right("generator_panel")
            .resizable(false)
            .min_width(220.0)
            .show(ctx, |ui| {
                if draw_param_panel(ui, &mut self.inputs, self.status.as_deref()) == PanelAction::Export {
                    self.export_pending = true;
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_scope(ui);
        });

        if std::mem::take(&mut self.export_pending) {
            if let Some(geometry) = self.geometry {
                self.run_export(&geometry, ctx.pixels_per_point());
            }
        }
    }

    fn texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let background = &self.background;
        self.texture
            .get_or_insert_with(|| {
                let size = [background.width() as usize, background.height() as usize];
                let image = egui::ColorImage::from_rgba_unmultiplied(size, background.as_raw());
                ctx.load_texture("scope-background", image, egui::TextureOptions::LINEAR)
            })
            .id()
    }

    fn draw_scope(&mut self, ui: &mut egui::Ui) {
        let texture = self.texture(ui.ctx());
        let bg_rect = fit_background(
            ui.available_rect_before_wrap(),
            [self.background.width(), self.background.height()],
        );
        ui.allocate_rect(bg_rect, egui::Sense::hover());
        let geometry = ScopeGeometry::resolve(bg_rect, &self.layout);
        self.geometry = Some(geometry);

        let painter = ui.painter_at(bg_rect);
        painter.image(
            texture,
            bg_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if let Some(pos) = ui.input(|i| calibration_click(i, bg_rect)) {
            log_calibration(DVec2::new(pos.x as f64, pos.y as f64), &to_rect(bg_rect));
        }

        // Apply this frame's input before painting the trace.
        self.screen_interaction(ui, &geometry);
        self.knob_interaction(ui, &geometry);
        let shift = self.shift_interaction(ui, &geometry);

        let params = self.inputs.waveform();
        let trace_painter = ui.painter_at(geometry.screen);
        let mut surface = EguiSurface::new(&trace_painter, geometry.screen);
        self.renderer.render(&mut surface, &self.state, &params, self.inputs.show_dc);

        self.paint_knobs(ui, &geometry);
        self.paint_shift_control(ui, &geometry, &shift);
    }

    /// Wheel pans the trace vertically; a secondary click recenters it.
    fn screen_interaction(&mut self, ui: &mut egui::Ui, geometry: &ScopeGeometry) {
        let id = ui.id().with("screen");
        let response = ui.interact(geometry.screen, id, egui::Sense::click());
        if response.hovered() {
            let dy = ui.input(|i| i.raw_scroll_delta.y);
            if dy != 0.0 {
                // egui reports wheel-away as positive; the state expects the opposite.
                self.state.wheel(-dy as f64);
            }
        }
        if response.secondary_clicked() {
            self.state.recenter_vertical();
        }
    }

    fn knob_interaction(&mut self, ui: &mut egui::Ui, geometry: &ScopeGeometry) {
        let vertical_id = ui.id().with("knob_vertical");
        let horizontal_id = ui.id().with("knob_horizontal");

        let change = knob_control(
            ui,
            vertical_id,
            geometry.knob_vertical,
            &mut self.knob_vertical,
            self.state.scale().vertical_index,
        );
        if let Some(change) = change {
            self.state.apply_vertical_change(&change);
        }

        let change = knob_control(
            ui,
            horizontal_id,
            geometry.knob_horizontal,
            &mut self.knob_horizontal,
            self.state.scale().horizontal_index,
        );
        if let Some(change) = change {
            self.state.apply_horizontal_change(&change);
        }
    }

    fn paint_knobs(&self, ui: &egui::Ui, geometry: &ScopeGeometry) {
        let painter = ui.painter();
        let style = &self.compositor.needle;
        let text_color = ui.visuals().text_color();
        for (rect, angle, label) in [
            (geometry.knob_vertical, self.state.vertical_needle_angle(), self.state.vertical_label()),
            (geometry.knob_horizontal, self.state.horizontal_needle_angle(), self.state.horizontal_label()),
        ] {
            paint_needle(painter, rect, angle, style);
            painter.text(
                rect.center_bottom() + egui::vec2(0.0, 4.0),
                egui::Align2::CENTER_TOP,
                label,
                egui::FontId::proportional(12.0),
                text_color,
            );
        }
    }

    /// Drag to move the trace horizontally, double-click to recenter.
    fn shift_interaction(&mut self, ui: &mut egui::Ui, geometry: &ScopeGeometry) -> egui::Response {
        let id = ui.id().with("horizontal_shift");
        let response = ui.interact(geometry.horizontal_shift, id, egui::Sense::click_and_drag());

        if response.drag_started() {
            let origin = ui.input(|i| i.pointer.press_origin()).or(response.interact_pointer_pos());
            if let Some(origin) = origin {
                self.state.begin_horizontal_shift(origin.x as f64);
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.state.drag_horizontal_shift(pos.x as f64, geometry.screen.width() as f64);
            }
        }
        if response.drag_stopped() {
            self.state.end_horizontal_shift();
        }
        if response.double_clicked() {
            self.state.recenter_horizontal();
        }
        response
    }

    fn paint_shift_control(&self, ui: &egui::Ui, geometry: &ScopeGeometry, response: &egui::Response) {
        if !(response.hovered() || self.state.is_shifting()) {
            return;
        }
        let rect = geometry.horizontal_shift;
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        let radius = rect.width().min(rect.height()) / 2.0;
        ui.painter().circle_stroke(
            rect.center(),
            radius,
            egui::Stroke::new(1.5, ui.visuals().widgets.hovered.bg_stroke.color),
        );
    }

    fn run_export(&mut self, geometry: &ScopeGeometry, pixels_per_point: f32) {
        self.status = match self.export(geometry, pixels_per_point) {
            Ok(Some(path)) => Some(format!("Saved {}", path.display())),
            Ok(None) => None,
            Err(e) => {
                log::error!("export failed: {}", e);
                Some(format!("Export failed: {e}"))
            }
        };
    }

    /// Render the current state at the background's native resolution and save it.
    ///
    /// Returns `Ok(None)` if the user cancelled the save dialog.
    pub fn export(&self, geometry: &ScopeGeometry, pixels_per_point: f32) -> io::Result<Option<PathBuf>> {
        let params = self.inputs.waveform();
        let mut live = RasterSurface::new(geometry.screen.width(), geometry.screen.height(), pixels_per_point);
        self.renderer.render(&mut live, &self.state, &params, self.inputs.show_dc);

        // The file name carries the frequency as typed, before the generator's floor.
        let named = WaveformParams { frequency_hz: self.inputs.raw_frequency(), ..params };
        let snapshot = self.compositor.snapshot(
            &self.background,
            live.image(),
            &self.state,
            &named,
            &geometry.export_layout(&self.layout),
        );

        let Some(path) = export_path(&self.layout.export_dir, &snapshot.file_name) else {
            return Ok(None);
        };
        write_png(&path, &snapshot.image)?;
        Ok(Some(path))
    }
}

/// A finished primary click anywhere inside `area`, including over the controls.
fn calibration_click(input: &egui::InputState, area: egui::Rect) -> Option<egui::Pos2> {
    if !input.pointer.primary_clicked() {
        return None;
    }
    input.pointer.interact_pos().filter(|p| area.contains(*p))
}

#[cfg(feature = "file-dialog")]
fn export_path(dir: &Path, file_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_directory(dir)
        .set_file_name(file_name)
        .add_filter("PNG image", &["png"])
        .save_file()
}

#[cfg(not(feature = "file-dialog"))]
fn export_path(dir: &Path, file_name: &str) -> Option<PathBuf> {
    Some(dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_layout(dir: &Path) -> LayoutConfig {
        LayoutConfig {
            default_background_size: [240, 140],
            export_dir: dir.to_path_buf(),
            ..LayoutConfig::default()
        }
    }

    fn geometry(layout: &LayoutConfig) -> ScopeGeometry {
        let bg = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(480.0, 280.0));
        ScopeGeometry::resolve(bg, layout)
    }

    #[test]
    fn test_new_editor_defaults() {
        let editor = ScopeEditor::new(small_layout(Path::new(".")));
        assert_eq!(editor.state.volts_per_div(), 1.0);
        assert_eq!(editor.state.seconds_per_div(), 0.002);
        assert_eq!(editor.background.dimensions(), (240, 140));
        assert!(editor.texture.is_none());
    }

    // ── Headless frames ──────────────────────────────────────────────

    fn run_frame(ctx: &egui::Context, editor: &mut ScopeEditor, events: Vec<egui::Event>) -> egui::FullOutput {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1200.0, 700.0))),
            events,
            ..Default::default()
        };
        ctx.run(input, |ctx| editor.draw(ctx))
    }

    fn press(pos: egui::Pos2, pressed: bool) -> Vec<egui::Event> {
        vec![
            egui::Event::PointerMoved(pos),
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                modifiers: egui::Modifiers::NONE,
            },
        ]
    }

    /// Vertical extent of the longest painted path, which is the trace.
    fn trace_span(output: &egui::FullOutput) -> f32 {
        output
            .shapes
            .iter()
            .filter_map(|clipped| match &clipped.shape {
                egui::Shape::Path(path) => Some(path),
                _ => None,
            })
            .max_by_key(|path| path.points.len())
            .map(|path| {
                let lo = path.points.iter().map(|p| p.y).fold(f32::MAX, f32::min);
                let hi = path.points.iter().map(|p| p.y).fold(f32::MIN, f32::max);
                hi - lo
            })
            .unwrap_or(0.0)
    }

    #[test]
    fn test_knob_press_redraws_trace_in_same_frame() {
        let ctx = egui::Context::default();
        let mut editor = ScopeEditor::new(small_layout(Path::new(".")));

        run_frame(&ctx, &mut editor, Vec::new());
        let first = run_frame(&ctx, &mut editor, Vec::new());
        let geometry = editor.geometry.unwrap();
        let px_per_div = geometry.screen.height() / 8.0;
        // 2 V sine at 1 V/div spans four divisions
        assert!((trace_span(&first) / px_per_div - 4.0).abs() < 0.1);

        let knob = geometry.knob_vertical;
        let top = knob.center() - egui::vec2(0.0, knob.height() * 0.3);
        let pressed = run_frame(&ctx, &mut editor, press(top, true));

        assert_eq!(editor.state.volts_per_div(), 5.0);
        let px_per_div = editor.geometry.unwrap().screen.height() / 8.0;
        // Same frame: 2 V at 5 V/div spans 0.8 divisions
        assert!((trace_span(&pressed) / px_per_div - 0.8).abs() < 0.1);
    }

    #[test]
    fn test_calibration_click_over_controls() {
        let ctx = egui::Context::default();
        let area = egui::Rect::from_min_size(egui::pos2(100.0, 100.0), egui::vec2(200.0, 100.0));
        let mut seen = Vec::new();

        for (pos, pressed) in [
            (egui::pos2(150.0, 150.0), true),
            (egui::pos2(150.0, 150.0), false),
            (egui::pos2(10.0, 10.0), true),
            (egui::pos2(10.0, 10.0), false),
        ] {
            let input = egui::RawInput { events: press(pos, pressed), ..Default::default() };
            let mut clicked = None;
            let _ = ctx.run(input, |ctx| {
                // A widget covering the area must not swallow the click.
                egui::CentralPanel::default().show(ctx, |ui| {
                    let id = ui.id().with("cover");
                    ui.interact(area, id, egui::Sense::click_and_drag());
                });
                clicked = ctx.input(|i| calibration_click(i, area));
            });
            seen.push(clicked);
        }

        assert_eq!(seen, vec![None, Some(egui::pos2(150.0, 150.0)), None, None]);
    }

    #[cfg(not(feature = "file-dialog"))]
    #[test]
    fn test_export_writes_named_png() {
        let dir = std::env::temp_dir().join(format!("scope-gui-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut editor = ScopeEditor::new(small_layout(&dir));
        editor.inputs.shape = scope_core::WaveShape::Square;
        editor.inputs.set_frequency_text("1000");
        let g = geometry(&editor.layout);

        let path = editor.export(&g, 1.0).unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "square_f-1kHz_Umax-2V_Ucc-0V.png");

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (240, 140));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[cfg(not(feature = "file-dialog"))]
    #[test]
    fn test_export_error_is_reported() {
        let mut editor = ScopeEditor::new(small_layout(Path::new("/no/such/dir")));
        let g = geometry(&editor.layout);
        editor.run_export(&g, 1.0);
        assert!(editor.status.as_deref().unwrap().starts_with("Export failed"));
    }
}
