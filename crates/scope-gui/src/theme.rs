use nih_plug_egui::egui;

// Bench-instrument palette
const PANEL: egui::Color32 = egui::Color32::from_rgb(214, 210, 198);
const PANEL_DARK: egui::Color32 = egui::Color32::from_rgb(184, 179, 166);
const INK: egui::Color32 = egui::Color32::from_rgb(34, 34, 30);
const MUTED: egui::Color32 = egui::Color32::from_rgb(110, 106, 96);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(10, 125, 44);
const ACCENT_LIGHT: egui::Color32 = egui::Color32::from_rgb(120, 190, 130);
const WARN: egui::Color32 = egui::Color32::from_rgb(200, 120, 20);
const ERROR: egui::Color32 = egui::Color32::from_rgb(221, 17, 17);
const FIELD: egui::Color32 = egui::Color32::from_rgb(240, 238, 230);

static INIT: std::sync::Once = std::sync::Once::new();

/// Apply the instrument-panel visuals to the egui context. Runs once.
pub fn apply(ctx: &egui::Context) {
    INIT.call_once(|| {
        let mut visuals = egui::Visuals::light();

        visuals.panel_fill = PANEL;
        visuals.window_fill = PANEL;
        visuals.faint_bg_color = PANEL_DARK;
        visuals.extreme_bg_color = FIELD;

        visuals.selection.bg_fill = ACCENT_LIGHT;
        visuals.selection.stroke = egui::Stroke::new(1.0, INK);

        visuals.hyperlink_color = ACCENT;
        visuals.warn_fg_color = WARN;
        visuals.error_fg_color = ERROR;

        visuals.widgets.inactive.bg_fill = PANEL_DARK;
        visuals.widgets.inactive.weak_bg_fill = PANEL_DARK;
        visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, INK);
        visuals.widgets.inactive.bg_stroke = egui::Stroke::new(0.0, MUTED);

        visuals.widgets.hovered.bg_fill = ACCENT_LIGHT;
        visuals.widgets.hovered.weak_bg_fill = ACCENT_LIGHT;
        visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.5, INK);
        visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ACCENT);

        visuals.widgets.active.bg_fill = ACCENT;
        visuals.widgets.active.weak_bg_fill = ACCENT;
        visuals.widgets.active.fg_stroke = egui::Stroke::new(2.0, FIELD);
        visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, INK);

        visuals.widgets.noninteractive.bg_fill = PANEL;
        visuals.widgets.noninteractive.weak_bg_fill = PANEL;
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, INK);
        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(0.0, PANEL_DARK);

        visuals.window_stroke = egui::Stroke::new(1.0, MUTED);

        ctx.set_visuals(visuals);
    });
}
