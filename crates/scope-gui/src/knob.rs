use glam::DVec2;
use nih_plug_egui::egui;
use scope_core::{Knob, KnobChange};
use scope_render::NeedleStyle;

use crate::surface::to_color32;

/// Hit-test and drive a rotary step knob laid over the background artwork.
///
/// Pressing anywhere on the knob jumps straight to the step under the pointer; dragging
/// keeps tracking it, even once the pointer leaves the knob. Returns the change when the
/// step index moved.
pub fn knob_control(
    ui: &mut egui::Ui,
    id: egui::Id,
    rect: egui::Rect,
    knob: &mut Knob,
    current: usize,
) -> Option<KnobChange> {
    let response = ui.interact(rect, id, egui::Sense::click_and_drag());

    let mut change = None;
    if response.is_pointer_button_down_on() {
        if let Some(pos) = response.interact_pointer_pos() {
            let offset = DVec2::new((pos.x - rect.center().x) as f64, (pos.y - rect.center().y) as f64);
            change = if knob.is_dragging() {
                knob.drag(offset, current)
            } else {
                knob.press(offset, current)
            };
        }
    } else if knob.is_dragging() {
        knob.release();
    }

    change
}

/// Paint the knob pointer: a white backing line, the dark needle and a round cap.
pub fn paint_needle(painter: &egui::Painter, rect: egui::Rect, angle_deg: f64, style: &NeedleStyle) {
    let center = rect.center();
    let extent = rect.width().min(rect.height());
    let len = extent * style.length_ratio;

    let th = angle_deg.to_radians() as f32;
    let tip = center + egui::vec2(th.sin(), -th.cos()) * len;

    painter.line_segment(
        [center, tip],
        egui::Stroke::new(style.backing_width, to_color32(style.backing_color)),
    );
    painter.line_segment([center, tip], egui::Stroke::new(style.width, to_color32(style.color)));

    let cap = extent * style.cap_ratio;
    painter.circle_filled(center, cap, to_color32(style.cap_fill));
    painter.circle_stroke(
        center,
        cap,
        egui::Stroke::new(style.cap_outline.width, to_color32(style.cap_outline.color)),
    );
}
