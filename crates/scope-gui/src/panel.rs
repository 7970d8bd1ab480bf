use nih_plug_egui::egui::{self, Ui};
use scope_core::constants::{MAX_DUTY_PERCENT, MIN_DUTY_PERCENT};
use scope_core::{ParamInputs, WaveShape};

/// Actions returned from the parameter panel that the caller has to carry out.
#[derive(Debug, PartialEq)]
pub enum PanelAction {
    None,
    Export,
}

/// Draw the generator controls. Edits are written straight into `inputs`, with the
/// frequency/period and duty pairs kept in step.
pub fn draw_param_panel(ui: &mut Ui, inputs: &mut ParamInputs, status: Option<&str>) -> PanelAction {
    let mut action = PanelAction::None;

    ui.heading("Generator");
    ui.separator();

    egui::Grid::new("generator_params")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Shape");
            egui::ComboBox::from_id_salt("shape")
                .selected_text(inputs.shape.name())
                .show_ui(ui, |ui| {
                    for shape in WaveShape::ALL {
                        ui.selectable_value(&mut inputs.shape, shape, shape.name());
                    }
                });
            ui.end_row();

            ui.label("Frequency (Hz)");
            if ui.text_edit_singleline(&mut inputs.frequency).changed() {
                inputs.sync_period_from_frequency();
            }
            ui.end_row();

            ui.label("Period (s)");
            if ui.text_edit_singleline(&mut inputs.period).changed() {
                inputs.sync_frequency_from_period();
            }
            ui.end_row();

            ui.label("Amplitude (V)");
            ui.text_edit_singleline(&mut inputs.amplitude);
            ui.end_row();

            ui.label("DC offset (V)");
            ui.text_edit_singleline(&mut inputs.offset);
            ui.end_row();

            let duty_enabled = inputs.duty_enabled();
            ui.label("Duty (%)");
            ui.horizontal(|ui| {
                let slider = egui::Slider::new(&mut inputs.duty_slider, MIN_DUTY_PERCENT..=MAX_DUTY_PERCENT)
                    .step_by(1.0)
                    .show_value(false);
                if ui.add_enabled(duty_enabled, slider).changed() {
                    inputs.sync_duty_from_slider();
                }
                let number = ui.add_enabled(
                    duty_enabled,
                    egui::TextEdit::singleline(&mut inputs.duty_number).desired_width(48.0),
                );
                if number.lost_focus() {
                    inputs.sync_duty_from_number();
                }
            });
            ui.end_row();
        });

    ui.checkbox(&mut inputs.show_dc, "Show DC level");

    ui.add_space(12.0);
    if ui.button("Export PNG").clicked() {
        action = PanelAction::Export;
    }
    if let Some(status) = status {
        ui.label(egui::RichText::new(status).small());
    }

    action
}
