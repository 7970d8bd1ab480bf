use nih_plug::prelude::*;
use nih_plug_egui::{create_egui_editor, EguiState};
use scope_core::layout::load_layout_or_default;
use scope_core::LayoutConfig;
use scope_gui::ScopeEditor;
use std::path::PathBuf;
use std::sync::Arc;

/// Path to a JSON layout file describing the background artwork.
const LAYOUT_ENV: &str = "RSCOPE_LAYOUT";

pub struct RscopePlugin {
    params: Arc<RscopeParams>,
    layout: LayoutConfig,
}

#[derive(Params)]
struct RscopeParams {
    #[persist = "editor-state"]
    editor_state: Arc<EguiState>,
}

impl Default for RscopeParams {
    fn default() -> Self {
        Self {
            editor_state: EguiState::from_size(1180, 600),
        }
    }
}

fn layout_from_env() -> LayoutConfig {
    match std::env::var_os(LAYOUT_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            log::info!("loading scope layout from {:?}", path);
            load_layout_or_default(&path)
        }
        None => LayoutConfig::default(),
    }
}

impl Default for RscopePlugin {
    fn default() -> Self {
        Self {
            params: Arc::new(RscopeParams::default()),
            layout: layout_from_env(),
        }
    }
}

impl Plugin for RscopePlugin {
    const NAME: &'static str = "Rscope";
    const VENDOR: &'static str = "rscope";
    const URL: &'static str = "";
    const EMAIL: &'static str = "";
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    type SysExMessage = ();
    type BackgroundTask = ();

    const MIDI_INPUT: MidiConfig = MidiConfig::None;
    const SAMPLE_ACCURATE_AUTOMATION: bool = false;

    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[AudioIOLayout {
        main_input_channels: NonZeroU32::new(2),
        main_output_channels: NonZeroU32::new(2),
        ..AudioIOLayout::const_default()
    }];

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    fn editor(&mut self, _async_executor: AsyncExecutor<Self>) -> Option<Box<dyn Editor>> {
        create_egui_editor(
            self.params.editor_state.clone(),
            ScopeEditor::new(self.layout.clone()),
            |_, _| {},
            |egui_ctx, _setter, editor| editor.draw(egui_ctx),
        )
    }

    fn initialize(
        &mut self,
        _audio_io_layout: &AudioIOLayout,
        _buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        true
    }

    fn process(
        &mut self,
        _buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        // The scope draws a synthesized signal; audio passes through untouched.
        ProcessStatus::Normal
    }
}

impl ClapPlugin for RscopePlugin {
    const CLAP_ID: &'static str = "com.rscope.rscope";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("Bench oscilloscope with a built-in function generator");
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Analyzer,
        ClapFeature::Stereo,
    ];
}

impl Vst3Plugin for RscopePlugin {
    const VST3_CLASS_ID: [u8; 16] = *b"rscopeBenchScope";
    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] = &[
        Vst3SubCategory::Fx,
        Vst3SubCategory::Analyzer,
    ];
}

nih_export_clap!(RscopePlugin);
nih_export_vst3!(RscopePlugin);
