use nih_plug::prelude::*;
use rscope::RscopePlugin;

fn main() {
    nih_export_standalone::<RscopePlugin>();
}
