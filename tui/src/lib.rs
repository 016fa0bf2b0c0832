pub mod app;
pub mod widgets;

use anyhow::Result;
use slidesynth_common::SynthConfig;
use slidesynth_core::{HttpBackend, Synth};
use std::path::PathBuf;
use std::sync::Arc;

pub use app::*;

/// Run the interactive client against the configured backend.
pub async fn run_interactive(config: &SynthConfig, initial_file: Option<PathBuf>) -> Result<()> {
    let backend = Arc::new(HttpBackend::new(&config.api_url)?);
    let synth = Synth::spawn(backend, config.download_dir.clone()).await?.synth;
    let options = AppOptions {
        check_health: config.check_health_on_start,
        initial_file,
    };
    run_app(synth, options).await
}
