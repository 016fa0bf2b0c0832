use anyhow::{anyhow, Result};
use slidesynth_common::SynthConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// The terminal UI owns stdout, so interactive sessions append to the log
/// file instead. `SLIDESYNTH_LOG` takes an `EnvFilter` directive.
pub fn init(config: &SynthConfig, debug: bool, interactive: bool) -> Result<()> {
    let default_level = if debug {
        "debug"
    } else if interactive {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("SLIDESYNTH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if interactive {
        let path = config.log_path_or_default();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| anyhow!(e))?;
    } else {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!(e))?;
    }
    Ok(())
}
