//! Non-interactive commands driving the same session engine as the TUI.

use anyhow::{anyhow, Result};
use slidesynth_common::SynthConfig;
use slidesynth_core::{check_health, download_pptx, HttpBackend, Synth};
use slidesynth_protocol::{Event, HealthState, Op, ProcessingState, SessionView};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub async fn health(config: &SynthConfig) -> Result<()> {
    let backend = HttpBackend::new(&config.api_url)?;
    match check_health(&backend).await {
        HealthState::Healthy { status } => {
            println!("Backend healthy: {status}");
            Ok(())
        }
        HealthState::Unreachable { message } => Err(anyhow!("Backend unreachable: {message}")),
        HealthState::Checking => Err(anyhow!("health check did not finish")),
    }
}

pub async fn upload(config: &SynthConfig, file: PathBuf, download: bool, out: PathBuf) -> Result<()> {
    let backend = Arc::new(HttpBackend::new(&config.api_url)?);
    let synth = Synth::spawn(backend, out).await?.synth;

    synth.submit(Op::SelectFile { path: file }).await?;
    let view = wait_for_slides(&synth).await?;
    print_slides(&view);

    if download {
        synth.submit(Op::DownloadPptx).await?;
        let path = wait_for_download(&synth).await?;
        println!("Saved {}", path.display());
    }

    let _ = synth.submit(Op::Shutdown).await;
    Ok(())
}

pub async fn download(config: &SynthConfig, filename: &str, out: &Path) -> Result<()> {
    let backend = HttpBackend::new(&config.api_url)?;
    let path = download_pptx(&backend, filename, out).await?;
    println!("Saved {}", path.display());
    Ok(())
}

/// Print progress labels until the upload settles.
async fn wait_for_slides(synth: &Synth) -> Result<SessionView> {
    let mut last_progress = String::new();
    while let Some(event) = synth.next_event().await {
        let Event::SessionUpdated(view) = event else {
            continue;
        };
        if !view.progress.is_empty() && view.progress != last_progress {
            println!("{}", view.progress);
            last_progress = view.progress.clone();
        }
        match view.state {
            ProcessingState::Success => return Ok(view),
            ProcessingState::Error => {
                return Err(anyhow!(view.error.unwrap_or_else(|| "Upload failed".into())))
            }
            // validation failures leave the session idle
            ProcessingState::Idle => {
                if let Some(error) = view.error {
                    return Err(anyhow!(error));
                }
            }
            _ => {}
        }
    }
    Err(anyhow!("session ended before the upload finished"))
}

async fn wait_for_download(synth: &Synth) -> Result<PathBuf> {
    while let Some(event) = synth.next_event().await {
        match event {
            Event::DownloadSaved { path } => return Ok(path),
            Event::SessionUpdated(SessionView {
                error: Some(error), ..
            }) => return Err(anyhow!(error)),
            _ => {}
        }
    }
    Err(anyhow!("session ended before the download finished"))
}

fn print_slides(view: &SessionView) {
    let total = view.slides.len();
    for (index, slide) in view.slides.iter().enumerate() {
        println!();
        println!("Slide {}/{}: {}", index + 1, total, slide.title);
        for bullet in &slide.bullets {
            println!("  • {bullet}");
        }
    }
}
