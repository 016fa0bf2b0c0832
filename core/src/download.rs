use std::io::{self, Write};
use std::path::{Path, PathBuf};

use slidesynth_common::{pptx_download_name, strip_pdf_extension};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::backend::Backend;
use crate::error::{Result, SynthError};

/// Fetch the presentation generated for `filename` and save it as
/// `<stem>_slides.pptx` inside `dir`.
pub async fn download_pptx(backend: &dyn Backend, filename: &str, dir: &Path) -> Result<PathBuf> {
    let stem = strip_pdf_extension(filename).to_string();
    let bytes = backend.download_pptx(stem).await.map_err(|err| {
        warn!(%err, filename, "pptx download failed");
        SynthError::Download
    })?;
    save_pptx(dir.to_path_buf(), pptx_download_name(filename), bytes)
        .await
        .map_err(|err| {
            warn!(%err, dir = %dir.display(), "could not save pptx");
            SynthError::Download
        })
}

/// Write `bytes` to `dir/file_name` through a temporary file in the same
/// directory; the target only appears once fully written.
pub async fn save_pptx(dir: PathBuf, file_name: String, bytes: Vec<u8>) -> io::Result<PathBuf> {
    tokio::task::spawn_blocking(move || -> io::Result<PathBuf> {
        std::fs::create_dir_all(&dir)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        tmp.flush()?;
        let target = dir.join(&file_name);
        tmp.persist(&target).map_err(|e| e.error)?;
        info!(path = %target.display(), size = bytes.len(), "saved pptx");
        Ok(target)
    })
    .await
    .map_err(io::Error::other)?
}
