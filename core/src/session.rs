use std::path::{Path, PathBuf};

use slidesynth_common::{display_file_name, is_pdf_path, UploadResponse};
use slidesynth_protocol::{ProcessingState, SessionView};
use tracing::{debug, info, warn};

use crate::error::{Result, SynthError};

/// Upload and navigation state of one client.
///
/// Every upload and every reset starts a new generation. Results of async
/// work carry the generation they were started under; results from an older
/// generation are dropped without touching the view.
#[derive(Debug, Default)]
pub struct Session {
    view: SessionView,
    generation: u64,
}

/// An accepted upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub generation: u64,
    pub path: PathBuf,
    pub file_name: String,
}

/// An accepted download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTicket {
    pub generation: u64,
    /// Uploaded file name, still carrying its `.pdf` extension
    pub filename: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Validate `path` and enter `Uploading`.
    ///
    /// A non-PDF path records the validation message and leaves the state
    /// alone. A busy or finished session rejects the request without any
    /// change; it has to be reset first.
    pub fn begin_upload(&mut self, path: &Path) -> Result<UploadTicket> {
        if !self.view.state.accepts_upload() {
            warn!(state = %self.view.state, "upload rejected, session not idle");
            return Err(SynthError::Busy);
        }
        if !is_pdf_path(path) {
            info!(path = %path.display(), "rejected non-pdf selection");
            self.view.error = Some(SynthError::InvalidFile.to_string());
            return Err(SynthError::InvalidFile);
        }

        self.generation += 1;
        let file_name = display_file_name(path);
        self.view.slides.clear();
        self.view.current_slide = 0;
        self.view.error = None;
        self.view.filename = file_name.clone();
        self.view.selected_file = Some(path.to_path_buf());
        self.enter(ProcessingState::Uploading);

        Ok(UploadTicket {
            generation: self.generation,
            path: path.to_path_buf(),
            file_name,
        })
    }

    /// Move an in-flight upload to its next stage (`Processing`, `Generating`).
    pub fn advance(&mut self, generation: u64, next: ProcessingState) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        if !self.view.state.can_transition_to(next) {
            warn!(from = %self.view.state, to = %next, "ignored invalid transition");
            return false;
        }
        self.enter(next);
        true
    }

    /// Settle an in-flight upload.
    pub fn finish_upload(&mut self, generation: u64, result: Result<UploadResponse>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        let outcome = result.and_then(|resp| {
            if resp.is_usable() {
                Ok(resp)
            } else {
                Err(SynthError::InvalidResponse)
            }
        });
        match outcome {
            Ok(resp) if self.view.state.can_transition_to(ProcessingState::Success) => {
                let source = if resp.filename.is_empty() {
                    self.view.filename.clone()
                } else {
                    resp.filename
                };
                self.view.slides = resp.slides;
                self.view.current_slide = 0;
                self.enter(ProcessingState::Success);
                self.view.progress = format!(
                    "Successfully generated {} slides from {}",
                    self.view.slides.len(),
                    source
                );
                true
            }
            Ok(_) => {
                warn!(state = %self.view.state, "upload finished before generating stage");
                false
            }
            Err(err) => {
                if !self.view.state.can_transition_to(ProcessingState::Error) {
                    warn!(state = %self.view.state, %err, "ignored upload failure");
                    return false;
                }
                info!(%err, "upload failed");
                self.view.slides.clear();
                self.view.current_slide = 0;
                self.view.error = Some(err.to_string());
                self.enter(ProcessingState::Error);
                true
            }
        }
    }

    pub fn next_slide(&mut self) -> bool {
        if self.view.has_next() {
            self.view.current_slide += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_slide(&mut self) -> bool {
        if self.view.has_previous() {
            self.view.current_slide = (self.view.current_slide - 1).min(self.last_index());
            true
        } else {
            false
        }
    }

    /// Jump straight to `index`; out-of-range indices are ignored.
    pub fn select_slide(&mut self, index: usize) -> bool {
        if index < self.view.slides.len() {
            self.view.current_slide = index;
            true
        } else {
            debug!(index, len = self.view.slides.len(), "ignored slide selection");
            false
        }
    }

    /// Available once slides were generated.
    pub fn download_ticket(&self) -> Option<DownloadTicket> {
        if self.view.state != ProcessingState::Success || self.view.filename.is_empty() {
            return None;
        }
        Some(DownloadTicket {
            generation: self.generation,
            filename: self.view.filename.clone(),
        })
    }

    pub fn fail_download(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.view.error = Some(SynthError::Download.to_string());
        true
    }

    /// Back to the initial snapshot. Anything still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.view = SessionView::default();
        debug!(generation = self.generation, "session reset");
    }

    fn enter(&mut self, state: ProcessingState) {
        info!(from = %self.view.state, to = %state, "processing state");
        self.view.state = state;
        if let Some(label) = state.progress_label() {
            self.view.progress = label.to_string();
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation == self.generation {
            true
        } else {
            debug!(generation, current = self.generation, "dropped stale result");
            false
        }
    }

    fn last_index(&self) -> usize {
        self.view.slides.len().saturating_sub(1)
    }
}

/// Decode an upload body; anything that is not a usable `UploadResponse` is a
/// format error.
pub fn parse_upload_body(body: &str) -> Result<UploadResponse> {
    let resp: UploadResponse =
        serde_json::from_str(body).map_err(|_| SynthError::InvalidResponse)?;
    if resp.is_usable() {
        Ok(resp)
    } else {
        Err(SynthError::InvalidResponse)
    }
}
