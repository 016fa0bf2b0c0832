use serde::{Deserialize, Serialize};
use slidesynth_common::Slide;
use std::fmt;
use std::path::PathBuf;

/// Phase of the upload workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingState {
    #[default]
    Idle,
    Uploading,
    Processing,
    Generating,
    Success,
    Error,
}

impl ProcessingState {
    pub const ALL: [ProcessingState; 6] = [
        ProcessingState::Idle,
        ProcessingState::Uploading,
        ProcessingState::Processing,
        ProcessingState::Generating,
        ProcessingState::Success,
        ProcessingState::Error,
    ];

    /// Forward transitions of the workflow. Reset to `Idle` from a busy state
    /// is a cancellation and is not listed here.
    pub fn can_transition_to(self, next: ProcessingState) -> bool {
        use ProcessingState::*;
        matches!(
            (self, next),
            (Idle, Uploading)
                | (Uploading, Processing)
                | (Processing, Generating)
                | (Generating, Success)
                | (Uploading | Processing | Generating, Error)
                | (Success | Error, Idle)
        )
    }

    /// A request is in flight.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            ProcessingState::Uploading | ProcessingState::Processing | ProcessingState::Generating
        )
    }

    pub fn accepts_upload(self) -> bool {
        self == ProcessingState::Idle
    }

    /// Progress text shown while this state is current.
    pub fn progress_label(self) -> Option<&'static str> {
        match self {
            ProcessingState::Uploading => Some("Uploading PDF..."),
            ProcessingState::Processing => Some("Processing PDF and extracting text..."),
            ProcessingState::Generating => Some("Generating slides with AI..."),
            ProcessingState::Error => Some("Upload failed."),
            ProcessingState::Idle | ProcessingState::Success => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingState::Idle => "idle",
            ProcessingState::Uploading => "uploading",
            ProcessingState::Processing => "processing",
            ProcessingState::Generating => "generating",
            ProcessingState::Success => "success",
            ProcessingState::Error => "error",
        }
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the user sees of an upload session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub slides: Vec<Slide>,
    pub state: ProcessingState,
    pub error: Option<String>,
    pub progress: String,
    pub current_slide: usize,
    /// Name of the uploaded file, e.g. `deck.pdf`
    pub filename: String,
    pub selected_file: Option<PathBuf>,
}

impl SessionView {
    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.current_slide)
    }

    pub fn has_previous(&self) -> bool {
        self.current_slide > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_slide + 1 < self.slides.len()
    }

    /// Slides are ready to browse and download.
    pub fn is_presentable(&self) -> bool {
        self.state == ProcessingState::Success && !self.slides.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthState {
    Checking,
    Healthy { status: String },
    Unreachable { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    SelectFile { path: PathBuf },
    NextSlide,
    PreviousSlide,
    SelectSlide { index: usize },
    DownloadPptx,
    Reset,
    CheckHealth,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    SessionUpdated(SessionView),
    Health(HealthState),
    DownloadSaved { path: PathBuf },
    ShutdownComplete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use ProcessingState::*;
        let allowed = [
            (Idle, Uploading),
            (Uploading, Processing),
            (Uploading, Error),
            (Processing, Generating),
            (Processing, Error),
            (Generating, Success),
            (Generating, Error),
            (Success, Idle),
            (Error, Idle),
        ];
        for from in ProcessingState::ALL {
            for to in ProcessingState::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_only_idle_accepts_upload() {
        for state in ProcessingState::ALL {
            assert_eq!(state.accepts_upload(), state == ProcessingState::Idle);
        }
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_string(&ProcessingState::Generating).unwrap();
        assert_eq!(json, r#""generating""#);
    }

    #[test]
    fn test_view_navigation_flags() {
        let slide = |t: &str| Slide {
            title: t.to_string(),
            bullets: vec![],
        };
        let mut view = SessionView {
            slides: vec![slide("A"), slide("B")],
            state: ProcessingState::Success,
            ..Default::default()
        };
        assert!(view.is_presentable());
        assert!(!view.has_previous());
        assert!(view.has_next());
        view.current_slide = 1;
        assert!(view.has_previous());
        assert!(!view.has_next());
        assert_eq!(view.current().map(|s| s.title.as_str()), Some("B"));

        let empty = SessionView::default();
        assert!(!empty.has_next());
        assert!(empty.current().is_none());
        assert!(!empty.is_presentable());
    }
}
