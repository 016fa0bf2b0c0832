use slidesynth_api::ApiError;
use thiserror::Error;

/// Failures surfaced to the user. Each variant renders as the message shown
/// next to the "Try Again" control.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthError {
    #[error("Please select a valid PDF file.")]
    InvalidFile,

    #[error("An upload is already in progress.")]
    Busy,

    #[error("Upload failed: {status}")]
    UploadStatus { status: u16 },

    #[error("{message}")]
    Transport { message: String },

    #[error("Invalid response format")]
    InvalidResponse,

    #[error("Failed to download PPTX file")]
    Download,
}

impl SynthError {
    /// Map a failed upload request.
    pub fn from_upload(err: ApiError) -> Self {
        match err {
            ApiError::Status { status } => SynthError::UploadStatus { status },
            ApiError::Decode(_) => SynthError::InvalidResponse,
            other => {
                let message = other.to_string();
                if message.is_empty() {
                    SynthError::Transport {
                        message: "Upload failed".to_string(),
                    }
                } else {
                    SynthError::Transport { message }
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SynthError>;
