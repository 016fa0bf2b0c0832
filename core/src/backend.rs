use async_trait::async_trait;
use slidesynth_api::{ApiError, BackendClient};

/// The three backend endpoints the client consumes.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Status string reported by `/api/health`.
    async fn health(&self) -> Result<String, ApiError>;

    /// Raw body of a successful `/api/upload-pdf` response.
    async fn upload_pdf(&self, file_name: String, bytes: Vec<u8>) -> Result<String, ApiError>;

    /// PPTX bytes for the upload whose name (without `.pdf`) is `stem`.
    async fn download_pptx(&self, stem: String) -> Result<Vec<u8>, ApiError>;
}

/// Adapter to wrap [`BackendClient`] into [`Backend`]
pub struct HttpBackend {
    inner: BackendClient,
}

impl HttpBackend {
    pub fn new(api_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            inner: BackendClient::new(api_url)?,
        })
    }

    pub fn client(&self) -> &BackendClient {
        &self.inner
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn health(&self) -> Result<String, ApiError> {
        Ok(self.inner.health().await?.status)
    }

    async fn upload_pdf(&self, file_name: String, bytes: Vec<u8>) -> Result<String, ApiError> {
        self.inner.upload_pdf(&file_name, bytes).await
    }

    async fn download_pptx(&self, stem: String) -> Result<Vec<u8>, ApiError> {
        self.inner.download_pptx(&stem).await
    }
}
