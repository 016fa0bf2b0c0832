use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use slidesynth_common::{HealthResponse, PDF_MIME};
use tracing::debug;

use crate::error::{ApiError, Result};

/// HTTP client for the SlideSynth backend.
///
/// All endpoints are resolved below `base_url`, so a backend mounted under a
/// path prefix (`http://host/slidesynth/`) keeps that prefix.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a base url".to_string(),
            });
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join path segments onto the base url; each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "not a base url".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /api/health`
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.endpoint(&["api", "health"])?;
        debug!(%url, "health check");
        let resp = self.http.get(url).send().await?;
        let body = ensure_success(resp).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `POST /api/upload-pdf` with the PDF under the multipart field `file`.
    ///
    /// Returns the raw response body once the backend answered with a success
    /// status; decoding is left to the caller.
    pub async fn upload_pdf(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let url = self.endpoint(&["api", "upload-pdf"])?;
        debug!(%url, file_name, size = bytes.len(), "uploading pdf");
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(PDF_MIME)?;
        let form = Form::new().part("file", part);
        let resp = self.http.post(url).multipart(form).send().await?;
        let body = ensure_success(resp).await?.text().await?;
        debug!(len = body.len(), "upload response received");
        Ok(body)
    }

    /// `GET /api/download-pptx/{stem}`
    pub async fn download_pptx(&self, stem: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(&["api", "download-pptx", stem])?;
        debug!(%url, "downloading pptx");
        let resp = self.http.get(url).send().await?;
        let bytes = ensure_success(resp).await?.bytes().await?;
        debug!(size = bytes.len(), "pptx downloaded");
        Ok(bytes.to_vec())
    }
}

async fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    debug!(%status, "response status");
    if status.is_success() {
        Ok(resp)
    } else {
        let text = resp.text().await.unwrap_or_default();
        debug!(%status, body = %text, "backend returned an error");
        Err(ApiError::Status {
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_bare_host() {
        let client = BackendClient::new("http://127.0.0.1:5000").unwrap();
        let url = client.endpoint(&["api", "health"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/health");
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let client = BackendClient::new("http://example.com/slidesynth/").unwrap();
        let url = client.endpoint(&["api", "upload-pdf"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/slidesynth/api/upload-pdf");
    }

    #[test]
    fn test_endpoint_encodes_segment() {
        let client = BackendClient::new("http://example.com").unwrap();
        let url = client
            .endpoint(&["api", "download-pptx", "q3 report/final"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.com/api/download-pptx/q3%20report%2Ffinal"
        );
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(matches!(
            BackendClient::new("not a url"),
            Err(ApiError::InvalidUrl { .. })
        ));
        assert!(matches!(
            BackendClient::new("mailto:someone@example.com"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
