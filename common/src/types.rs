use serde::{Deserialize, Serialize};

/// One generated slide: a title and its bullet points, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// Body returned by `POST /api/upload-pdf`.
///
/// Every field defaults when absent so that a bare `{"success": false}` still
/// decodes; callers decide whether the payload is usable with [`is_usable`].
///
/// [`is_usable`]: UploadResponse::is_usable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub total_chunks: u32,
    #[serde(default)]
    pub total_slides: u32,
    #[serde(default)]
    pub slides: Vec<Slide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pptx_path: Option<String>,
}

impl UploadResponse {
    pub fn is_usable(&self) -> bool {
        self.success && !self.slides.is_empty()
    }
}

/// Body returned by `GET /api/health`.
///
/// Older backends reported the status under `rest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(alias = "rest")]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_defaults_missing_fields() {
        let resp: UploadResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.slides.is_empty());
        assert_eq!(resp.pptx_path, None);
        assert!(!resp.is_usable());
    }

    #[test]
    fn test_upload_response_full_payload() {
        let body = r#"{
            "success": true,
            "filename": "deck.pdf",
            "total_chunks": 3,
            "total_slides": 2,
            "slides": [
                {"title": "A", "bullets": ["b1", "b2"]},
                {"title": "B"}
            ],
            "pptx_path": "out/deck.pptx"
        }"#;
        let resp: UploadResponse = serde_json::from_str(body).unwrap();
        assert!(resp.is_usable());
        assert_eq!(resp.total_chunks, 3);
        assert_eq!(resp.slides[0].bullets, vec!["b1", "b2"]);
        assert!(resp.slides[1].bullets.is_empty());
        assert_eq!(resp.pptx_path.as_deref(), Some("out/deck.pptx"));
    }

    #[test]
    fn test_success_without_slides_is_not_usable() {
        let resp = UploadResponse {
            success: true,
            ..Default::default()
        };
        assert!(!resp.is_usable());
    }

    #[test]
    fn test_health_response_accepts_legacy_field() {
        let current: HealthResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        let legacy: HealthResponse = serde_json::from_str(r#"{"rest": "ok"}"#).unwrap();
        assert_eq!(current, legacy);
    }
}
