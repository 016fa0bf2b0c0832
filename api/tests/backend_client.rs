use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use slidesynth_api::{ApiError, BackendClient};
use tiny_http::{Header, Response, Server};

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    url: String,
    content_type: Option<String>,
    body: Vec<u8>,
}

/// Serves a single canned response per request and records what it received.
struct FakeBackend {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeBackend {
    fn start(status: u16, content_type: &'static str, body: Vec<u8>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut received = Vec::new();
                request.as_reader().read_to_end(&mut received).unwrap();
                seen.lock().unwrap().push(Recorded {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    content_type: request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Content-Type"))
                        .map(|h| h.value.to_string()),
                    body: received,
                });
                let header =
                    Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()).unwrap();
                let response = Response::from_data(body.clone())
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
        }
    }

    fn json(status: u16, body: &str) -> Self {
        Self::start(status, "application/json", body.as_bytes().to_vec())
    }

    fn client(&self) -> BackendClient {
        BackendClient::new(&self.base_url).unwrap()
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn health_reports_status_field() {
    let backend = FakeBackend::json(200, r#"{"status": "healthy"}"#);
    let health = backend.client().health().await.unwrap();
    assert_eq!(health.status, "healthy");

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "/api/health");
}

#[tokio::test]
async fn health_accepts_legacy_rest_field() {
    let backend = FakeBackend::json(200, r#"{"rest": "health data"}"#);
    let health = backend.client().health().await.unwrap();
    assert_eq!(health.status, "health data");
}

#[tokio::test]
async fn health_non_ok_status_is_an_error() {
    let backend = FakeBackend::json(503, r#"{"status": "down"}"#);
    let err = backend.client().health().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "HTTP error! status: 503");
}

#[tokio::test]
async fn health_malformed_body_is_a_decode_error() {
    let backend = FakeBackend::json(200, "<html>not json</html>");
    let err = backend.client().health().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let backend = FakeBackend::json(200, r#"{"success": true}"#);
    let body = backend
        .client()
        .upload_pdf("deck.pdf", b"%PDF-1.4 fake".to_vec())
        .await
        .unwrap();
    assert_eq!(body, r#"{"success": true}"#);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "/api/upload-pdf");
    assert!(request
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("multipart/form-data"));

    let sent = String::from_utf8_lossy(&request.body);
    assert!(sent.contains(r#"name="file""#));
    assert!(sent.contains(r#"filename="deck.pdf""#));
    assert!(sent
        .to_ascii_lowercase()
        .contains("content-type: application/pdf"));
    assert!(sent.contains("%PDF-1.4 fake"));
}

#[tokio::test]
async fn upload_server_error_reports_status() {
    let backend = FakeBackend::json(500, r#"{"error": "boom"}"#);
    let err = backend
        .client()
        .upload_pdf("deck.pdf", b"%PDF".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn upload_to_closed_port_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = BackendClient::new(&format!("http://127.0.0.1:{port}")).unwrap();
    let err = client
        .upload_pdf("deck.pdf", b"%PDF".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn download_requests_stem_and_returns_bytes() {
    let payload = vec![0x50, 0x4b, 0x03, 0x04, 0xff, 0x00];
    let backend = FakeBackend::start(
        200,
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        payload.clone(),
    );
    let bytes = backend.client().download_pptx("deck").await.unwrap();
    assert_eq!(bytes, payload);

    let requests = backend.requests();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "/api/download-pptx/deck");
}

#[tokio::test]
async fn download_not_found_is_an_error() {
    let backend = FakeBackend::json(404, r#"{"error": "missing"}"#);
    let err = backend.client().download_pptx("deck").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}
