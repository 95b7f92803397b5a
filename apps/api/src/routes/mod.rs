pub mod health;
pub mod openapi;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::parser::handlers;
use crate::parser::orchestrator::MAX_FILE_SIZE_BYTES;
use crate::state::AppState;

/// Transport cap on request bodies. Kept above the file limit so that a
/// moderately oversized upload still reaches the size check and gets a
/// precise FILE_TOO_LARGE message.
pub const MAX_REQUEST_BODY_BYTES: usize = 4 * MAX_FILE_SIZE_BYTES;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/openapi.json", get(openapi::openapi_handler))
        .route(
            "/v1/parse/resume",
            post(handlers::handle_parse_resume)
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::parser::testing::{
        john_doe, parser, Extract, FakeExtractor, FakeStructurer, Structure, JOHN_DOE_TEXT,
    };

    const BOUNDARY: &str = "----ResumeFormBoundary7MA4YWxkTrZu0gW";

    struct Part<'a> {
        name: &'a str,
        filename: Option<&'a str>,
        content: &'a [u8],
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let disposition = match part.filename {
                Some(filename) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    part.name, filename
                ),
                None => format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    part.name
                ),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(part.content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/parse/resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn file_request(filename: &str, content: &[u8]) -> Request<Body> {
        upload_request(multipart_body(&[Part {
            name: "file",
            filename: Some(filename),
            content,
        }]))
    }

    struct Harness {
        router: Router,
        extractor: Arc<FakeExtractor>,
        structurer: Arc<FakeStructurer>,
    }

    fn harness(extract: Extract, structure: Structure) -> Harness {
        let extractor = FakeExtractor::new(extract);
        let structurer = FakeStructurer::new(structure);
        let router = build_router(AppState::new(parser(&extractor, &structurer)));
        Harness {
            router,
            extractor,
            structurer,
        }
    }

    fn happy() -> Harness {
        harness(
            Extract::Text(JOHN_DOE_TEXT, 2),
            Structure::Profile(john_doe()),
        )
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, content_type, json)
    }

    #[tokio::test]
    async fn test_valid_pdf_upload_succeeds() {
        let h = happy();
        let (status, content_type, json) =
            send(h.router, file_request("resume.pdf", b"%PDF-1.7 fake content")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["personal_info"]["full_name"], "John Doe");
        assert_eq!(json["metadata"]["file_info"]["pages_count"], 2);
        assert_eq!(json["metadata"]["file_info"]["file_size_bytes"], 21);
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_non_multipart_body_is_invalid_request() {
        let h = happy();
        let request = Request::builder()
            .method("POST")
            .uri("/v1/parse/resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"file\": \"resume.pdf\"}"))
            .unwrap();
        let (status, content_type, json) = send(h.router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "INVALID_REQUEST");
        assert!(json.get("metadata").is_none());
    }

    #[tokio::test]
    async fn test_empty_multipart_body_is_invalid_request() {
        let h = happy();
        let (status, _, json) = send(h.router, upload_request(Vec::new())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_missing_file_field_is_invalid_request() {
        let h = happy();
        let body = multipart_body(&[Part {
            name: "not_a_file",
            filename: Some("dummy.txt"),
            content: b"dummy",
        }]);
        let (status, _, json) = send(h.router, upload_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "INVALID_REQUEST");
        assert_eq!(h.extractor.calls(), 0);
    }

    #[tokio::test]
    async fn test_file_field_without_filename_is_file_missing() {
        let h = happy();
        let body = multipart_body(&[Part {
            name: "file",
            filename: None,
            content: b"just text",
        }]);
        let (status, _, json) = send(h.router, upload_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "FILE_MISSING");
    }

    #[tokio::test]
    async fn test_file_field_found_after_other_fields() {
        let h = happy();
        let body = multipart_body(&[
            Part {
                name: "note",
                filename: None,
                content: b"hello",
            },
            Part {
                name: "file",
                filename: Some("resume.pdf"),
                content: b"content",
            },
        ]);
        let (status, _, json) = send(h.router, upload_request(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
    }

    #[tokio::test]
    async fn test_empty_file_is_invalid_input() {
        let h = happy();
        let (status, _, json) = send(h.router, file_request("empty_resume.pdf", b"")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_text_file_is_unsupported() {
        let h = happy();
        let (status, content_type, json) =
            send(h.router, file_request("resume.txt", b"dummy")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(json["error"]["code"], "UNSUPPORTED_FILE_TYPE");
        assert_eq!(json["error"]["details"], "Received file: resume.txt");
        assert_eq!(h.structurer.calls(), 0);
    }

    #[tokio::test]
    async fn test_special_characters_in_filename() {
        let h = happy();
        let (status, _, json) =
            send(h.router, file_request("résumé-João_Smith's (2024).pdf", b"dummy")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["metadata"]["file_info"]["original_filename"],
            "résumé-João_Smith's (2024).pdf"
        );
    }

    #[tokio::test]
    async fn test_oversized_upload_is_file_too_large() {
        let h = happy();
        let big = vec![b'A'; 10 * 1024 * 1024];
        let (status, _, json) = send(h.router, file_request("large_resume.pdf", &big)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "FILE_TOO_LARGE");
        assert_eq!(h.extractor.calls(), 0);
    }

    #[tokio::test]
    async fn test_body_over_transport_limit_is_file_too_large() {
        let h = happy();
        let huge = vec![b'A'; MAX_REQUEST_BODY_BYTES + 1];
        let (status, _, json) = send(h.router, file_request("huge.pdf", &huge)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "FILE_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_extraction_failure_is_server_error() {
        let h = harness(Extract::Fail("corrupt xref"), Structure::Profile(john_doe()));
        let (status, _, json) = send(h.router, file_request("resume.pdf", b"dummy")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "PARSING_FAILED");
        assert_eq!(json["metadata"]["file_info"]["original_filename"], "resume.pdf");
    }

    #[tokio::test]
    async fn test_structuring_failure_is_server_error_without_data() {
        let h = harness(
            Extract::Text(JOHN_DOE_TEXT, 1),
            Structure::ApiError(429, "Rate limit reached"),
        );
        let (status, _, json) = send(h.router, file_request("resume.pdf", b"dummy")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "NLP_EXTRACTION_FAILED");
        assert!(json.get("data").is_none());
        assert!(!json["error"]["suggestions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let h = happy();
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, _, json) = send(h.router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert!(json["uptime"].as_f64().unwrap() >= 0.0);
        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let h = happy();
        let request = Request::builder()
            .uri("/openapi.json")
            .body(Body::empty())
            .unwrap();
        let (status, _, json) = send(h.router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["openapi"], "3.0.3");
    }
}
