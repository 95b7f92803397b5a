//! Axum route handler for the parse API.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
};
use tracing::{debug, warn};

use crate::errors::ParseFailure;
use crate::models::response::ParseResponse;
use crate::parser::UploadedFile;
use crate::state::AppState;

/// POST /v1/parse/resume
///
/// Expects multipart form data with the resume under the `file` field.
/// Always answers with a `ParseResponse` body; the status follows the error code.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ParseResponse {
    let max_file_bytes = state.parser.limits().max_file_bytes;
    match read_upload(multipart, max_file_bytes).await {
        Ok(file) => state.parser.parse_resume(file).await,
        Err(failure) => {
            warn!(code = %failure.code, "Upload rejected: {}", failure.message);
            ParseResponse::failure(failure, None)
        }
    }
}

/// Pulls the `file` part out of the form. Other parts are skipped.
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
    max_file_bytes: usize,
) -> Result<UploadedFile, ParseFailure> {
    let mut multipart = multipart
        .map_err(|rejection| ParseFailure::invalid_request().with_details(rejection.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_failure(e, max_file_bytes))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" {
            debug!("Skipping form field '{name}'");
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_string) else {
            return Err(ParseFailure::file_missing()
                .with_details("Form field 'file' is not a file upload"));
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| read_failure(e, max_file_bytes))?;

        debug!("Read {} bytes for '{}'", bytes.len(), filename);
        return Ok(UploadedFile { filename, bytes });
    }

    Err(ParseFailure::invalid_request().with_details("Form field 'file' was not found"))
}

/// A body cut off by the transport limit is still an oversized upload.
fn read_failure(err: MultipartError, max_file_bytes: usize) -> ParseFailure {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ParseFailure::file_too_large(max_file_bytes, None)
    } else {
        ParseFailure::invalid_request().with_details(err.body_text())
    }
}
