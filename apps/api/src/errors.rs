use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Stable, machine-readable failure codes. Callers branch on these, so the
/// serialized names must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidRequest,
    FileMissing,
    InvalidInput,
    FileTooLarge,
    UnsupportedFileType,
    ParsingFailed,
    NlpExtractionFailed,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::FileMissing => "FILE_MISSING",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::FileTooLarge => "FILE_TOO_LARGE",
            ErrorCode::UnsupportedFileType => "UNSUPPORTED_FILE_TYPE",
            ErrorCode::ParsingFailed => "PARSING_FAILED",
            ErrorCode::NlpExtractionFailed => "NLP_EXTRACTION_FAILED",
        }
    }

    /// Client errors map to 400; failures inside extraction or structuring map to 500.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequest
            | ErrorCode::FileMissing
            | ErrorCode::InvalidInput
            | ErrorCode::FileTooLarge
            | ErrorCode::UnsupportedFileType => StatusCode::BAD_REQUEST,
            ErrorCode::ParsingFailed | ErrorCode::NlpExtractionFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn is_client_error(self) -> bool {
        self.status().is_client_error()
    }

    /// Fixed, human-actionable hints attached to every failure of this kind.
    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            ErrorCode::InvalidRequest => &[
                "Send the request as multipart/form-data",
                "Attach the resume under the form field named 'file'",
            ],
            ErrorCode::FileMissing => &[
                "Attach a resume file to the 'file' field",
                "Make sure the form part is sent as a file upload with a filename",
            ],
            ErrorCode::InvalidInput => &[
                "Make sure the uploaded file is not empty",
                "Make sure the uploaded file has a filename",
            ],
            ErrorCode::FileTooLarge => &[
                "Upload a file smaller than 5 MiB",
                "Compress the PDF or remove embedded images",
            ],
            ErrorCode::UnsupportedFileType => &[
                "Upload the resume as a PDF file",
                "Export DOCX or other formats to PDF before uploading",
            ],
            ErrorCode::ParsingFailed => &[
                "Make sure the PDF is not password-protected or corrupted",
                "Scanned or image-only PDFs are not supported, upload a PDF with selectable text",
                "Try re-exporting the document to PDF",
            ],
            ErrorCode::NlpExtractionFailed => &[
                "Try again in a few moments",
                "Make sure the resume contains readable text in a standard layout",
            ],
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure at any pipeline stage, already translated into the outward taxonomy.
/// `details` preserves the underlying cause for diagnosability.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{code}: {message}")]
pub struct ParseFailure {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl ParseFailure {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn invalid_request() -> Self {
        Self::new(
            ErrorCode::InvalidRequest,
            "Request body must be multipart/form-data with a 'file' field",
        )
    }

    pub fn file_missing() -> Self {
        Self::new(ErrorCode::FileMissing, "No file was uploaded")
    }

    pub fn invalid_input() -> Self {
        Self::new(
            ErrorCode::InvalidInput,
            "File buffer and filename are required",
        )
    }

    pub fn file_too_large(limit: usize, actual: Option<usize>) -> Self {
        let limit_desc = format!("{} MiB ({limit} bytes)", limit / (1024 * 1024));
        let message = match actual {
            Some(actual) => {
                format!("File size {actual} bytes exceeds the maximum allowed size of {limit_desc}")
            }
            None => format!("Upload exceeds the maximum allowed size of {limit_desc}"),
        };
        Self::new(ErrorCode::FileTooLarge, message)
    }

    pub fn unsupported_file_type(filename: &str) -> Self {
        Self::new(
            ErrorCode::UnsupportedFileType,
            "Unsupported file type, only PDF files are supported",
        )
        .with_details(format!("Received file: {filename}"))
    }

    pub fn extraction_failed(cause: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::ParsingFailed,
            "Failed to extract text from the document",
        )
        .with_details(cause.to_string())
    }

    pub fn no_text_extracted() -> Self {
        Self::new(
            ErrorCode::ParsingFailed,
            "No text could be extracted from the document",
        )
        .with_details("The document appears to be image-only, empty, or corrupted")
    }

    pub fn structuring_failed(cause: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::NlpExtractionFailed,
            "Failed to extract structured data from resume text",
        )
        .with_details(cause.to_string())
    }
}
