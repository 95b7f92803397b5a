//! Resume parse orchestration.
//!
//! Stages run strictly in order and each one may end the request:
//! presence → size → type → text extraction → structuring → assembly.
//! The cheap checks always run before either capability is called.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::errors::ParseFailure;
use crate::extraction::{DocumentKind, TextExtractor};
use crate::models::profile::CandidateProfile;
use crate::models::response::ParseResponse;
use crate::parser::metadata::MetadataBuilder;
use crate::parser::structuring::StructuringClient;

/// Largest accepted upload: 5 MiB.
pub const MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Extracted text beyond this many characters is cut before structuring.
pub const MAX_STRUCTURING_CHARS: usize = 48_000;

#[derive(Debug, Clone)]
pub struct ParserLimits {
    pub max_file_bytes: usize,
    pub max_text_chars: usize,
    pub extraction_timeout: Option<Duration>,
    pub structuring_timeout: Option<Duration>,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: MAX_FILE_SIZE_BYTES,
            max_text_chars: MAX_STRUCTURING_CHARS,
            extraction_timeout: None,
            structuring_timeout: None,
        }
    }
}

/// One uploaded document. Owned by a single parse and dropped when it ends.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Bytes,
}

/// Runs the parse pipeline against injected capabilities. Holds no per-request
/// state, so one instance serves any number of concurrent requests.
#[derive(Clone)]
pub struct ResumeParser {
    extractor: Arc<dyn TextExtractor>,
    structurer: Arc<dyn StructuringClient>,
    limits: ParserLimits,
}

impl ResumeParser {
    pub fn new(extractor: Arc<dyn TextExtractor>, structurer: Arc<dyn StructuringClient>) -> Self {
        Self {
            extractor,
            structurer,
            limits: ParserLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ParserLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &ParserLimits {
        &self.limits
    }

    /// Parses one resume. Every outcome, including capability failures, is
    /// returned as a `ParseResponse`.
    #[instrument(
        name = "parse_resume",
        skip_all,
        fields(request_id = %Uuid::new_v4(), filename = %file.filename, size = file.bytes.len())
    )]
    pub async fn parse_resume(&self, file: UploadedFile) -> ParseResponse {
        info!("Resume parse started");
        let mut metadata = MetadataBuilder::start(&file.filename, file.bytes.len());

        match self.run(file, &mut metadata).await {
            Ok(profile) => {
                let metadata = metadata.finish();
                info!(
                    processing_time_ms = metadata.processing_time_ms,
                    warnings = metadata.warnings.len(),
                    "Resume parse succeeded"
                );
                ParseResponse::success(profile, metadata)
            }
            Err(failure) => {
                let metadata = metadata.finish();
                if failure.code.is_client_error() {
                    warn!(code = %failure.code, "Resume rejected: {}", failure.message);
                } else {
                    error!(
                        code = %failure.code,
                        details = failure.details.as_deref().unwrap_or_default(),
                        "Resume parse failed: {}",
                        failure.message
                    );
                }
                ParseResponse::failure(failure, Some(metadata))
            }
        }
    }

    async fn run(
        &self,
        file: UploadedFile,
        metadata: &mut MetadataBuilder,
    ) -> Result<CandidateProfile, ParseFailure> {
        let kind = self.validate(&file)?;
        metadata.set_file_type(kind.as_str());

        debug!(kind = kind.as_str(), "Extracting text");
        let extraction = bounded(
            self.limits.extraction_timeout,
            self.extractor.extract(file.bytes, kind),
        )
        .await
        .map_err(|limit| {
            ParseFailure::extraction_failed(format!(
                "Text extraction timed out after {}s",
                limit.as_secs()
            ))
        })?
        .map_err(ParseFailure::extraction_failed)?;

        metadata.set_pages(extraction.page_count);

        if extraction.text.trim().is_empty() {
            return Err(ParseFailure::no_text_extracted());
        }
        debug!(
            chars = extraction.text.chars().count(),
            pages = extraction.page_count,
            "Text extracted"
        );

        let text = match truncate_chars(&extraction.text, self.limits.max_text_chars) {
            Some(truncated) => {
                metadata.warn(format!(
                    "Resume text exceeded {} characters and was truncated before structuring",
                    self.limits.max_text_chars
                ));
                truncated
            }
            None => extraction.text.as_str(),
        };

        debug!("Structuring resume text");
        let profile = bounded(
            self.limits.structuring_timeout,
            self.structurer.structure(text),
        )
        .await
        .map_err(|limit| {
            ParseFailure::structuring_failed(format!(
                "Structuring call timed out after {}s",
                limit.as_secs()
            ))
        })?
        .map_err(ParseFailure::structuring_failed)?;

        if !profile.has_contact() {
            metadata.warn("No candidate name or email address was found");
        }
        if profile.has_no_history() {
            metadata.warn("No work experience, education, or projects were found");
        }

        Ok(profile)
    }

    /// Presence, size, and type checks. Never touches a capability.
    fn validate(&self, file: &UploadedFile) -> Result<DocumentKind, ParseFailure> {
        if file.bytes.is_empty() || file.filename.trim().is_empty() {
            return Err(ParseFailure::invalid_input());
        }

        if file.bytes.len() > self.limits.max_file_bytes {
            return Err(ParseFailure::file_too_large(
                self.limits.max_file_bytes,
                Some(file.bytes.len()),
            ));
        }

        DocumentKind::from_filename(&file.filename)
            .ok_or_else(|| ParseFailure::unsupported_file_type(&file.filename))
    }
}

/// Awaits `fut`, giving up after `limit` when one is set. The error carries the limit.
async fn bounded<F: Future>(limit: Option<Duration>, fut: F) -> Result<F::Output, Duration> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| limit),
        None => Ok(fut.await),
    }
}

/// Returns the first `max_chars` characters when `text` is longer.
fn truncate_chars(text: &str, max_chars: usize) -> Option<&str> {
    text.char_indices().nth(max_chars).map(|(idx, _)| &text[..idx])
}
