//! Text extraction: turns raw document bytes into plain text and a page count.
//!
//! `ResumeParser` holds an `Arc<dyn TextExtractor>`; the production backend is
//! `PdfTextExtractor`, tests substitute their own.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub mod pdf;

pub use pdf::PdfTextExtractor;

/// Document types the service accepts, detected from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
}

impl DocumentKind {
    /// Case-insensitive extension match. `None` for anything unsupported,
    /// including filenames without an extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        match extension(filename)?.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
        }
    }
}

/// Lowercased extension as declared by the client, used for reporting only.
pub fn declared_extension(filename: &str) -> String {
    extension(filename)
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

fn extension(filename: &str) -> Option<&str> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

/// Text and page count of one document. `text` may be empty: image-only
/// documents extract successfully with no text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub text: String,
    pub page_count: usize,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("Text extraction task aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(
        &self,
        bytes: Bytes,
        kind: DocumentKind,
    ) -> Result<ExtractionResult, ExtractionError>;
}
