use async_trait::async_trait;
use bytes::Bytes;

use crate::extraction::{DocumentKind, ExtractionError, ExtractionResult, TextExtractor};

/// `pdf-extract` backed extractor.
///
/// Parsing is CPU-bound and the library may panic on malformed input, so it
/// runs inside `tokio::task::spawn_blocking`; a panic comes back as
/// `ExtractionError::Aborted`.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(
        &self,
        bytes: Bytes,
        kind: DocumentKind,
    ) -> Result<ExtractionResult, ExtractionError> {
        match kind {
            DocumentKind::Pdf => tokio::task::spawn_blocking(move || extract_pdf(&bytes)).await?,
        }
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<ExtractionResult, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let page_count = pages.len().max(1);
    let text = pages.join("\n");

    tracing::debug!("Extracted {} chars from {} pages", text.len(), page_count);

    Ok(ExtractionResult { text, page_count })
}
