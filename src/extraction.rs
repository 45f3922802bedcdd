//! Text extraction from uploaded documents.
//!
//! PDF parsing is delegated to `pdf-extract`, which is synchronous and may panic on malformed
//! input, so it runs on the blocking pool and a panic surfaces as [`ExtractionError::Worker`].

use async_trait::async_trait;
use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Errors raised while pulling text out of an upload.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The upload carried no bytes.
    #[error("Uploaded file is empty")]
    EmptyUpload,
    /// The upload does not start with a PDF header.
    #[error("Uploaded file is not a PDF")]
    NotPdf,
    /// The PDF parser rejected the document.
    #[error("Unable to read PDF: {0}")]
    Unreadable(String),
    /// The extraction task panicked or was cancelled.
    #[error("Extraction worker failed: {0}")]
    Worker(String),
}

/// Interface implemented by document text extractors.
#[async_trait]
pub trait TextExtractor {
    /// Extract raw text from the uploaded bytes.
    async fn extract_text(&self, bytes: Vec<u8>) -> Result<String, ExtractionError>;
}

/// Extractor backed by the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Construct a new PDF extractor.
    pub const fn new() -> Self {
        Self
    }
}

/// Check for the `%PDF-` header, tolerating leading whitespace some producers emit.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|byte| !byte.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(PDF_MAGIC)
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, bytes: Vec<u8>) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::EmptyUpload);
        }
        if !looks_like_pdf(&bytes) {
            return Err(ExtractionError::NotPdf);
        }

        let size = bytes.len();
        tracing::debug!(bytes = size, "Extracting PDF text");
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|error| ExtractionError::Worker(error.to_string()))?
            .map_err(|error| ExtractionError::Unreadable(error.to_string()))?;
        tracing::debug!(bytes = size, chars = text.len(), "PDF text extracted");
        Ok(text)
    }
}

/// Build the text extractor used by the server.
pub fn get_text_extractor() -> Box<dyn TextExtractor + Send + Sync> {
    Box::new(PdfTextExtractor::new())
}
