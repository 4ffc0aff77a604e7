use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use lopdf::Document;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Invalid PDF structure: {0}")]
    InvalidDocument(String),

    #[error("PDF text extraction failed: {0}")]
    Text(String),

    #[error("PDF extraction panicked (malformed document)")]
    Panicked,

    #[error("Extraction task failed: {0}")]
    Join(String),
}

/// Text and page count pulled out of one PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfContent {
    pub text: String,
    pub pages: usize,
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, data: Bytes) -> Result<PdfContent, ExtractionError>;
}

pub struct PdfProcessor;

impl PdfProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Blocking extraction. `pdf-extract` panics on some malformed input, so
    /// the whole parse runs behind `catch_unwind`.
    pub fn extract_blocking(data: &[u8]) -> Result<PdfContent, ExtractionError> {
        let start = Instant::now();

        let result = panic::catch_unwind(AssertUnwindSafe(|| -> Result<PdfContent, ExtractionError> {
            let pages = Document::load_mem(data)
                .map_err(|e| ExtractionError::InvalidDocument(e.to_string()))?
                .get_pages()
                .len();

            let text = pdf_extract::extract_text_from_mem(data)
                .map_err(|e| ExtractionError::Text(e.to_string()))?;

            Ok(PdfContent { text, pages })
        }));

        let content = match result {
            Ok(inner) => inner?,
            Err(_) => return Err(ExtractionError::Panicked),
        };

        tracing::debug!(
            "PDF processing completed in {}ms, extracted {} characters from {} pages",
            start.elapsed().as_millis(),
            content.text.len(),
            content.pages
        );

        Ok(content)
    }
}

#[async_trait]
impl TextExtractor for PdfProcessor {
    async fn extract(&self, data: Bytes) -> Result<PdfContent, ExtractionError> {
        tracing::info!("Starting PDF text extraction ({} bytes)", data.len());

        tokio::task::spawn_blocking(move || Self::extract_blocking(&data))
            .await
            .map_err(|e| ExtractionError::Join(e.to_string()))?
    }
}

impl Default for PdfProcessor {
    fn default() -> Self {
        Self::new()
    }
}
