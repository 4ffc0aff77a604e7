pub mod fetcher;
pub mod pdf_processor;

pub use fetcher::DocumentFetcher;
pub use pdf_processor::{ExtractionError, PdfContent, PdfProcessor, TextExtractor};
