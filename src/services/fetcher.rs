use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};
use crate::models::{DownloadFailureDetails, DocumentId, FetchedDocument};
use crate::storage::{ObjectStore, SupabaseStorage};

use super::{ExtractionError, PdfContent, PdfProcessor, TextExtractor};

/// Resolves a filename against the bucket, downloads it and extracts its text.
///
/// Every stage runs exactly once, in order: advisory listing, download,
/// extraction, public URL. Only a failed download ends the run early; a
/// failed extraction still produces a usable link.
pub struct DocumentFetcher {
    bucket: String,
    store: Option<Arc<dyn ObjectStore>>,
    extractor: Arc<dyn TextExtractor>,
}

impl DocumentFetcher {
    /// `store` is `None` when storage settings are incomplete; every fetch
    /// then fails with `ConfigurationMissing` without touching the network.
    pub fn new(
        bucket: impl Into<String>,
        store: Option<Arc<dyn ObjectStore>>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            store,
            extractor,
        }
    }

    /// Builds a fetcher backed by Supabase Storage and `PdfProcessor`.
    pub fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let store: Option<Arc<dyn ObjectStore>> = match SupabaseStorage::from_config(config) {
            Ok(storage) => Some(Arc::new(storage)),
            Err(AppError::ConfigurationMissing) => None,
            Err(e) => return Err(e),
        };

        Ok(Self::new(
            config.bucket.clone(),
            store,
            Arc::new(PdfProcessor::new()),
        ))
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub async fn fetch_and_extract(&self, identifier: &str) -> AppResult<FetchedDocument> {
        let filename =
            DocumentId::normalize(identifier).ok_or_else(|| AppError::missing_parameter("Filename"))?;

        if filename.as_str() != identifier {
            info!(requested = %identifier, filename = %filename, "Auto-appending .pdf extension");
        }

        info!(filename = %filename, bucket = %self.bucket, "Attempting to fetch PDF");

        let store = self.store.as_ref().ok_or_else(|| {
            error!("Missing Supabase configuration");
            AppError::ConfigurationMissing
        })?;

        let available_files = match store.list(&self.bucket).await {
            Ok(objects) => {
                let names: Vec<String> = objects.into_iter().map(|o| o.name).collect();
                info!(bucket = %self.bucket, files = ?names, "Available files in bucket");
                names
            }
            Err(e) => {
                debug!(bucket = %self.bucket, error = %e, "Bucket listing unavailable");
                Vec::new()
            }
        };

        let data = match store.download(&self.bucket, filename.as_str()).await {
            Ok(data) => data,
            Err(e) => {
                error!(
                    filename = %filename,
                    bucket = %self.bucket,
                    error = %e,
                    "Error downloading PDF from storage"
                );
                return Err(AppError::download_failed(
                    e.to_string(),
                    DownloadFailureDetails {
                        filename: filename.into_inner(),
                        bucket: self.bucket.clone(),
                        available_files,
                    },
                ));
            }
        };

        info!(filename = %filename, size = data.len(), "Successfully downloaded");

        // Any extractor failure, panics included, degrades to an empty result.
        let extracted = AssertUnwindSafe(self.extractor.extract(data))
            .catch_unwind()
            .await
            .unwrap_or(Err(ExtractionError::Panicked));

        let content = match extracted {
            Ok(content) => {
                info!(
                    filename = %filename,
                    text_length = content.text.len(),
                    pages = content.pages,
                    "PDF text extracted"
                );
                content
            }
            Err(e) => {
                warn!(filename = %filename, error = %e, "Error parsing PDF, returning link without text");
                PdfContent::default()
            }
        };

        let url = store.public_url(&self.bucket, filename.as_str());

        Ok(FetchedDocument {
            filename,
            url,
            text: content.text,
            page_count: content.pages,
        })
    }
}
