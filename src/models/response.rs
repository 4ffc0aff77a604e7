use serde::{Deserialize, Serialize};

use super::FetchedDocument;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPdfResponse {
    pub success: bool,
    pub filename: String,
    pub pdf_url: String,
    pub extracted_text: String,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadFailureDetails {
    pub filename: String,
    pub bucket: String,
    pub available_files: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<DownloadFailureDetails>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub storage: StorageHealth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageHealth {
    pub configured: bool,
    pub bucket: String,
}

impl From<FetchedDocument> for GetPdfResponse {
    fn from(doc: FetchedDocument) -> Self {
        Self {
            success: true,
            filename: doc.filename.into_inner(),
            pdf_url: doc.url,
            extracted_text: doc.text,
            total_pages: doc.page_count,
        }
    }
}
