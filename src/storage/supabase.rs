//! Supabase Storage REST client

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};

use super::{encode_key, ObjectStore, StorageError, StoredObject};

const LIST_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// Error body returned by the storage API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl SupabaseStorage {
    /// Fails with `ConfigurationMissing` when the endpoint or key is unset.
    pub fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let credentials = config.credentials()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::unexpected(format!("Failed to build storage client: {}", e)))?;

        Ok(Self {
            client,
            base_url: credentials.url.trim_end_matches('/').to_string(),
            anon_key: credentials.anon_key.to_string(),
        })
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Storage request failed")
                    .to_string()
            });

        debug!(status = status.as_u16(), body = %body, "Storage API returned an error");

        Err(StorageError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn list(&self, bucket: &str) -> Result<Vec<StoredObject>, StorageError> {
        let url = self.object_url(&format!("list/{}", encode_key(bucket)));
        let body = json!({
            "prefix": "",
            "limit": LIST_LIMIT,
            "offset": 0,
            "sortBy": { "column": "name", "order": "asc" },
        });

        let response = self.authorized(self.client.post(url)).json(&body).send().await?;
        let response = Self::check(response).await?;

        response
            .json::<Vec<StoredObject>>()
            .await
            .map_err(|e| StorageError::Decode(e.to_string()))
    }

    async fn download(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        let url = self.object_url(&format!("{}/{}", encode_key(bucket), encode_key(key)));

        let response = self.authorized(self.client.get(url)).send().await?;
        let response = Self::check(response).await?;

        Ok(response.bytes().await?)
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        self.object_url(&format!("public/{}/{}", encode_key(bucket), encode_key(key)))
    }
}
