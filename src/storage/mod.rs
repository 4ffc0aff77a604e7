//! Object storage access
//!
//! The fetch pipeline only needs three operations from a bucket: list it,
//! download one object, and build a public link for that object.

mod supabase;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;

pub use supabase::SupabaseStorage;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx answer from the storage API.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid storage response: {0}")]
    Decode(String),
}

/// One entry of a bucket listing.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredObject {
    pub name: String,
}

impl StoredObject {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list(&self, bucket: &str) -> Result<Vec<StoredObject>, StorageError>;

    async fn download(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError>;

    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// Percent-encodes each `/`-separated segment of an object key.
pub fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
