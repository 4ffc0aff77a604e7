use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::DocumentFetcher;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<DocumentFetcher>,
}

impl AppState {
    pub fn new(fetcher: DocumentFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self::new(DocumentFetcher::from_config(&config.storage)?))
    }
}
