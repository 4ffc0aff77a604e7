use std::env;
use std::time::Duration;
use anyhow::{Result, Context};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

pub const DEFAULT_BUCKET: &str = "pdfs";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub storage: StorageConfig,
}

/// Supabase Storage settings. Endpoint and key stay optional here so the
/// server can boot without them; requests then fail with
/// `ConfigurationMissing`.
#[derive(Clone, Default)]
pub struct StorageConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub bucket: String,
    pub timeout_seconds: Option<u64>,
}

/// Borrowed view of the settings that must be present before any storage call.
#[derive(Debug, Clone, Copy)]
pub struct StorageCredentials<'a> {
    pub url: &'a str,
    pub anon_key: &'a str,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let config = Config {
            server_host: var("SERVER_HOST").unwrap_or_else(|| {
                info!("SERVER_HOST not set, using default: 0.0.0.0");
                "0.0.0.0".to_string()
            }),
            server_port: Self::parse_var("PORT", var("PORT"), None)
                .or(Self::parse_var("SERVER_PORT", var("SERVER_PORT"), Some(8080)))
                .context("Failed to parse SERVER_PORT")?,
            storage: StorageConfig {
                url: var("SUPABASE_URL"),
                anon_key: var("SUPABASE_ANON_KEY"),
                bucket: var("SUPABASE_BUCKET_NAME").unwrap_or_else(|| {
                    info!("SUPABASE_BUCKET_NAME not set, using default: {}", DEFAULT_BUCKET);
                    DEFAULT_BUCKET.to_string()
                }),
                timeout_seconds: Self::parse_var(
                    "STORAGE_TIMEOUT_SECONDS",
                    var("STORAGE_TIMEOUT_SECONDS"),
                    None,
                ),
            },
        };

        config.validate()?;

        if config.storage.credentials().is_err() {
            warn!("SUPABASE_URL or SUPABASE_ANON_KEY not set; PDF requests will fail until configured");
        }

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    fn parse_var<T>(var_name: &str, raw: Option<String>, default: Option<T>) -> Option<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match raw {
            Some(val) => match val.trim().parse() {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    default
                }
            },
            None => default,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.storage.timeout_seconds == Some(0) {
            return Err(anyhow::anyhow!("STORAGE_TIMEOUT_SECONDS must be greater than 0"));
        }
        if self.storage.bucket.contains('/') {
            return Err(anyhow::anyhow!("SUPABASE_BUCKET_NAME must not contain '/'"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            anon_key: Some(anon_key.into()),
            bucket: DEFAULT_BUCKET.to_string(),
            timeout_seconds: None,
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn credentials(&self) -> AppResult<StorageCredentials<'_>> {
        match (self.url.as_deref(), self.anon_key.as_deref()) {
            (Some(url), Some(anon_key)) => Ok(StorageCredentials { url, anon_key }),
            _ => Err(AppError::ConfigurationMissing),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

// Keeps the access key out of logs.
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("url", &self.url)
            .field("anon_key", &self.anon_key.as_ref().map(|_| "<redacted>"))
            .field("bucket", &self.bucket)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
