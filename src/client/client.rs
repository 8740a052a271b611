//! Core client construction and request plumbing

use std::time::Duration;

use tracing::info;
use url::Url;

use crate::config::ApiConfig;
use crate::errors::{Result, RoleApiError};

/// Client for the role administration API
///
/// Holds one pooled `reqwest::Client`; no state is cached across calls —
/// every load re-fetches from the backend.
#[derive(Debug)]
pub struct RoleApiClient {
    pub(crate) config: ApiConfig,
    pub(crate) http_client: reqwest::Client,
    base: Url,
}

impl RoleApiClient {
    /// Create a new client
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(RoleApiError::Config("No base URL configured".to_string()));
        }

        // Url::join treats a base without a trailing slash as a file path
        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base = Url::parse(&base_url)
            .map_err(|e| RoleApiError::Config(format!("Invalid base URL: {}", e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| {
                RoleApiError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        info!("RoleApiClient created for {}", base);

        Ok(Self {
            config,
            http_client,
            base,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Resolve an endpoint path against the base URL
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| RoleApiError::Config(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// Request builder with the configured bearer token applied
    pub(crate) fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let mut builder = self.http_client.request(method, url);
        if let Some(token) = &self.config.auth_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder
    }
}
