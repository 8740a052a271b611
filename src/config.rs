//! Client configuration

use serde::{Deserialize, Serialize};

/// Configuration for [`RoleApiClient`](crate::client::RoleApiClient)
///
/// Authentication state is carried here explicitly; the matrix logic never
/// reaches into ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the role administration API (e.g. `https://host/api/`)
    pub base_url: String,
    /// Bearer token sent on every request, if any
    pub auth_token: Option<String>,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Page size requested when walking paginated collections
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth_token: None,
            timeout: 30,
            page_size: 100,
        }
    }
}

impl ApiConfig {
    /// Config with a base URL and otherwise default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the bearer token
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}
