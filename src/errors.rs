//! Error handling
//!
//! All failures are scoped to the current role-detail interaction; nothing
//! here is fatal at the process level.

use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, RoleApiError>;

/// Main error type for the role administration client
#[derive(Error, Debug)]
pub enum RoleApiError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog fetch failed or was incomplete (any page errored)
    #[error("Permission catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Requested role id has no corresponding detail
    #[error("Role not found: {0}")]
    RoleNotFound(u64),

    /// Backend declined the role update
    #[error("Save rejected (HTTP {status}): {detail}")]
    SaveRejected {
        /// HTTP status the backend answered with
        status: u16,
        /// Backend error detail text
        detail: String,
    },

    /// Transport-level failure
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    /// A save is already in flight for this role-detail session
    #[error("A save is already in flight for this role")]
    SaveInFlight,

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RoleApiError {
    /// Whether a user-initiated re-trigger of the same operation makes sense
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RoleApiError::NetworkUnavailable(_)
                | RoleApiError::CatalogUnavailable(_)
                | RoleApiError::SaveRejected { .. }
        )
    }

    /// Whether the error means the role no longer exists
    pub fn is_not_found(&self) -> bool {
        matches!(self, RoleApiError::RoleNotFound(_))
    }
}
