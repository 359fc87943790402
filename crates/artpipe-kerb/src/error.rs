//! Transport-level errors.
//!
//! These are internal to the kerberos transport; the API clients map them
//! into the resolver's taxonomy at their port boundary.

use thiserror::Error;

/// Result type alias for transport operations.
pub type KerbResult<T> = Result<T, KerbError>;

/// Errors raised by the ticket-authenticated transport.
#[derive(Debug, Error)]
pub enum KerbError {
    /// The endpoint answered 404.
    #[error("Resource not found: {url}")]
    NotFound { url: String },

    /// The endpoint answered 401 even after the credential refresh.
    #[error("Authentication failed after credential refresh: {url}")]
    Unauthorized { url: String },

    /// Any other non-success status.
    #[error("Request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not decode as the expected JSON.
    #[error("Response decoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Credential refresh itself failed.
    #[error("Credential refresh failed: {0}")]
    Refresh(String),
}
