//! Error types for accounts resource operations.

use reqwest::StatusCode;

/// Result type alias for accounts resource operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Accounts resource error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status.
    #[error("Server returned {status}: {body}")]
    Status {
        /// Response status code.
        status: StatusCode,
        /// Response body, possibly empty.
        body: String,
    },

    /// Response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Update requested for an account that has never been created.
    #[error("Account has no id")]
    MissingId,
}

impl Error {
    /// Returns the HTTP status if the server answered with one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }
}
