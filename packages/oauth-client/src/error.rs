//! OAuth provider error types

use thiserror::Error;

/// OAuth provider client errors
#[derive(Error, Debug)]
pub enum OAuthError {
    /// Client id or secret is not configured
    #[error("OAuth client credentials are not configured")]
    MissingClientCredentials,

    /// Invalid input provided to a client method
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP transport failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Provider answered with a success status but an unusable body
    #[error("malformed provider response (status {status}): {reason}")]
    Malformed {
        status: u16,
        body: String,
        reason: String,
    },

    /// Request timeout
    #[error("request to OAuth provider timed out")]
    Timeout,
}

impl OAuthError {
    /// Upstream HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            OAuthError::Status { status, .. } | OAuthError::Malformed { status, .. } => {
                Some(*status)
            }
            OAuthError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Upstream response body, or the error description when there is none
    pub fn body(&self) -> String {
        match self {
            OAuthError::Status { body, .. } | OAuthError::Malformed { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for OAuth provider operations
pub type OAuthResult<T> = Result<T, OAuthError>;
