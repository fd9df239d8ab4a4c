//! Error handling for the Tally API
//!
//! A single error enum covers every failure a resolver can report. Errors are
//! never turned into process crashes: resolvers convert them into GraphQL
//! field errors carrying a stable `code` extension.

use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Main API error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // ========== Input ==========
    /// Missing or malformed argument, detected before any store access
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // ========== Authentication & Authorization ==========
    /// Email is already registered
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Email/password pair did not match
    #[error("invalid email or password")]
    InvalidCredentials,

    /// No valid session was presented
    #[error("authentication required")]
    Unauthorized,

    /// Valid session without sufficient rights
    #[error("forbidden: {0}")]
    Forbidden(String),

    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Identifier already taken
    #[error("{resource_type} already exists: {id}")]
    Conflict {
        resource_type: &'static str,
        id: String,
    },

    /// A "last item" query ran against an empty collection
    #[error("no {0} available")]
    EmptyCollection(&'static str),

    // ========== External Identity Provider ==========
    /// Identity provider failed or answered with something unusable
    #[error("identity provider error{}: {body}", status_suffix(.status))]
    AuthProvider { status: Option<u16>, body: String },

    /// Delegated login is not configured on this deployment
    #[error("identity provider is not configured: {0}")]
    MissingProviderConfig(String),

    // ========== Internal ==========
    /// Internal error (hashing failures, broken invariants)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::EmptyCollection(_) => "EMPTY_COLLECTION",
            Self::AuthProvider { .. } => "AUTH_PROVIDER_ERROR",
            Self::MissingProviderConfig(_) => "MISSING_PROVIDER_CONFIG",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Create a conflict error for a specific resource
    pub fn conflict(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::Conflict {
            resource_type,
            id: id.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Log the error with a severity matching its class
    pub fn log(&self) {
        match self {
            Self::Internal(_) | Self::Conflict { .. } => {
                tracing::error!(error = %self, code = self.error_code(), "Server error occurred");
            }
            Self::AuthProvider { status, .. } => {
                tracing::warn!(
                    error = %self,
                    code = self.error_code(),
                    upstream_status = ?status,
                    "Identity provider error"
                );
            }
            Self::MissingProviderConfig(_) => {
                tracing::error!(
                    error = %self,
                    code = self.error_code(),
                    "Deployment misconfigured"
                );
            }
            Self::Unauthorized | Self::Forbidden(_) | Self::InvalidCredentials => {
                tracing::warn!(error = %self, code = self.error_code(), "Authorization error");
            }
            _ => {
                tracing::debug!(error = %self, code = self.error_code(), "Client error");
            }
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        self.log();

        // Internal details stay in the logs
        let message = match self {
            Self::Internal(_) => "An unexpected error occurred".to_string(),
            other => other.to_string(),
        };

        async_graphql::Error::new(message).extend_with(|_, e| {
            e.set("code", self.error_code());
            if let Self::AuthProvider { status, body } = self {
                if let Some(status) = status {
                    e.set("upstreamStatus", *status as i32);
                }
                e.set("upstreamBody", body.as_str());
            }
        })
    }
}

impl From<tally_oauth_client::OAuthError> for ApiError {
    fn from(err: tally_oauth_client::OAuthError) -> Self {
        match err {
            tally_oauth_client::OAuthError::MissingClientCredentials => {
                Self::MissingProviderConfig("OAuth client id and secret are required".to_string())
            }
            tally_oauth_client::OAuthError::InvalidInput(msg) => Self::InvalidArgument(msg),
            other => Self::AuthProvider {
                status: other.status(),
                body: other.body(),
            },
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {})", s)).unwrap_or_default()
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::Unauthorized.error_code(), "UNAUTHORIZED");
        assert_eq!(ApiError::not_found("todo", "a").error_code(), "NOT_FOUND");
        assert_eq!(
            ApiError::EmptyCollection("todos").error_code(),
            "EMPTY_COLLECTION"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::not_found("todo", "abc123");
        assert_eq!(err.to_string(), "todo not found: abc123");

        let err = ApiError::AuthProvider {
            status: Some(502),
            body: "bad gateway".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "identity provider error (status 502): bad gateway"
        );

        let err = ApiError::AuthProvider {
            status: None,
            body: "timed out".to_string(),
        };
        assert_eq!(err.to_string(), "identity provider error: timed out");
    }

    #[test]
    fn test_malformed_provider_response_keeps_upstream_details() {
        let err = ApiError::from(tally_oauth_client::OAuthError::Malformed {
            status: 200,
            body: r#"{"username":"dev"}"#.to_string(),
            reason: "missing field `id`".to_string(),
        });

        assert_matches::assert_matches!(
            err,
            ApiError::AuthProvider { status: Some(200), ref body } if body.contains("dev")
        );
    }

    #[test]
    fn test_extend_sets_code_and_hides_internal_details() {
        let gql = ApiError::Internal("argon2 exploded".to_string()).extend();
        assert_eq!(gql.message, "An unexpected error occurred");
        let extensions = gql.extensions.expect("extensions set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("INTERNAL_ERROR"))
        );
    }

    #[test]
    fn test_extend_carries_upstream_status() {
        let gql = ApiError::AuthProvider {
            status: Some(401),
            body: "nope".to_string(),
        }
        .extend();
        let extensions = gql.extensions.expect("extensions set");
        assert_eq!(
            extensions.get("upstreamStatus"),
            Some(&async_graphql::Value::from(401))
        );
        assert_eq!(
            extensions.get("upstreamBody"),
            Some(&async_graphql::Value::from("nope"))
        );
    }

    #[test]
    fn test_missing_client_credentials_maps_to_config_error() {
        let err: ApiError = tally_oauth_client::OAuthError::MissingClientCredentials.into();
        assert_eq!(err.error_code(), "MISSING_PROVIDER_CONFIG");

        let err: ApiError = tally_oauth_client::OAuthError::Status {
            status: 500,
            body: "boom".to_string(),
        }
        .into();
        assert_eq!(
            err,
            ApiError::AuthProvider {
                status: Some(500),
                body: "boom".to_string()
            }
        );
    }
}
