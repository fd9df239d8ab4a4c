//! OAuth provider request and response models

use serde::{Deserialize, Serialize};

/// Access token returned by the token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// Bearer token for the provider API
    pub access_token: String,
    /// Token type, usually "Bearer"
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Identity fields consumed from the provider's `/user` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Numeric provider user id
    pub id: i64,
    /// Provider username
    pub username: String,
    /// Primary email address
    pub email: String,
    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// JSON body posted to the token endpoint
#[derive(Debug, Serialize)]
pub(crate) struct PasswordGrantRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub scope: &'static str,
}
