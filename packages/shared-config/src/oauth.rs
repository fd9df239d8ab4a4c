//! External OAuth identity provider configuration

use crate::{first_env, parse_env, ConfigResult};

/// Base URL used when no provider URL is configured
pub const DEFAULT_OAUTH_BASE_URL: &str = "https://gitlab.com/api/v4";

/// OAuth2 identity provider used for delegated login
///
/// The client credentials are optional so that the server can start without
/// them; the password grant reports the misconfiguration when it is used.
#[derive(Clone)]
pub struct OAuthProviderConfig {
    /// Provider API base URL (the token endpoint is `{base_url}/oauth/token`)
    pub base_url: String,

    /// OAuth application client id
    pub client_id: Option<String>,

    /// OAuth application client secret
    pub client_secret: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OAuthProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthProviderConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OAuthProviderConfig {
    /// Load provider configuration from environment variables
    ///
    /// `OAUTH_*` variables take precedence over the `GITLAB_*` names.
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            base_url: first_env(&["OAUTH_BASE_URL", "GITLAB_API_URL"])
                .unwrap_or_else(|| DEFAULT_OAUTH_BASE_URL.to_string()),
            client_id: first_env(&["OAUTH_CLIENT_ID", "GITLAB_CLIENT_ID"]),
            client_secret: first_env(&["OAUTH_CLIENT_SECRET", "GITLAB_CLIENT_SECRET"]),
            timeout_secs: parse_env("OAUTH_TIMEOUT_SECS", 10)?,
        })
    }

    /// Create a configuration for the given base URL without client credentials
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: None,
            client_secret: None,
            timeout_secs: 10,
        }
    }

    /// Attach client credentials (useful for testing)
    pub fn with_client(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Both client id and secret are present
    pub fn has_client_credentials(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    /// Get the full URL for a provider endpoint
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}
