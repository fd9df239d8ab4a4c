//! OAuth provider client implementation

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tally_shared_config::OAuthProviderConfig;
use tracing::{debug, instrument, warn};

use crate::error::{OAuthError, OAuthResult};
use crate::models::{PasswordGrantRequest, ProviderProfile, TokenGrant};

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Scopes requested by the password grant
const PASSWORD_GRANT_SCOPE: &str = "api read_user";

/// Upstream bodies longer than this are truncated in errors
const MAX_ERROR_BODY_LENGTH: usize = 2048;

/// OAuth2 identity provider client
#[derive(Clone)]
pub struct OAuthClient {
    http_client: Client,
    config: OAuthProviderConfig,
}

impl fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClient")
            .field("config", &self.config)
            .finish()
    }
}

impl OAuthClient {
    /// Create a client for the configured provider
    ///
    /// # Errors
    /// Returns `OAuthError::InvalidInput` if the base URL is empty, or
    /// `OAuthError::Http` if the HTTP client cannot be built.
    pub fn new(config: OAuthProviderConfig) -> OAuthResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(OAuthError::InvalidInput(
                "provider base URL cannot be empty".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(
                DEFAULT_CONNECT_TIMEOUT_SECS.min(config.timeout_secs.max(1)),
            ))
            .user_agent("Tally/1.0")
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Provider configuration this client was built with
    pub fn config(&self) -> &OAuthProviderConfig {
        &self.config
    }

    /// Exchange a username and password for a provider access token
    ///
    /// # Errors
    /// - `OAuthError::MissingClientCredentials` - client id or secret not configured
    /// - `OAuthError::Status` - the token endpoint answered with a non-2xx status
    /// - `OAuthError::Malformed` - the response has no `access_token`
    /// - `OAuthError::Timeout` / `OAuthError::Http` - transport failures
    #[instrument(skip(self, password))]
    pub async fn password_grant(&self, username: &str, password: &str) -> OAuthResult<TokenGrant> {
        let (client_id, client_secret) = match (&self.config.client_id, &self.config.client_secret)
        {
            (Some(id), Some(secret)) => (id.as_str(), secret.as_str()),
            _ => return Err(OAuthError::MissingClientCredentials),
        };

        let body = PasswordGrantRequest {
            grant_type: "password",
            client_id,
            client_secret,
            username,
            password,
            scope: PASSWORD_GRANT_SCOPE,
        };

        debug!("Requesting provider access token");

        let response = self
            .http_client
            .post(self.config.endpoint("oauth/token"))
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let (status, text) = read_success(response).await?;
        let grant: TokenGrant = decode(status, &text)?;
        if grant.access_token.is_empty() {
            return Err(OAuthError::Malformed {
                status,
                body: truncate(text),
                reason: "token response has an empty access_token".to_string(),
            });
        }
        Ok(grant)
    }

    /// Fetch the profile of the account owning `access_token`
    ///
    /// # Errors
    /// - `OAuthError::Status` - the profile endpoint answered with a non-2xx status
    /// - `OAuthError::Malformed` - `id`, `username` or `email` missing or mistyped
    /// - `OAuthError::Timeout` / `OAuthError::Http` - transport failures
    #[instrument(skip(self, access_token))]
    pub async fn fetch_profile(&self, access_token: &str) -> OAuthResult<ProviderProfile> {
        if access_token.trim().is_empty() {
            return Err(OAuthError::InvalidInput(
                "access token cannot be empty".to_string(),
            ));
        }

        let response = self
            .http_client
            .get(self.config.endpoint("user"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let (status, text) = read_success(response).await?;
        let profile: ProviderProfile = decode(status, &text)?;

        debug!(provider_user_id = profile.id, "Fetched provider profile");

        Ok(profile)
    }
}

fn map_transport_error(e: reqwest::Error) -> OAuthError {
    if e.is_timeout() {
        OAuthError::Timeout
    } else {
        OAuthError::Http(e)
    }
}

/// Read the body of a 2xx response, turning any other status into an error
async fn read_success(response: Response) -> OAuthResult<(u16, String)> {
    let status = response.status();
    let text = response.text().await.map_err(map_transport_error)?;

    if !status.is_success() {
        warn!(status = status.as_u16(), "OAuth provider returned an error status");
        return Err(OAuthError::Status {
            status: status.as_u16(),
            body: truncate(text),
        });
    }

    Ok((status.as_u16(), text))
}

/// Decode a JSON body, keeping the raw body when it does not fit `T`
fn decode<T: DeserializeOwned>(status: u16, text: &str) -> OAuthResult<T> {
    serde_json::from_str(text).map_err(|e| {
        warn!(status, error = %e, "OAuth provider returned an unusable body");
        OAuthError::Malformed {
            status,
            body: truncate(text.to_string()),
            reason: e.to_string(),
        }
    })
}

fn truncate(mut text: String) -> String {
    if text.len() > MAX_ERROR_BODY_LENGTH {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tally_test_utils::MockOAuthServer;

    fn client_for(server: &MockOAuthServer) -> OAuthClient {
        let config = OAuthProviderConfig::new(server.url()).with_client("app-id", "app-secret");
        OAuthClient::new(config).unwrap()
    }

    #[test]
    fn test_client_requires_base_url() {
        let result = OAuthClient::new(OAuthProviderConfig::new("  "));
        assert_matches!(result, Err(OAuthError::InvalidInput(_)));
    }

    #[test]
    fn test_client_debug_redacts_secret() {
        let config = OAuthProviderConfig::new("http://localhost").with_client("id", "top-secret");
        let client = OAuthClient::new(config).unwrap();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("top-secret"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "é".repeat(MAX_ERROR_BODY_LENGTH);
        let truncated = truncate(long);
        assert!(truncated.len() <= MAX_ERROR_BODY_LENGTH);
    }

    #[tokio::test]
    async fn test_password_grant_success() {
        let server = MockOAuthServer::start().await;
        server.mock_token_success("provider-token").await;

        let grant = client_for(&server)
            .password_grant("alice", "pw")
            .await
            .unwrap();
        assert_eq!(grant.access_token, "provider-token");
    }

    #[tokio::test]
    async fn test_password_grant_without_client_credentials() {
        let server = MockOAuthServer::start().await;
        let client = OAuthClient::new(OAuthProviderConfig::new(server.url())).unwrap();

        let result = client.password_grant("alice", "pw").await;
        assert_matches!(result, Err(OAuthError::MissingClientCredentials));
        assert_eq!(server.token_call_count().await, 0);
    }

    #[tokio::test]
    async fn test_password_grant_rejected() {
        let server = MockOAuthServer::start().await;
        server.mock_token_failure(401, "invalid_grant").await;

        let err = client_for(&server)
            .password_grant("alice", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.body().contains("invalid_grant"));
    }

    #[tokio::test]
    async fn test_fetch_profile_success() {
        let server = MockOAuthServer::start().await;
        server
            .mock_profile("tok", 42, "alice", "alice@example.com", None)
            .await;

        let profile = client_for(&server).fetch_profile("tok").await.unwrap();
        assert_eq!(profile.id, 42);
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.avatar_url, None);
    }

    #[tokio::test]
    async fn test_fetch_profile_malformed() {
        let server = MockOAuthServer::start().await;
        server
            .mock_profile_body(serde_json::json!({ "username": "no-id" }))
            .await;

        let err = client_for(&server).fetch_profile("tok").await.unwrap_err();
        assert_matches!(err, OAuthError::Malformed { status: 200, .. });
        assert!(err.body().contains("no-id"));
    }

    #[tokio::test]
    async fn test_password_grant_empty_access_token() {
        let server = MockOAuthServer::start().await;
        server.mock_token_success("").await;

        let err = client_for(&server)
            .password_grant("alice", "pw")
            .await
            .unwrap_err();
        assert_matches!(err, OAuthError::Malformed { status: 200, .. });
        assert!(err.body().contains("access_token"));
    }

    #[tokio::test]
    async fn test_fetch_profile_unauthorized() {
        let server = MockOAuthServer::start().await;
        server.mock_profile_failure(401, "401 Unauthorized").await;

        let err = client_for(&server).fetch_profile("bad").await.unwrap_err();
        assert_matches!(err, OAuthError::Status { status: 401, .. });
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let server = MockOAuthServer::start().await;
        server.mock_profile_delay(2_000).await;

        let mut config = OAuthProviderConfig::new(server.url());
        config.timeout_secs = 1;
        let client = OAuthClient::new(config).unwrap();

        let result = client.fetch_profile("tok").await;
        assert_matches!(result, Err(OAuthError::Timeout));
    }
}
