//! Session token issuance
//!
//! Two strategies share one issuer:
//! - Local: a random opaque token bound to an existing user
//! - Delegated: credentials (or an upstream access token) are exchanged with an
//!   external OAuth provider, the profile is upserted as a local user and a local
//!   session token is issued for it
//!
//! Only the SHA-256 of a session token is ever stored.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};
use tally_oauth_client::OAuthClient;

use crate::error::{ApiError, ApiResult};
use crate::models::{ExternalProfile, User};
use crate::repositories::UserRepository;

/// Number of random bytes in a session token
const SESSION_TOKEN_BYTES: usize = 32;

/// External identity provider used for delegated login
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange username and password for an upstream access token
    async fn password_grant(&self, username: &str, password: &str) -> ApiResult<String>;

    /// Fetch the profile owning an upstream access token
    async fn fetch_profile(&self, access_token: &str) -> ApiResult<ExternalProfile>;
}

#[async_trait]
impl IdentityProvider for OAuthClient {
    async fn password_grant(&self, username: &str, password: &str) -> ApiResult<String> {
        let grant = OAuthClient::password_grant(self, username, password).await?;
        Ok(grant.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> ApiResult<ExternalProfile> {
        let profile = OAuthClient::fetch_profile(self, access_token).await?;
        Ok(profile.into())
    }
}

/// Issues session tokens and records their hashes on users
#[derive(Clone)]
pub struct TokenIssuer {
    users: UserRepository,
}

impl TokenIssuer {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Issue a fresh session token for an existing user
    ///
    /// The previous session of that user stops resolving.
    ///
    /// # Errors
    /// - `ApiError::NotFound` if the user does not exist
    pub async fn issue_local(&self, user_id: &str) -> ApiResult<String> {
        let token = generate_session_token();
        self.users
            .set_session_hash(user_id, Some(hash_token(&token)))
            .await?;

        tracing::debug!(user_id = %user_id, "Session token issued");
        Ok(token)
    }

    /// Log in through the provider's password grant
    pub async fn issue_delegated(
        &self,
        provider: &dyn IdentityProvider,
        username: &str,
        password: &str,
    ) -> ApiResult<(String, User)> {
        let access_token = provider.password_grant(username, password).await?;
        self.issue_delegated_by_access_token(provider, &access_token)
            .await
    }

    /// Log in with an access token already issued by the provider
    ///
    /// # Errors
    /// - `ApiError::AuthProvider` if the provider rejects the token or returns an unusable profile
    /// - `ApiError::DuplicateEmail` if the profile email belongs to another local account
    pub async fn issue_delegated_by_access_token(
        &self,
        provider: &dyn IdentityProvider,
        access_token: &str,
    ) -> ApiResult<(String, User)> {
        let profile = provider.fetch_profile(access_token).await?;

        if profile.username.trim().is_empty() || profile.email.trim().is_empty() {
            return Err(ApiError::AuthProvider {
                status: None,
                body: "provider profile is missing username or email".to_string(),
            });
        }

        let token = generate_session_token();
        let (user, created) = self
            .users
            .upsert_external(&profile, access_token, hash_token(&token))
            .await?;

        tracing::info!(
            user_id = %user.id,
            external_id = profile.external_id,
            created,
            "Delegated login succeeded"
        );

        Ok((token, user))
    }
}

/// Generate an opaque session token from the OS random source
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash a token using SHA-256 for storage and lookup
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
