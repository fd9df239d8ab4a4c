//! Authentication service for Tally
//!
//! This module provides:
//! - Signup with Argon2id password hashing
//! - Email/password login issuing an opaque session token
//! - Delegated login through an external identity provider
//! - Admin password reset

use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::models::{normalize_email, Identity, User};
use crate::repositories::UserRepository;
use crate::services::password::PasswordService;
use crate::services::token::{IdentityProvider, TokenIssuer};
use crate::validation::{require_non_blank, validate_email, validate_new_password};

enum DelegatedCredential<'a> {
    AccessToken(&'a str),
    Password(&'a str),
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    passwords: PasswordService,
    issuer: TokenIssuer,
    provider: Option<Arc<dyn IdentityProvider>>,
}

impl AuthService {
    /// Create a new authentication service
    ///
    /// Without a provider, delegated login fails with
    /// `ApiError::MissingProviderConfig`.
    pub fn new(
        users: UserRepository,
        passwords: PasswordService,
        provider: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        Self {
            issuer: TokenIssuer::new(users.clone()),
            users,
            passwords,
            provider,
        }
    }

    /// Register a new user and open a session for it
    ///
    /// # Errors
    /// - `ApiError::InvalidArgument` if email or password is invalid
    /// - `ApiError::DuplicateEmail` if the email is already registered
    pub async fn signup(&self, email: &str, password: &str) -> ApiResult<(String, User)> {
        let email = validate_email(email)?;
        validate_new_password(password)?;

        // Cheap check before paying for a hash; insert re-checks under the lock
        if self.users.find_by_email(email).await.is_some() {
            return Err(ApiError::DuplicateEmail(normalize_email(email)));
        }

        let password_hash = self.passwords.hash(password)?;
        let user = self.users.insert(User::new(email, password_hash)).await?;
        let token = self.issuer.issue_local(&user.id).await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered successfully");

        Ok((token, user))
    }

    /// Authenticate with email and password
    ///
    /// Unknown emails and accounts without a password cost one full hash
    /// verification, same as a wrong password.
    ///
    /// # Errors
    /// - `ApiError::InvalidCredentials` if the pair does not match
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<(String, User)> {
        let email = validate_email(email)?;
        require_non_blank("password", password)?;

        let user = self.users.find_by_email(email).await;
        let hash = user.as_ref().and_then(|u| u.password_hash.as_deref());
        let password_valid = self.passwords.verify(password, hash)?;

        let user = match (user, password_valid) {
            (Some(u), true) => u,
            (Some(u), false) => {
                tracing::warn!(user_id = %u.id, "Login failed: invalid password");
                return Err(ApiError::InvalidCredentials);
            }
            (None, _) => {
                tracing::warn!("Login failed: user not found");
                return Err(ApiError::InvalidCredentials);
            }
        };

        let token = self.issuer.issue_local(&user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in successfully");

        Ok((token, user))
    }

    /// Log in through the external identity provider
    ///
    /// An upstream access token takes precedence over a password.
    ///
    /// # Errors
    /// - `ApiError::InvalidArgument` if neither password nor token is given
    /// - `ApiError::MissingProviderConfig` if no provider is configured
    /// - `ApiError::AuthProvider` if the provider fails
    pub async fn delegated_login(
        &self,
        username: &str,
        password: Option<&str>,
        access_token: Option<&str>,
    ) -> ApiResult<(String, User)> {
        let username = require_non_blank("username", username)?;
        let access_token = access_token.map(str::trim).filter(|t| !t.is_empty());
        let password = password.filter(|p| !p.trim().is_empty());

        let credential = match (access_token, password) {
            (Some(access_token), _) => DelegatedCredential::AccessToken(access_token),
            (None, Some(password)) => DelegatedCredential::Password(password),
            (None, None) => {
                return Err(ApiError::invalid_argument(
                    "either password or token is required",
                ))
            }
        };

        let provider = self.provider.as_deref().ok_or_else(|| {
            ApiError::MissingProviderConfig("no identity provider configured".to_string())
        })?;

        match credential {
            DelegatedCredential::AccessToken(access_token) => {
                self.issuer
                    .issue_delegated_by_access_token(provider, access_token)
                    .await
            }
            DelegatedCredential::Password(password) => {
                self.issuer
                    .issue_delegated(provider, username, password)
                    .await
            }
        }
    }

    /// Replace another user's password and end that user's session
    ///
    /// # Errors
    /// - `ApiError::Forbidden` unless the caller is an admin acting as `admin_id`
    /// - `ApiError::InvalidArgument` for a self reset or a weak password
    /// - `ApiError::NotFound` if the target user does not exist
    pub async fn admin_reset_password(
        &self,
        caller: &Identity,
        admin_id: &str,
        user_id: &str,
        new_password: &str,
    ) -> ApiResult<User> {
        let admin_id = require_non_blank("adminId", admin_id)?;
        let user_id = require_non_blank("userId", user_id)?;
        validate_new_password(new_password)?;

        if admin_id == user_id {
            return Err(ApiError::invalid_argument(
                "admins cannot reset their own password this way",
            ));
        }

        if !caller.is_admin() || caller.user_id != admin_id {
            tracing::warn!(
                user_id = %caller.user_id,
                claimed_admin_id = %admin_id,
                "Password reset denied"
            );
            return Err(ApiError::Forbidden("admin role required".to_string()));
        }

        if self.users.find_by_id(user_id).await.is_none() {
            return Err(ApiError::not_found("user", user_id));
        }

        let password_hash = self.passwords.hash(new_password)?;
        let user = self.users.set_password_hash(user_id, password_hash).await?;

        tracing::info!(admin_id = %admin_id, user_id = %user.id, "Password reset by admin");

        Ok(user)
    }
}
