//! Authentication mutations for Tally GraphQL API
//!
//! This module provides mutations for user authentication:
//! - signup: Create an account and open a session
//! - login: Authenticate with email and password
//! - delegatedLogin: Authenticate through the external identity provider

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::types::{AuthPayload, User};
use crate::services::AuthService;

/// Authentication mutations
#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Register a new account
    ///
    /// # Errors
    /// - `INVALID_ARGUMENT` for a malformed email or a password under 8 characters
    /// - `DUPLICATE_EMAIL` if the email is already registered
    async fn signup(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<AuthPayload> {
        let auth_service = ctx.data::<AuthService>()?;

        let (token, user) = auth_service
            .signup(&email, &password)
            .await
            .map_err(|e| e.extend())?;

        Ok(AuthPayload::new(token, user))
    }

    /// Authenticate and get a fresh session token
    ///
    /// The previous session of the user stops working.
    ///
    /// # Errors
    /// - `INVALID_CREDENTIALS` if email and password do not match
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<AuthPayload> {
        let auth_service = ctx.data::<AuthService>()?;

        let (token, user) = auth_service
            .login(&email, &password)
            .await
            .map_err(|e| e.extend())?;

        Ok(AuthPayload::new(token, user))
    }

    /// Authenticate through the external identity provider
    ///
    /// Pass either the provider password or an access token already issued by
    /// the provider; the token wins when both are given.
    ///
    /// # Errors
    /// - `INVALID_ARGUMENT` if neither password nor token is given
    /// - `MISSING_PROVIDER_CONFIG` if the provider is not configured
    /// - `AUTH_PROVIDER_ERROR` if the provider rejects the request or fails
    /// - `DUPLICATE_EMAIL` if the provider email belongs to another account
    async fn delegated_login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: Option<String>,
        token: Option<String>,
    ) -> Result<User> {
        let auth_service = ctx.data::<AuthService>()?;

        let (session_token, user) = auth_service
            .delegated_login(&username, password.as_deref(), token.as_deref())
            .await
            .map_err(|e| e.extend())?;

        Ok(User::with_session_token(user, session_token))
    }
}
