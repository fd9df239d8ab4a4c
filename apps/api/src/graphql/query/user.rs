//! User queries for Tally GraphQL API
//!
//! - currentUser: the user owning a session token
//! - user: public view of any user by id

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::error::ApiError;
use crate::graphql::types::User;
use crate::repositories::UserRepository;
use crate::services::AuthorizationGuard;
use crate::validation::require_non_blank;

/// User-related queries
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Get the user owning the given session token
    ///
    /// # Errors
    /// - `UNAUTHORIZED` if the token is not a current session
    async fn current_user(&self, ctx: &Context<'_>, session_token: String) -> Result<User> {
        let guard = ctx.data::<AuthorizationGuard>()?;
        let users = ctx.data::<UserRepository>()?;

        let identity = guard
            .resolve(Some(&session_token))
            .await
            .map_err(|e| e.extend())?;

        let user = users
            .find_by_id(&identity.user_id)
            .await
            .ok_or_else(|| ApiError::Unauthorized.extend())?;

        Ok(User::from(user))
    }

    /// Get a user by id
    async fn user(&self, ctx: &Context<'_>, id: String) -> Result<User> {
        let id = require_non_blank("id", &id).map_err(|e| e.extend())?;
        let users = ctx.data::<UserRepository>()?;

        users
            .find_by_id(id)
            .await
            .map(User::from)
            .ok_or_else(|| ApiError::not_found("user", id).extend())
    }
}
