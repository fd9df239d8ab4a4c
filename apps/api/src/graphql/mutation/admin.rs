//! Admin mutations for Tally GraphQL API
//!
//! All mutations here require the caller to be an administrator.

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::context::session_token;
use crate::graphql::types::User;
use crate::services::{AuthService, AuthorizationGuard};
use crate::validation::{require_non_blank, validate_new_password};

/// Admin-only mutations
#[derive(Default)]
pub struct AdminMutation;

#[Object]
impl AdminMutation {
    /// Replace another user's password
    ///
    /// The caller's session must belong to `adminId`. The target's current
    /// session is ended.
    ///
    /// # Errors
    /// - `INVALID_ARGUMENT` for blank ids, a weak password, or a self reset
    /// - `UNAUTHORIZED` without a valid session
    /// - `FORBIDDEN` if the caller is not the admin named by `adminId`
    /// - `NOT_FOUND` if the target user does not exist
    async fn admin_reset_password(
        &self,
        ctx: &Context<'_>,
        admin_id: String,
        user_id: String,
        new_password: String,
        token: Option<String>,
    ) -> Result<User> {
        require_non_blank("adminId", &admin_id).map_err(|e| e.extend())?;
        require_non_blank("userId", &user_id).map_err(|e| e.extend())?;
        validate_new_password(&new_password).map_err(|e| e.extend())?;

        let guard = ctx.data::<AuthorizationGuard>()?;
        let auth_service = ctx.data::<AuthService>()?;

        let identity = guard
            .resolve(session_token(ctx, token.as_deref()))
            .await
            .map_err(|e| e.extend())?;
        guard.require_admin(&identity).map_err(|e| e.extend())?;

        let user = auth_service
            .admin_reset_password(&identity, &admin_id, &user_id, &new_password)
            .await
            .map_err(|e| e.extend())?;

        Ok(User::from(user))
    }
}
