//! Authorization guard
//!
//! Resolves a presented session token to the caller's [`Identity`] and answers
//! ownership and admin questions about it.

use crate::error::{ApiError, ApiResult};
use crate::models::{Identity, Todo};
use crate::repositories::UserRepository;
use crate::services::token::hash_token;

/// Access rules baked into the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Todo reads require a session and are limited to the caller's todos
    pub ownership: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self { ownership: true }
    }
}

impl AccessPolicy {
    /// Policy with open todo reads
    pub fn open() -> Self {
        Self { ownership: false }
    }
}

#[derive(Clone)]
pub struct AuthorizationGuard {
    users: UserRepository,
    policy: AccessPolicy,
}

impl AuthorizationGuard {
    pub fn new(users: UserRepository, policy: AccessPolicy) -> Self {
        Self { users, policy }
    }

    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// Resolve a session token to an identity
    ///
    /// # Errors
    /// - `ApiError::Unauthorized` if the token is missing, blank, or not the
    ///   current session of any user
    pub async fn resolve(&self, token: Option<&str>) -> ApiResult<Identity> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApiError::Unauthorized)?;

        match self.users.find_by_session_hash(&hash_token(token)).await {
            Some(user) => Ok(user.identity()),
            None => {
                tracing::debug!("Presented session token does not resolve");
                Err(ApiError::Unauthorized)
            }
        }
    }

    /// Ensure the identity may act on the todo
    ///
    /// Todos without an owner are open to any authenticated caller.
    pub fn require_owner(&self, identity: &Identity, todo: &Todo) -> ApiResult<()> {
        match &todo.owner_id {
            Some(owner) if owner != &identity.user_id => {
                tracing::warn!(
                    user_id = %identity.user_id,
                    todo_id = %todo.id,
                    "Access to foreign todo denied"
                );
                Err(ApiError::Forbidden(format!(
                    "todo {} belongs to another user",
                    todo.id
                )))
            }
            _ => Ok(()),
        }
    }

    /// Ensure the identity has the admin role
    pub fn require_admin(&self, identity: &Identity) -> ApiResult<()> {
        if identity.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("admin role required".to_string()))
        }
    }
}
