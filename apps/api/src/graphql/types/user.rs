//! User and authentication GraphQL types
//!
//! The password hash and the upstream provider token are never exposed.

use async_graphql::{Enum, Object, SimpleObject};
use chrono::{DateTime, Utc};

use crate::models::{User as DbUser, UserRole as DbUserRole};

/// User role enum for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum UserRole {
    /// Administrator, may reset other users' passwords
    Admin,
    /// Regular user
    User,
}

impl From<DbUserRole> for UserRole {
    fn from(role: DbUserRole) -> Self {
        match role {
            DbUserRole::Admin => Self::Admin,
            DbUserRole::User => Self::User,
        }
    }
}

/// Public view of a user account
pub struct User {
    inner: DbUser,
    session_token: Option<String>,
}

impl User {
    /// Create a new GraphQL User from a stored User
    pub fn new(user: DbUser) -> Self {
        Self {
            inner: user,
            session_token: None,
        }
    }

    /// View produced right after a session was issued
    pub fn with_session_token(user: DbUser, session_token: String) -> Self {
        Self {
            inner: user,
            session_token: Some(session_token),
        }
    }
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self::new(user)
    }
}

#[Object]
impl User {
    /// Unique user identifier
    async fn id(&self) -> &str {
        &self.inner.id
    }

    /// User's email address
    async fn email(&self) -> &str {
        &self.inner.email
    }

    /// Username at the identity provider, for delegated accounts
    async fn username(&self) -> Option<&str> {
        self.inner.username.as_deref()
    }

    /// URL to user's avatar image
    #[graphql(name = "avatarURL")]
    async fn avatar_url(&self) -> Option<&str> {
        self.inner.avatar_url.as_deref()
    }

    /// Numeric id at the identity provider
    #[graphql(name = "gitlabID")]
    async fn external_id(&self) -> Option<i64> {
        self.inner.external_id
    }

    async fn role(&self) -> UserRole {
        self.inner.role.into()
    }

    /// When the account was created
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Session token, only present right after login
    async fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

/// Authentication payload returned after signup or login
#[derive(SimpleObject)]
pub struct AuthPayload {
    /// Opaque session token; send it as `token` or as a bearer header
    pub token: String,
    /// The authenticated user
    pub user: User,
}

impl AuthPayload {
    pub fn new(token: String, user: DbUser) -> Self {
        Self {
            user: User::with_session_token(user, token.clone()),
            token,
        }
    }
}
