//! User and identity models
//!
//! This module contains:
//! - User accounts with optional external-provider identity
//! - The identity resolved from a session token

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// User role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

/// User account held by the credential store
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,

    /// Email address (unique, lowercased)
    pub email: String,

    /// Argon2 PHC hash; `None` for accounts created by delegated login
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// User's role
    pub role: UserRole,

    /// Numeric id at the external identity provider
    pub external_id: Option<i64>,

    /// Username at the external identity provider
    pub username: Option<String>,

    /// Avatar URL from the external identity provider
    pub avatar_url: Option<String>,

    /// Access token issued by the external identity provider
    #[serde(skip_serializing)]
    pub provider_token: Option<String>,

    /// SHA-256 of the current session token
    #[serde(skip_serializing)]
    pub session_token_hash: Option<String>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a password-based account with a generated id
    pub fn new(email: &str, password_hash: String) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), email, Some(password_hash))
    }

    /// Create an account with an explicit id
    pub fn with_id(id: impl Into<String>, email: &str, password_hash: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            email: normalize_email(email),
            password_hash,
            role: UserRole::User,
            external_id: None,
            username: None,
            avatar_url: None,
            provider_token: None,
            session_token_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an account from a provider profile
    pub fn from_external(profile: &ExternalProfile, provider_token: &str) -> Self {
        let mut user = Self::with_id(Uuid::new_v4().to_string(), &profile.email, None);
        user.apply_profile(profile, provider_token);
        user
    }

    /// Refresh provider-owned fields
    pub fn apply_profile(&mut self, profile: &ExternalProfile, provider_token: &str) {
        self.external_id = Some(profile.external_id);
        self.username = Some(profile.username.clone());
        self.email = normalize_email(&profile.email);
        self.avatar_url = profile.avatar_url.clone();
        self.provider_token = Some(provider_token.to_string());
        self.updated_at = Utc::now();
    }

    /// Set the role (builder style)
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Identity this account resolves to
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.id.clone(),
            role: self.role,
        }
    }
}

/// Identity fields asserted by an external provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProfile {
    pub external_id: i64,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl From<tally_oauth_client::ProviderProfile> for ExternalProfile {
    fn from(profile: tally_oauth_client::ProviderProfile) -> Self {
        Self {
            external_id: profile.id,
            username: profile.username,
            email: profile.email,
            avatar_url: profile.avatar_url.filter(|url| !url.is_empty()),
        }
    }
}

/// Caller identity resolved from a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Canonical form used for email uniqueness
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
