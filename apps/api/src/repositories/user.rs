//! User repository: the credential store
//!
//! Holds user records in insertion order. Password hashing lives in
//! `services::password`; this module only stores hashes.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{ApiError, ApiResult};
use crate::models::user::{normalize_email, ExternalProfile, User};

/// Repository for user records
#[derive(Clone, Default)]
pub struct UserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a user by their unique ID
    pub async fn find_by_id(&self, user_id: &str) -> Option<User> {
        let users = self.users.read().await;
        users.iter().find(|u| u.id == user_id).cloned()
    }

    /// Find a user by email address (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        let users = self.users.read().await;
        users.iter().find(|u| u.email == email).cloned()
    }

    /// Find the user whose current session token hashes to `token_hash`
    pub async fn find_by_session_hash(&self, token_hash: &str) -> Option<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.session_token_hash.as_deref() == Some(token_hash))
            .cloned()
    }

    /// Find a user by their external identity provider id
    pub async fn find_by_external_id(&self, external_id: i64) -> Option<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.external_id == Some(external_id))
            .cloned()
    }

    /// Insert a new user
    ///
    /// # Errors
    /// - `ApiError::DuplicateEmail` if the email is already registered
    /// - `ApiError::Conflict` if the id or external id is already taken
    pub async fn insert(&self, user: User) -> ApiResult<User> {
        let mut users = self.users.write().await;
        check_unique(&users, &user, None)?;
        users.push(user.clone());

        tracing::debug!(user_id = %user.id, "User inserted");
        Ok(user)
    }

    /// Replace the session token hash, invalidating any previous session
    pub async fn set_session_hash(
        &self,
        user_id: &str,
        token_hash: Option<String>,
    ) -> ApiResult<User> {
        let mut users = self.users.write().await;
        let index = position(&users, user_id)?;

        let user = &mut users[index];
        user.session_token_hash = token_hash;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    /// Replace the password hash and end the current session
    pub async fn set_password_hash(&self, user_id: &str, password_hash: String) -> ApiResult<User> {
        let mut users = self.users.write().await;
        let index = position(&users, user_id)?;

        let user = &mut users[index];
        user.password_hash = Some(password_hash);
        user.session_token_hash = None;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    /// Create or refresh the user linked to an external identity
    ///
    /// Matching is by external id only. The new session hash is stored in the
    /// same critical section. Returns the user and whether it was created.
    ///
    /// # Errors
    /// - `ApiError::DuplicateEmail` if the profile email belongs to a different local account
    pub async fn upsert_external(
        &self,
        profile: &ExternalProfile,
        provider_token: &str,
        session_hash: String,
    ) -> ApiResult<(User, bool)> {
        let mut users = self.users.write().await;

        if let Some(index) = users
            .iter()
            .position(|u| u.external_id == Some(profile.external_id))
        {
            let mut refreshed = users[index].clone();
            refreshed.apply_profile(profile, provider_token);
            refreshed.session_token_hash = Some(session_hash);
            check_unique(&users, &refreshed, Some(index))?;

            users[index] = refreshed.clone();
            return Ok((refreshed, false));
        }

        let mut user = User::from_external(profile, provider_token);
        user.session_token_hash = Some(session_hash);
        check_unique(&users, &user, None)?;
        users.push(user.clone());
        Ok((user, true))
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn position(users: &[User], user_id: &str) -> ApiResult<usize> {
    users
        .iter()
        .position(|u| u.id == user_id)
        .ok_or_else(|| ApiError::not_found("user", user_id))
}

/// Check id, email and external id uniqueness, ignoring the record at `skip`
fn check_unique(users: &[User], candidate: &User, skip: Option<usize>) -> ApiResult<()> {
    for (index, existing) in users.iter().enumerate() {
        if Some(index) == skip {
            continue;
        }
        if existing.id == candidate.id {
            return Err(ApiError::conflict("user", candidate.id.clone()));
        }
        if existing.email == candidate.email {
            return Err(ApiError::DuplicateEmail(candidate.email.clone()));
        }
        if candidate.external_id.is_some() && existing.external_id == candidate.external_id {
            return Err(ApiError::conflict(
                "external identity",
                candidate.external_id.unwrap_or_default().to_string(),
            ));
        }
    }
    Ok(())
}
