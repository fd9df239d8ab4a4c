//! Todo model

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A todo item held by the resource store
///
/// `id` and `owner_id` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub done: bool,
    /// Owning user; `None` only for todos seeded without an owner
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// New, not yet completed todo with a generated id
    pub fn new(text: impl Into<String>, owner_id: Option<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), text, owner_id)
    }

    pub fn with_id(
        id: impl Into<String>,
        text: impl Into<String>,
        owner_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            done: false,
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Whether `user_id` owns this todo
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id.as_deref() == Some(user_id)
    }
}
