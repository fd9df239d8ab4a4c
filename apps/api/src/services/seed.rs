//! Startup data: sample users and todos, and the bootstrap admin

use crate::error::ApiResult;
use crate::models::{Todo, User, UserRole};
use crate::repositories::{TodoRepository, UserRepository};
use crate::services::password::PasswordService;

/// Sample accounts as (id, email, password)
pub const SAMPLE_USERS: [(&str, &str, &str); 2] = [
    ("sample-user-1", "user1@example.com", "password123"),
    ("sample-user-2", "user2@example.com", "password456"),
];

/// Sample todos as (id, text, owner id)
pub const SAMPLE_TODOS: [(&str, &str, &str); 3] = [
    ("a", "A todo not to forget", "sample-user-1"),
    ("b", "This is the most important", "sample-user-1"),
    ("c", "Please do this or else", "sample-user-2"),
];

/// Insert the sample users and todos that are not present yet
pub async fn seed_sample_data(
    users: &UserRepository,
    todos: &TodoRepository,
    passwords: &PasswordService,
) -> ApiResult<()> {
    for (id, email, password) in SAMPLE_USERS {
        if users.find_by_id(id).await.is_some() {
            continue;
        }
        let hash = passwords.hash(password)?;
        users.insert(User::with_id(id, email, Some(hash))).await?;
    }

    for (id, text, owner) in SAMPLE_TODOS {
        if todos.find_by_id(id).await.is_some() {
            continue;
        }
        todos
            .insert(Todo::with_id(id, text, Some(owner.to_string())))
            .await?;
    }

    tracing::info!(
        users = SAMPLE_USERS.len(),
        todos = SAMPLE_TODOS.len(),
        "Sample data seeded"
    );
    Ok(())
}

/// Create the admin account unless the email is already registered
///
/// Returns the created admin, or `None` if the email was taken.
pub async fn bootstrap_admin(
    users: &UserRepository,
    passwords: &PasswordService,
    email: &str,
    password: &str,
) -> ApiResult<Option<User>> {
    if users.find_by_email(email).await.is_some() {
        tracing::debug!("Bootstrap admin already present");
        return Ok(None);
    }

    let hash = passwords.hash(password)?;
    let admin = users
        .insert(User::new(email, hash).with_role(UserRole::Admin))
        .await?;

    tracing::info!(user_id = %admin.id, "Bootstrap admin created");
    Ok(Some(admin))
}
