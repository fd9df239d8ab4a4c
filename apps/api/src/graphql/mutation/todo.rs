//! Todo mutations for Tally GraphQL API
//!
//! - createTodo: add a todo owned by the caller
//! - updateTodo: set a todo's completion state

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::error::ApiError;
use crate::graphql::context::session_token;
use crate::graphql::types::Todo;
use crate::models::Todo as DbTodo;
use crate::repositories::TodoRepository;
use crate::services::AuthorizationGuard;
use crate::validation::{require_non_blank, require_present, validate_todo_text};

/// Todo mutations
#[derive(Default)]
pub struct TodoMutation;

#[Object]
impl TodoMutation {
    /// Create a todo owned by the caller
    ///
    /// # Errors
    /// - `INVALID_ARGUMENT` for blank or overlong text
    /// - `UNAUTHORIZED` without a valid session
    async fn create_todo(
        &self,
        ctx: &Context<'_>,
        text: String,
        token: Option<String>,
    ) -> Result<Todo> {
        let text = validate_todo_text(&text).map_err(|e| e.extend())?;

        let guard = ctx.data::<AuthorizationGuard>()?;
        let todos = ctx.data::<TodoRepository>()?;

        let identity = guard
            .resolve(session_token(ctx, token.as_deref()))
            .await
            .map_err(|e| e.extend())?;

        let todo = todos
            .insert(DbTodo::new(text, Some(identity.user_id.clone())))
            .await
            .map_err(|e| e.extend())?;

        tracing::info!(todo_id = %todo.id, user_id = %identity.user_id, "Todo created");

        Ok(todo.into())
    }

    /// Set the completion state of a todo
    ///
    /// Setting the same value twice leaves the todo unchanged.
    ///
    /// # Errors
    /// - `INVALID_ARGUMENT` if `id` is blank or `done` is absent
    /// - `UNAUTHORIZED` without a valid session
    /// - `NOT_FOUND` if the todo does not exist
    /// - `FORBIDDEN` under the ownership policy when the todo is someone else's
    async fn update_todo(
        &self,
        ctx: &Context<'_>,
        id: String,
        done: Option<bool>,
        token: Option<String>,
    ) -> Result<Todo> {
        let id = require_non_blank("id", &id).map_err(|e| e.extend())?;
        let done = require_present("done", done).map_err(|e| e.extend())?;

        let guard = ctx.data::<AuthorizationGuard>()?;
        let todos = ctx.data::<TodoRepository>()?;

        let identity = guard
            .resolve(session_token(ctx, token.as_deref()))
            .await
            .map_err(|e| e.extend())?;

        let existing = todos
            .find_by_id(id)
            .await
            .ok_or_else(|| ApiError::not_found("todo", id).extend())?;

        if guard.policy().ownership {
            guard
                .require_owner(&identity, &existing)
                .map_err(|e| e.extend())?;
        }

        let todo = todos
            .update_completion(id, done)
            .await
            .map_err(|e| e.extend())?;

        tracing::debug!(todo_id = %todo.id, done, "Todo updated");

        Ok(todo.into())
    }
}
