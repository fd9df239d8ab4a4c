//! Todo queries for Tally GraphQL API
//!
//! - todo: a single todo by id
//! - todoList: all todos visible to the caller
//! - lastTodo: the most recently created todo
//!
//! With the ownership policy on, `todo` and `todoList` require a session and
//! only expose the caller's todos. With it off they are open reads.

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::error::ApiError;
use crate::graphql::context::session_token;
use crate::graphql::types::Todo;
use crate::repositories::TodoRepository;
use crate::services::AuthorizationGuard;
use crate::validation::{require_non_blank, require_present};

/// Todo-related queries
#[derive(Default)]
pub struct TodoQuery;

#[Object]
impl TodoQuery {
    /// Get a single todo by id
    ///
    /// # Errors
    /// - `INVALID_ARGUMENT` if `id` is absent or blank
    /// - `UNAUTHORIZED`, `NOT_FOUND`, `FORBIDDEN` under the ownership policy
    async fn todo(
        &self,
        ctx: &Context<'_>,
        id: Option<String>,
        token: Option<String>,
    ) -> Result<Option<Todo>> {
        let id = require_present("id", id.as_deref())
            .and_then(|id| require_non_blank("id", id))
            .map_err(|e| e.extend())?;

        let guard = ctx.data::<AuthorizationGuard>()?;
        let todos = ctx.data::<TodoRepository>()?;

        if !guard.policy().ownership {
            return Ok(todos.find_by_id(id).await.map(Todo::from));
        }

        let identity = guard
            .resolve(session_token(ctx, token.as_deref()))
            .await
            .map_err(|e| e.extend())?;

        let todo = todos
            .find_by_id(id)
            .await
            .ok_or_else(|| ApiError::not_found("todo", id).extend())?;

        guard
            .require_owner(&identity, &todo)
            .map_err(|e| e.extend())?;

        Ok(Some(todo.into()))
    }

    /// List todos in creation order
    async fn todo_list(&self, ctx: &Context<'_>, token: Option<String>) -> Result<Vec<Todo>> {
        let guard = ctx.data::<AuthorizationGuard>()?;
        let todos = ctx.data::<TodoRepository>()?;

        let list = if guard.policy().ownership {
            let identity = guard
                .resolve(session_token(ctx, token.as_deref()))
                .await
                .map_err(|e| e.extend())?;
            todos.list_by_owner(&identity.user_id).await
        } else {
            todos.list().await
        };

        Ok(list.into_iter().map(Todo::from).collect())
    }

    /// Most recently created todo
    ///
    /// # Errors
    /// - `EMPTY_COLLECTION` if there are no todos
    async fn last_todo(&self, ctx: &Context<'_>) -> Result<Todo> {
        let todos = ctx.data::<TodoRepository>()?;
        todos
            .last()
            .await
            .map(Todo::from)
            .map_err(|e| e.extend())
    }
}
