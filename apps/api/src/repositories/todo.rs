//! Todo repository: the resource store

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{ApiError, ApiResult};
use crate::models::Todo;

/// Repository for todo records, kept in insertion order
#[derive(Clone, Default)]
pub struct TodoRepository {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl TodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All todos in insertion order
    pub async fn list(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    /// Todos owned by `owner_id`, in insertion order
    pub async fn list_by_owner(&self, owner_id: &str) -> Vec<Todo> {
        let todos = self.todos.read().await;
        todos
            .iter()
            .filter(|t| t.is_owned_by(owner_id))
            .cloned()
            .collect()
    }

    pub async fn find_by_id(&self, todo_id: &str) -> Option<Todo> {
        let todos = self.todos.read().await;
        todos.iter().find(|t| t.id == todo_id).cloned()
    }

    /// Insert a new todo
    ///
    /// # Errors
    /// - `ApiError::Conflict` if the id is already used
    pub async fn insert(&self, todo: Todo) -> ApiResult<Todo> {
        let mut todos = self.todos.write().await;
        if todos.iter().any(|t| t.id == todo.id) {
            return Err(ApiError::conflict("todo", todo.id));
        }
        todos.push(todo.clone());
        Ok(todo)
    }

    /// Set the completion flag
    ///
    /// # Errors
    /// - `ApiError::NotFound` if no todo has `todo_id`
    pub async fn update_completion(&self, todo_id: &str, done: bool) -> ApiResult<Todo> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == todo_id)
            .ok_or_else(|| ApiError::not_found("todo", todo_id))?;

        todo.done = done;
        Ok(todo.clone())
    }

    /// Most recently inserted todo
    ///
    /// # Errors
    /// - `ApiError::EmptyCollection` if there are no todos
    pub async fn last(&self) -> ApiResult<Todo> {
        let todos = self.todos.read().await;
        todos
            .last()
            .cloned()
            .ok_or(ApiError::EmptyCollection("todos"))
    }

    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}
