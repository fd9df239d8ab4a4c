use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};

use crate::models::Todo as DbTodo;

/// A todo item
#[derive(Debug, Clone, SimpleObject)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub done: bool,
    /// Owning user, absent for unowned sample todos
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DbTodo> for Todo {
    fn from(todo: DbTodo) -> Self {
        Self {
            id: todo.id,
            text: todo.text,
            done: todo.done,
            owner_id: todo.owner_id,
            created_at: todo.created_at,
        }
    }
}
