//! GraphQL schema builder for Tally
//!
//! This module provides the schema construction for the async-graphql API.

use async_graphql::{EmptySubscription, Schema};

use crate::error::{ApiError, ApiResult};
use crate::repositories::{TodoRepository, UserRepository};
use crate::services::{AccessPolicy, AuthService, AuthorizationGuard};

use super::mutation::Mutation;
use super::query::Query;

/// The Tally GraphQL schema type
pub type TallySchema = Schema<Query, Mutation, EmptySubscription>;

/// Builder for constructing the GraphQL schema with required services
///
/// The auth service must share the user store passed to [`SchemaBuilder::users`].
pub struct SchemaBuilder {
    users: Option<UserRepository>,
    todos: Option<TodoRepository>,
    auth_service: Option<AuthService>,
    access_policy: AccessPolicy,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            users: None,
            todos: None,
            auth_service: None,
            access_policy: AccessPolicy::default(),
        }
    }

    /// Set the user store
    pub fn users(mut self, users: UserRepository) -> Self {
        self.users = Some(users);
        self
    }

    /// Set the todo store (defaults to an empty one)
    pub fn todos(mut self, todos: TodoRepository) -> Self {
        self.todos = Some(todos);
        self
    }

    /// Set the auth service
    pub fn auth_service(mut self, auth_service: AuthService) -> Self {
        self.auth_service = Some(auth_service);
        self
    }

    pub fn access_policy(mut self, access_policy: AccessPolicy) -> Self {
        self.access_policy = access_policy;
        self
    }

    /// Build the schema with all configured services
    ///
    /// # Errors
    /// - `ApiError::Internal` if the user store or auth service is missing
    pub fn build(self) -> ApiResult<TallySchema> {
        let users = self
            .users
            .ok_or_else(|| ApiError::Internal("user store is required".to_string()))?;
        let auth_service = self
            .auth_service
            .ok_or_else(|| ApiError::Internal("auth service is required".to_string()))?;
        let todos = self.todos.unwrap_or_default();
        let guard = AuthorizationGuard::new(users.clone(), self.access_policy);

        tracing::debug!(ownership = self.access_policy.ownership, "Building GraphQL schema");

        Ok(
            Schema::build(Query::default(), Mutation::default(), EmptySubscription)
                .data(users)
                .data(todos)
                .data(auth_service)
                .data(guard)
                .finish(),
        )
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new GraphQL schema with the provided stores and services
pub fn build_schema(
    users: UserRepository,
    todos: TodoRepository,
    auth_service: AuthService,
    access_policy: AccessPolicy,
) -> ApiResult<TallySchema> {
    SchemaBuilder::new()
        .users(users)
        .todos(todos)
        .auth_service(auth_service)
        .access_policy(access_policy)
        .build()
}
