//! GraphQL queries for Tally
//!
//! This module contains all query resolvers, organized by domain.

mod todo;
mod user;

pub use todo::TodoQuery;
pub use user::UserQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(TodoQuery, UserQuery);
