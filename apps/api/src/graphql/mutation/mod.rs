//! GraphQL mutations for Tally
//!
//! This module contains all mutation resolvers, organized by domain.

mod admin;
mod auth;
mod todo;

pub use admin::AdminMutation;
pub use auth::AuthMutation;
pub use todo::TodoMutation;

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(AuthMutation, TodoMutation, AdminMutation);
