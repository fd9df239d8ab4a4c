//! GraphQL schema and resolvers for Tally
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for todos and users
//! - Mutation resolvers for authentication, todos and admin actions
//! - Type definitions for all GraphQL objects

pub mod context;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use context::BearerToken;
pub use schema::{build_schema, SchemaBuilder, TallySchema};
