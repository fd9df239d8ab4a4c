//! Tally API library
//!
//! A GraphQL todo service with email/password accounts, opaque session
//! tokens and delegated login through an external OAuth identity provider.
//! This module exposes the core API components for use in integration tests
//! and by the server binary.

pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use graphql::{build_schema, SchemaBuilder, TallySchema};
pub use services::{AccessPolicy, AuthService};
