//! GraphQL type definitions for Tally

mod todo;
mod user;

pub use todo::Todo;
pub use user::{AuthPayload, User, UserRole};
