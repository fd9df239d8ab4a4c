//! Domain models for Tally
//!
//! - Users, roles and resolved caller identities
//! - Todo items

pub mod todo;
pub mod user;

pub use todo::Todo;
pub use user::{normalize_email, ExternalProfile, Identity, User, UserRole};
