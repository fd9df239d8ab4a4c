//! Business logic services for Tally
//!
//! - `password`: Argon2id hashing and verification
//! - `token`: session token issuance, local or delegated to an OAuth provider
//! - `guard`: token to identity resolution and access checks
//! - `auth`: signup, login, delegated login and admin password reset
//! - `seed`: sample data and bootstrap admin

pub mod auth;
pub mod guard;
pub mod password;
pub mod seed;
pub mod token;

pub use auth::AuthService;
pub use guard::{AccessPolicy, AuthorizationGuard};
pub use password::PasswordService;
pub use token::{IdentityProvider, TokenIssuer};
