//! OAuth2 identity provider client for Tally
//!
//! This crate talks to a GitLab-compatible identity provider:
//! - Resource owner password grant against `{base}/oauth/token`
//! - Profile lookup against `{base}/user` with a bearer token
//!
//! # Example
//!
//! ```rust,no_run
//! use tally_oauth_client::OAuthClient;
//! use tally_shared_config::OAuthProviderConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OAuthProviderConfig::new("https://gitlab.com/api/v4")
//!     .with_client("client-id", "client-secret");
//! let client = OAuthClient::new(config)?;
//!
//! let grant = client.password_grant("alice", "s3cret").await?;
//! let profile = client.fetch_profile(&grant.access_token).await?;
//! println!("{} ({})", profile.username, profile.id);
//! # Ok(())
//! # }
//! ```
//!
//! Requests are never retried; a timeout surfaces as [`OAuthError::Timeout`].

mod client;
mod error;
mod models;

pub use client::OAuthClient;
pub use error::{OAuthError, OAuthResult};
pub use models::{ProviderProfile, TokenGrant};
