//! Shared test utilities for Tally workspace
//!
//! Mock implementations of external services for testing without network
//! access.
//!
//! - [`MockOAuthServer`] - GitLab-compatible OAuth token and profile endpoints
//!
//! # Example
//!
//! ```rust,ignore
//! use tally_test_utils::MockOAuthServer;
//!
//! #[tokio::test]
//! async fn test_with_provider() {
//!     let provider = MockOAuthServer::start().await;
//!     provider.mock_token_success("access-token").await;
//!     provider.mock_profile("access-token", 7, "alice", "alice@example.com", None).await;
//!
//!     // Point the OAuth client at provider.url()
//! }
//! ```

mod oauth;

pub use oauth::MockOAuthServer;
