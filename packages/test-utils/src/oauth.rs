//! Mock OAuth identity provider
//!
//! Provides a [`MockOAuthServer`] that simulates the `POST /oauth/token`
//! password grant and `GET /user` profile endpoints.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock OAuth provider for delegated login tests
///
/// Wraps a [`wiremock::MockServer`]; every `mock_*` method mounts one
/// endpoint behaviour. Mounted mocks stay active for the server's lifetime,
/// so tests that need a different answer should use [`MockOAuthServer::reset`].
pub struct MockOAuthServer {
    server: MockServer,
}

impl MockOAuthServer {
    /// Start a new mock provider
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL (use as the provider base URL)
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Remove all mounted mocks and recorded requests
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// Token endpoint grants `access_token` to any password grant request
    pub async fn mock_token_success(&self, access_token: &str) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_partial_json(json!({ "grant_type": "password" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": access_token,
                "token_type": "Bearer",
                "expires_in": 7200
            })))
            .mount(&self.server)
            .await;
    }

    /// Token endpoint grants `access_token` only for the given user credentials
    pub async fn mock_token_for(&self, username: &str, password: &str, access_token: &str) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_partial_json(json!({
                "grant_type": "password",
                "username": username,
                "password": password
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": access_token,
                "token_type": "Bearer"
            })))
            .mount(&self.server)
            .await;
    }

    /// Token endpoint fails with the given status
    pub async fn mock_token_failure(&self, status_code: u16, error: &str) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "error": error,
                "error_description": "The provided authorization grant is invalid"
            })))
            .mount(&self.server)
            .await;
    }

    /// Profile endpoint returns the given identity for `access_token`
    pub async fn mock_profile(
        &self,
        access_token: &str,
        id: i64,
        username: &str,
        email: &str,
        avatar_url: Option<&str>,
    ) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("Authorization", format!("Bearer {}", access_token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "username": username,
                "name": username,
                "email": email,
                "avatar_url": avatar_url,
                "state": "active"
            })))
            .mount(&self.server)
            .await;
    }

    /// Profile endpoint returns an arbitrary JSON body
    pub async fn mock_profile_body(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Profile endpoint fails with the given status
    pub async fn mock_profile_failure(&self, status_code: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "message": message
            })))
            .mount(&self.server)
            .await;
    }

    /// Profile endpoint answers only after `delay_ms`
    pub async fn mock_profile_delay(&self, delay_ms: u64) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(delay_ms))
                    .set_body_json(json!({
                        "id": 1,
                        "username": "slow",
                        "email": "slow@example.com"
                    })),
            )
            .mount(&self.server)
            .await;
    }

    /// Number of requests received by the token endpoint
    pub async fn token_call_count(&self) -> usize {
        self.count_requests("/oauth/token").await
    }

    /// Number of requests received by the profile endpoint
    pub async fn profile_call_count(&self) -> usize {
        self.count_requests("/user").await
    }

    async fn count_requests(&self, endpoint: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == endpoint)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_endpoint_responds() {
        let server = MockOAuthServer::start().await;
        server.mock_token_success("abc").await;

        let response: Value = reqwest::Client::new()
            .post(format!("{}/oauth/token", server.url()))
            .json(&json!({ "grant_type": "password" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(response["access_token"], "abc");
        assert_eq!(server.token_call_count().await, 1);
    }

    #[tokio::test]
    async fn test_profile_requires_matching_bearer() {
        let server = MockOAuthServer::start().await;
        server
            .mock_profile("good", 3, "carol", "carol@example.com", None)
            .await;

        let status = reqwest::Client::new()
            .get(format!("{}/user", server.url()))
            .bearer_auth("other")
            .send()
            .await
            .unwrap()
            .status();

        assert_eq!(status.as_u16(), 404);
        assert_eq!(server.profile_call_count().await, 1);
    }
}
