//! Integration tests for delegated login against a mock OAuth provider

mod common;

use common::*;
use serde_json::json;
use tally_shared_config::OAuthProviderConfig;
use tally_test_utils::MockOAuthServer;

const DELEGATED: &str = r#"
    mutation Delegated($username: String!, $password: String, $token: String) {
        delegatedLogin(username: $username, password: $password, token: $token) {
            id
            email
            username
            avatarURL
            gitlabID
            sessionToken
        }
    }
"#;

#[tokio::test]
async fn test_password_grant_creates_user_with_session() {
    let provider = MockOAuthServer::start().await;
    provider.mock_token_for("dev", "hunter22", "upstream-1").await;
    provider
        .mock_profile(
            "upstream-1",
            4242,
            "dev",
            "dev@corp.io",
            Some("https://cdn/avatar.png"),
        )
        .await;
    let app = TestApp::with_oauth(&provider.url());

    let response = data(
        execute(
            &app.schema,
            DELEGATED,
            json!({ "username": "dev", "password": "hunter22" }),
        )
        .await,
    );
    let user = &response["delegatedLogin"];

    assert_eq!(user["email"], "dev@corp.io");
    assert_eq!(user["username"], "dev");
    assert_eq!(user["gitlabID"], 4242);
    assert_eq!(user["avatarURL"], "https://cdn/avatar.png");

    // The returned session works like a local one
    let session = user["sessionToken"].as_str().unwrap();
    let created = execute(
        &app.schema,
        CREATE_TODO,
        json!({ "text": "ship it", "token": session }),
    )
    .await;
    assert!(created.errors.is_empty());

    let stored = app.users.find_by_external_id(4242).await.unwrap();
    assert!(stored.password_hash.is_none());
    assert_eq!(stored.provider_token.as_deref(), Some("upstream-1"));
}

#[tokio::test]
async fn test_repeated_login_refreshes_single_user() {
    let provider = MockOAuthServer::start().await;
    provider.mock_token_success("upstream-1").await;
    provider
        .mock_profile("upstream-1", 7, "dev", "dev@corp.io", None)
        .await;
    let app = TestApp::with_oauth(&provider.url());
    let vars = json!({ "username": "dev", "password": "pw" });

    let first = data(execute(&app.schema, DELEGATED, vars.clone()).await);

    provider.reset().await;
    provider.mock_token_success("upstream-2").await;
    provider
        .mock_profile("upstream-2", 7, "dev-renamed", "dev2@corp.io", None)
        .await;

    let second = data(execute(&app.schema, DELEGATED, vars).await);

    assert_eq!(first["delegatedLogin"]["id"], second["delegatedLogin"]["id"]);
    assert_ne!(
        first["delegatedLogin"]["sessionToken"],
        second["delegatedLogin"]["sessionToken"]
    );
    assert_eq!(second["delegatedLogin"]["username"], "dev-renamed");
    assert_eq!(second["delegatedLogin"]["email"], "dev2@corp.io");
    assert_eq!(app.users.len().await, 1);
}

#[tokio::test]
async fn test_access_token_path_skips_token_endpoint() {
    let provider = MockOAuthServer::start().await;
    provider
        .mock_profile("existing-upstream", 9, "ops", "ops@corp.io", None)
        .await;
    let app = TestApp::with_oauth(&provider.url());

    let response = execute(
        &app.schema,
        DELEGATED,
        json!({ "username": "ops", "password": "ignored", "token": "existing-upstream" }),
    )
    .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(provider.token_call_count().await, 0);
    assert_eq!(provider.profile_call_count().await, 1);
}

#[tokio::test]
async fn test_provider_rejection_surfaces_upstream_status() {
    let provider = MockOAuthServer::start().await;
    provider.mock_token_failure(401, "invalid_grant").await;
    let app = TestApp::with_oauth(&provider.url());

    let response = execute(
        &app.schema,
        DELEGATED,
        json!({ "username": "dev", "password": "wrong" }),
    )
    .await;

    assert_error_code(&response, "AUTH_PROVIDER_ERROR");
    let extensions = response.errors[0].extensions.as_ref().unwrap();
    assert_eq!(
        extensions.get("upstreamStatus"),
        Some(&async_graphql::Value::from(401))
    );
    assert!(app.users.is_empty().await);
}

#[tokio::test]
async fn test_profile_failure_and_malformed_profile() {
    let provider = MockOAuthServer::start().await;
    provider.mock_profile_failure(500, "boom").await;
    let app = TestApp::with_oauth(&provider.url());

    let failed = execute(
        &app.schema,
        DELEGATED,
        json!({ "username": "dev", "token": "upstream" }),
    )
    .await;
    assert_error_code(&failed, "AUTH_PROVIDER_ERROR");

    provider.reset().await;
    provider
        .mock_profile_body(json!({ "username": "dev", "marker": "UPSTREAM_RAW" }))
        .await;

    let malformed = execute(
        &app.schema,
        DELEGATED,
        json!({ "username": "dev", "token": "upstream" }),
    )
    .await;
    assert_error_code(&malformed, "AUTH_PROVIDER_ERROR");
    let extensions = malformed.errors[0].extensions.as_ref().unwrap();
    assert_eq!(
        extensions.get("upstreamStatus"),
        Some(&async_graphql::Value::from(200))
    );
    match extensions.get("upstreamBody") {
        Some(async_graphql::Value::String(body)) => assert!(body.contains("UPSTREAM_RAW")),
        other => panic!("unexpected upstreamBody: {other:?}"),
    }
    assert!(app.users.is_empty().await);
}

#[tokio::test]
async fn test_provider_timeout() {
    let provider = MockOAuthServer::start().await;
    provider.mock_profile_delay(2_000).await;
    let mut config = OAuthProviderConfig::new(provider.url()).with_client("id", "secret");
    config.timeout_secs = 1;
    let app = TestApp::with_oauth_config(config);

    let response = execute(
        &app.schema,
        DELEGATED,
        json!({ "username": "dev", "token": "upstream" }),
    )
    .await;

    assert_error_code(&response, "AUTH_PROVIDER_ERROR");
    let extensions = response.errors[0].extensions.as_ref().unwrap();
    assert!(extensions.get("upstreamStatus").is_none());
}

#[tokio::test]
async fn test_email_collision_with_local_account() {
    let provider = MockOAuthServer::start().await;
    provider
        .mock_profile("upstream", 11, "alice", "alice@example.com", None)
        .await;
    let app = TestApp::with_oauth(&provider.url());
    signup(&app.schema, "alice@example.com", "secret123").await;

    let response = execute(
        &app.schema,
        DELEGATED,
        json!({ "username": "alice", "token": "upstream" }),
    )
    .await;

    assert_error_code(&response, "DUPLICATE_EMAIL");
    assert_eq!(app.users.len().await, 1);
}

#[tokio::test]
async fn test_argument_and_configuration_errors() {
    let provider = MockOAuthServer::start().await;
    let app = TestApp::with_oauth(&provider.url());

    let neither = execute(&app.schema, DELEGATED, json!({ "username": "dev" })).await;
    assert_error_code(&neither, "INVALID_ARGUMENT");

    let unconfigured = TestApp::new();
    let response = execute(
        &unconfigured.schema,
        DELEGATED,
        json!({ "username": "dev", "password": "pw" }),
    )
    .await;
    assert_error_code(&response, "MISSING_PROVIDER_CONFIG");

    // Base URL only: the password grant needs client credentials
    let no_client = TestApp::with_oauth_config(OAuthProviderConfig::new(provider.url()));
    let response = execute(
        &no_client.schema,
        DELEGATED,
        json!({ "username": "dev", "password": "pw" }),
    )
    .await;
    assert_error_code(&response, "MISSING_PROVIDER_CONFIG");
    assert_eq!(provider.token_call_count().await, 0);
}
