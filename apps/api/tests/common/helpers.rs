//! Helpers for executing GraphQL documents in tests

#![allow(dead_code)]

use async_graphql::{Request, Response, Variables};
use serde_json::Value;
use tally_api::graphql::{BearerToken, TallySchema};

/// Execute a document with JSON variables
pub async fn execute(schema: &TallySchema, query: &str, variables: Value) -> Response {
    schema
        .execute(Request::new(query).variables(Variables::from_json(variables)))
        .await
}

/// Execute a document as if sent with `Authorization: Bearer <token>`
pub async fn execute_with_bearer(
    schema: &TallySchema,
    query: &str,
    variables: Value,
    token: &str,
) -> Response {
    schema
        .execute(
            Request::new(query)
                .variables(Variables::from_json(variables))
                .data(BearerToken(token.to_string())),
        )
        .await
}

/// Response data as JSON, panicking on errors
pub fn data(response: Response) -> Value {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().expect("data is JSON")
}

/// `extensions.code` of the first error
pub fn error_code(response: &Response) -> Option<String> {
    let error = response.errors.first()?;
    match error.extensions.as_ref()?.get("code")? {
        async_graphql::Value::String(code) => Some(code.clone()),
        _ => None,
    }
}

/// Assert the response failed with the given error code
pub fn assert_error_code(response: &Response, expected: &str) {
    assert_eq!(
        error_code(response).as_deref(),
        Some(expected),
        "errors: {:?}",
        response.errors
    );
}

pub const SIGNUP: &str = r#"
    mutation Signup($email: String!, $password: String!) {
        signup(email: $email, password: $password) {
            token
            user { id email role sessionToken }
        }
    }
"#;

pub const LOGIN: &str = r#"
    mutation Login($email: String!, $password: String!) {
        login(email: $email, password: $password) {
            token
            user { id email }
        }
    }
"#;

pub const CREATE_TODO: &str = r#"
    mutation CreateTodo($text: String!, $token: String) {
        createTodo(text: $text, token: $token) { id text done ownerId }
    }
"#;

pub const UPDATE_TODO: &str = r#"
    mutation UpdateTodo($id: String!, $done: Boolean, $token: String) {
        updateTodo(id: $id, done: $done, token: $token) { id text done }
    }
"#;

pub const TODO: &str = r#"
    query Todo($id: String, $token: String) {
        todo(id: $id, token: $token) { id text done ownerId }
    }
"#;

pub const TODO_LIST: &str = r#"
    query TodoList($token: String) {
        todoList(token: $token) { id text done }
    }
"#;

/// Sign up and return `(token, user id)`
pub async fn signup(schema: &TallySchema, email: &str, password: &str) -> (String, String) {
    let response = execute(
        schema,
        SIGNUP,
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    let data = data(response);
    (
        data["signup"]["token"].as_str().expect("token").to_string(),
        data["signup"]["user"]["id"].as_str().expect("id").to_string(),
    )
}

/// Log in and return the session token
pub async fn login(schema: &TallySchema, email: &str, password: &str) -> String {
    let response = execute(
        schema,
        LOGIN,
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    data(response)["login"]["token"]
        .as_str()
        .expect("token")
        .to_string()
}
