//! HTTP routes for the Tally API
//!
//! - `GET /graphql?query=...` and `POST /graphql`: GraphQL execution
//! - `GET /graphql/playground`: GraphQL Playground
//! - `GET /health`: liveness check

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::Extension,
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::graphql::{BearerToken, TallySchema};

/// Build the application router around a schema
pub fn app_router(schema: TallySchema) -> Router {
    Router::new()
        .route("/graphql", get(graphql_handler).post(graphql_handler))
        .route("/graphql/playground", get(graphql_playground))
        .route("/health", get(health))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
}

/// GraphQL handler that executes queries against the schema
///
/// A bearer token in the `Authorization` header is forwarded to resolvers as
/// [`BearerToken`]. It is not checked here; resolvers that need a session
/// resolve it themselves.
async fn graphql_handler(
    Extension(schema): Extension<TallySchema>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(BearerToken::from_header)
    {
        request = request.data(token);
    }

    schema.execute(request).await.into()
}

/// GraphQL Playground handler
async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

async fn health() -> &'static str {
    "ok"
}
