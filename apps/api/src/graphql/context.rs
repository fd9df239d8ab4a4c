//! Request-scoped data shared by resolvers

use async_graphql::Context;

/// Bearer token taken from the HTTP `Authorization` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    /// Parse an `Authorization` header value of the form `Bearer <token>`
    pub fn from_header(value: &str) -> Option<Self> {
        let (scheme, token) = value.trim().split_once(' ')?;
        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return None;
        }
        Some(Self(token.to_string()))
    }
}

/// Session token for a resolver call
///
/// An explicit, non-blank `token` argument wins over the request's bearer token.
pub fn session_token<'a>(ctx: &'a Context<'_>, explicit: Option<&'a str>) -> Option<&'a str> {
    explicit
        .filter(|t| !t.trim().is_empty())
        .or_else(|| ctx.data_opt::<BearerToken>().map(|t| t.0.as_str()))
}
