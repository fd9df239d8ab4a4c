//! Argument validation shared by services and resolvers
//!
//! Every check here runs before any store access and fails with
//! `ApiError::InvalidArgument`.

use crate::error::{ApiError, ApiResult};

/// Minimum password length accepted on signup and reset
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum todo text length, in characters
pub const MAX_TODO_TEXT_LEN: usize = 1000;

/// Reject a blank required string, returning it trimmed
pub fn require_non_blank<'a>(field: &str, value: &'a str) -> ApiResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::invalid_argument(format!("{} must not be blank", field)));
    }
    Ok(trimmed)
}

/// Reject an absent value
pub fn require_present<T>(field: &str, value: Option<T>) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::invalid_argument(format!("{} is required", field)))
}

pub fn validate_email(email: &str) -> ApiResult<&str> {
    let email = require_non_blank("email", email)?;
    if !is_valid_email(email) {
        return Err(ApiError::invalid_argument("invalid email format"));
    }
    Ok(email)
}

pub fn validate_new_password(password: &str) -> ApiResult<()> {
    require_non_blank("password", password)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::invalid_argument(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub fn validate_todo_text(text: &str) -> ApiResult<&str> {
    let text = require_non_blank("text", text)?;
    if text.chars().count() > MAX_TODO_TEXT_LEN {
        return Err(ApiError::invalid_argument(format!(
            "text must be at most {} characters",
            MAX_TODO_TEXT_LEN
        )));
    }
    Ok(text)
}

/// Simple email validation (`local@domain.tld`)
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.len() > 254 {
        return false;
    }

    // Must have exactly one @ symbol
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|part| !part.is_empty())
}
