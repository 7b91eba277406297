//! Shared error types.

use serde::Deserialize;
use thiserror::Error;

/// API error type for client-side use
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Best-effort human readable message from the response body, if any.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ApiError::Http { body, .. } => try_error_message(body),
            _ => None,
        }
    }
}

/// Error bodies seen from the backends: Spring's `{message, error}`,
/// RFC7807 `{title, detail}`, or a bare `{error}`.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    detail: Option<String>,
    error: Option<String>,
    title: Option<String>,
}

/// Attempt to pull a user-facing message out of a JSON error body.
/// Prefers `message`, then `detail`, `error` and `title`.
pub fn try_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    [parsed.message, parsed.detail, parsed.error, parsed.title]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_spring_message() {
        let body = r#"{"timestamp":"x","status":400,"error":"Bad Request","message":"Name taken"}"#;
        assert_eq!(try_error_message(body).as_deref(), Some("Name taken"));
    }

    #[test]
    fn falls_back_past_blank_fields() {
        let body = r#"{"message":"  ","detail":"Missing token"}"#;
        assert_eq!(try_error_message(body).as_deref(), Some("Missing token"));
    }

    #[test]
    fn non_json_body_has_no_message() {
        let err = ApiError::Http {
            status: 502,
            body: "<html>bad gateway</html>".into(),
        };
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.server_message(), None);
    }
}
