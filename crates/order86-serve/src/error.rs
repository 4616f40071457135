//! Error types for the showcase server.
//!
//! Every per-request failure is converted to a plain-text HTTP response
//! at the route boundary; no error escapes a handler and terminates the
//! process.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Request-handling error type.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Unknown wizard id or missing static resource with no fallback.
    #[error("not found")]
    NotFound,

    /// Path-traversal attempt outside the document root.
    #[error("forbidden")]
    Forbidden,

    /// Per-client request quota exceeded.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// OG card composition failed (e.g., corrupt portrait asset).
    #[error("render failed: {0}")]
    Render(#[source] anyhow::Error),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
            Self::RateLimited { retry_after_secs } => {
                let mut response =
                    (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response();
                if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                    response.headers_mut().insert(header::RETRY_AFTER, value);
                }
                response
            }
            Self::Render(error) => {
                tracing::error!(%error, "og card render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            Self::Internal(error) => {
                tracing::error!(%error, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = ServeError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = ServeError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn rate_limited_maps_to_429_with_retry_after() {
        let response = ServeError::RateLimited {
            retry_after_secs: 42,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            &HeaderValue::from_static("42")
        );
    }

    #[test]
    fn render_failure_maps_to_500() {
        let response = ServeError::Render(anyhow::anyhow!("bad portrait")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_maps_to_500() {
        let response = ServeError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
