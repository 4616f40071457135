//! Route definitions for the showcase server.
//!
//! ## Routes
//!
//! - `GET /wizard/{id}` - Wizard profile page (HTML)
//! - `GET /wizard/{id}/og.png` - OG card image (PNG)
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - everything else - static files under the document root
//!
//! The rate limiter runs as middleware ahead of every route.

mod health;
mod og;
mod static_files;
mod wizard;

use axum::Router;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::ratelimit;
use crate::state::AppState;

/// Build the complete router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/wizard/{id}", get(wizard::wizard_page_handler))
        .route("/wizard/{id}/og.png", get(og::og_image_handler))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .fallback(get(static_files::static_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ratelimit::rate_limit_middleware,
        ))
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers.
///
/// Crawlers must be able to fetch wizard pages for link previews.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
}

/// Hardening headers applied to every successful response.
pub(crate) fn apply_hardening_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static("SAMEORIGIN"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
}
