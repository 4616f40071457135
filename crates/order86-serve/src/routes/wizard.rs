//! Wizard profile page route.
//!
//! Handles `GET /wizard/{id}`. Ids are digits only; anything else falls
//! through to the static-site behavior, matching how the original site
//! treated unmatched routes.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::ServeError;
use crate::render;
use crate::state::AppState;

use super::static_files;

/// Handle a wizard profile page request.
pub async fn wizard_page_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServeError> {
    let Ok(id) = id.parse::<u32>() else {
        return static_files::serve_path(&state, &format!("/wizard/{id}")).await;
    };

    let Some(record) = state.store.lookup(id) else {
        tracing::debug!(id, "wizard not found");
        return Err(ServeError::NotFound);
    };

    let markup = render::wizard::render(record, &state.config.base_url, &state.config.site_name);
    Ok(html_response(&markup.into_string()))
}

/// Build an HTML response with content, cache, and security headers.
fn html_response(html: &str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=3600"),
    );

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(value) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, value);
    }

    super::apply_hardening_headers(&mut headers);

    (StatusCode::OK, headers, html.to_string()).into_response()
}
