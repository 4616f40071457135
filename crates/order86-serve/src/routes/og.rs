//! OG card image route.
//!
//! Handles `GET /wizard/{id}/og.png`. Cards are rendered once per
//! wizard and memoized, so repeated requests return byte-identical
//! PNGs for the process lifetime.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::ServeError;
use crate::ogcard;
use crate::state::AppState;

use super::static_files;

/// Handle a request for a wizard's OG card.
pub async fn og_image_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServeError> {
    let Ok(id) = id.parse::<u32>() else {
        return Err(ServeError::NotFound);
    };

    let Some(record) = state.store.lookup(id) else {
        tracing::debug!(id, "wizard not found for og card");
        return Err(ServeError::NotFound);
    };

    if let Some(cached) = state.og_cache.get(&id).await {
        tracing::debug!(id, "og card cache hit");
        return Ok(png_response(cached));
    }

    tracing::debug!(id, "og card cache miss, rendering");

    let portrait = load_portrait(&state, &record.image).await;
    let png = ogcard::render_card(
        record,
        portrait.as_deref(),
        u64::from(id),
        &state.config.site_name,
        state.config.display_host(),
    )?;

    state.og_cache.insert(id, png.clone()).await;

    Ok(png_response(png))
}

/// Read the portrait asset from the document root.
///
/// A missing or unreadable portrait is non-fatal; the card renders
/// without it.
async fn load_portrait(state: &AppState, image: &str) -> Option<Vec<u8>> {
    let path = static_files::resolve_under_root(&state.config.site_root, image).ok()?;
    match tokio::fs::read(&path).await {
        Ok(bytes) => Some(bytes),
        Err(error) => {
            tracing::debug!(
                path = %path.display(),
                %error,
                "portrait unavailable, rendering card without it"
            );
            None
        }
    }
}

/// Build an HTTP response with PNG content, length, and cache headers.
fn png_response(png: Vec<u8>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=86400"),
    );
    if let Ok(value) = HeaderValue::from_str(&png.len().to_string()) {
        headers.insert(header::CONTENT_LENGTH, value);
    }
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    (StatusCode::OK, headers, png).into_response()
}
