//! Static file serving under the configured document root.
//!
//! Mapping rules, in order:
//! - the empty path becomes `index.html`
//! - an extensionless path gets `.html` appended
//! - the result must resolve inside the document root, or the request
//!   is rejected with 403
//! - a missing `.html` target falls back to the index document (the
//!   pre-rendered site is a single-page app); a missing non-HTML asset
//!   is a plain 404 so monitoring sees real asset misses

use std::path::{Component, Path, PathBuf};

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use crate::error::ServeError;
use crate::state::AppState;

/// Fallback handler: everything that is not a wizard or service route.
pub async fn static_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, ServeError> {
    serve_path(&state, uri.path()).await
}

/// Serve a request path from the document root.
pub(crate) async fn serve_path(state: &AppState, raw_path: &str) -> Result<Response, ServeError> {
    let decoded = urlencoding::decode(raw_path).map_err(|_| ServeError::NotFound)?;

    let mut relative = decoded.trim_start_matches('/').to_string();
    if relative.is_empty() {
        relative = "index.html".to_string();
    }
    if Path::new(&relative).extension().is_none() {
        relative.push_str(".html");
    }

    let root = &state.config.site_root;
    let joined = resolve_under_root(root, &relative)?;
    let is_html = joined.extension().is_some_and(|ext| ext == "html");

    // Prefix comparison of resolved absolute paths: symlinks must not
    // lead outside the root either.
    let canonical_root = root.canonicalize().ok();
    match joined.canonicalize() {
        Ok(resolved) => {
            let inside = canonical_root
                .as_ref()
                .is_some_and(|root| resolved.starts_with(root));
            if !inside {
                return Err(ServeError::Forbidden);
            }
            match tokio::fs::read(&resolved).await {
                Ok(data) => Ok(file_response(&resolved, data)),
                Err(_) if is_html => serve_index_fallback(state).await,
                Err(_) => Err(ServeError::NotFound),
            }
        }
        Err(_) if is_html => serve_index_fallback(state).await,
        Err(_) => Err(ServeError::NotFound),
    }
}

/// Serve the index document with 200, or 404 when it too is missing.
pub(crate) async fn serve_index_fallback(state: &AppState) -> Result<Response, ServeError> {
    let index = state.config.site_root.join("index.html");
    match tokio::fs::read(&index).await {
        Ok(data) => Ok(file_response(&index, data)),
        Err(error) => {
            tracing::debug!(path = %index.display(), %error, "index fallback missing");
            Err(ServeError::NotFound)
        }
    }
}

/// Lexically resolve `relative` under `root`, rejecting any component
/// that could climb out (`..`, absolute segments, drive prefixes).
pub(crate) fn resolve_under_root(root: &Path, relative: &str) -> Result<PathBuf, ServeError> {
    let mut clean = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            _ => return Err(ServeError::Forbidden),
        }
    }
    Ok(root.join(clean))
}

fn file_response(path: &Path, data: Vec<u8>) -> Response {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let content_type = content_type_for(extension);
    let is_html = extension == "html";

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(if is_html {
            "no-cache"
        } else {
            "public, max-age=86400"
        }),
    );
    super::apply_hardening_headers(&mut headers);

    (StatusCode::OK, headers, data).into_response()
}

/// MIME type by file extension. Unknown extensions are served as
/// opaque binary.
fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "application/javascript",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "json" => "application/json",
        "woff2" => "font/woff2",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_under_root_plain_path() {
        let resolved = resolve_under_root(Path::new("/srv/site"), "css/app.css").unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/site/css/app.css"));
    }

    #[test]
    fn resolve_under_root_rejects_parent_components() {
        assert!(matches!(
            resolve_under_root(Path::new("/srv/site"), "../etc/passwd"),
            Err(ServeError::Forbidden)
        ));
        assert!(matches!(
            resolve_under_root(Path::new("/srv/site"), "a/../../b"),
            Err(ServeError::Forbidden)
        ));
    }

    #[test]
    fn resolve_under_root_rejects_absolute_paths() {
        assert!(matches!(
            resolve_under_root(Path::new("/srv/site"), "/etc/passwd"),
            Err(ServeError::Forbidden)
        ));
    }

    #[test]
    fn resolve_under_root_ignores_current_dir() {
        let resolved = resolve_under_root(Path::new("/srv/site"), "./a/./b.css").unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/site/a/b.css"));
    }

    #[test]
    fn content_types_from_table() {
        assert_eq!(content_type_for("html"), "text/html; charset=utf-8");
        assert_eq!(content_type_for("css"), "text/css");
        assert_eq!(content_type_for("js"), "application/javascript");
        assert_eq!(content_type_for("png"), "image/png");
        assert_eq!(content_type_for("jpeg"), "image/jpeg");
        assert_eq!(content_type_for("woff2"), "font/woff2");
        assert_eq!(content_type_for("wasm"), "application/octet-stream");
        assert_eq!(content_type_for(""), "application/octet-stream");
    }
}
