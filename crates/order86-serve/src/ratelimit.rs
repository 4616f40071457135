//! Fixed-window request rate limiting keyed by client address.
//!
//! The window never slides: the first request from a client opens a
//! window, every request inside it increments a counter, and the first
//! request after it ages out opens a fresh one. A background sweep
//! prunes entries whose window has expired, bounding memory growth.
//!
//! The map sits behind a plain mutex. Under a concurrent burst the
//! at-least-allow semantics are acceptable; the sweep holds the lock
//! only for the retain pass.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ServeError;
use crate::state::AppState;

/// Default ceiling: requests allowed per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 60;

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Interval between background sweeps of stale entries.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Debug)]
struct WindowEntry {
    window_start: Instant,
    count: u32,
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Limited { retry_after: Duration },
}

/// Fixed-window per-client request counter.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether a request from `key` is allowed right now.
    pub fn allow(&self, key: &str) -> Decision {
        self.allow_at(key, Instant::now())
    }

    fn allow_at(&self, key: &str, now: Instant) -> Decision {
        let mut entries = self.entries.lock();
        match entries.get_mut(key) {
            Some(entry) if now.duration_since(entry.window_start) < self.window => {
                entry.count += 1;
                if entry.count <= self.max_requests {
                    Decision::Allowed
                } else {
                    Decision::Limited {
                        retry_after: self.window - now.duration_since(entry.window_start),
                    }
                }
            }
            _ => {
                entries.insert(
                    key.to_string(),
                    WindowEntry {
                        window_start: now,
                        count: 1,
                    },
                );
                Decision::Allowed
            }
        }
    }

    /// Drop entries whose window has expired.
    pub fn sweep(&self) {
        self.sweep_at(Instant::now());
    }

    fn sweep_at(&self, now: Instant) {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.window_start) < self.window);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, tracked = entries.len(), "rate limiter sweep");
        }
    }
}

/// Spawn the periodic sweep task. Runs for the life of the process.
pub fn spawn_sweeper(limiter: Arc<RateLimiter>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            limiter.sweep();
        }
    });
}

/// Derive the client key for a request: the first `x-forwarded-for`
/// entry when present, else the socket peer address.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Axum middleware applying the limiter before any route handler.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServeError> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    let key = client_key(request.headers(), peer);

    match state.limiter.allow(&key) {
        Decision::Allowed => Ok(next.run(request).await),
        Decision::Limited { retry_after } => {
            tracing::debug!(client = %key, "rate limit exceeded");
            Err(ServeError::RateLimited {
                retry_after_secs: retry_after.as_secs().max(1),
            })
        }
    }
}
