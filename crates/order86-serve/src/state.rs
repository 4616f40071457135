//! Application state shared across all request handlers.

use std::sync::Arc;

use moka::future::Cache;
use order86_core::WizardStore;

use crate::config::Config;
use crate::ratelimit::RateLimiter;

/// Type alias for the OG card cache (wizard id -> PNG bytes).
pub type OgImageCache = Cache<u32, Vec<u8>>;

/// OG card cache capacity.
///
/// The wizard set is small and fixed, so the cache is bounded by
/// capacity alone; entries are never invalidated and the first render
/// per wizard is frozen for the process lifetime.
const OG_CACHE_CAPACITY: u64 = 1024;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Wizard attribute records, loaded once at startup.
    pub store: Arc<WizardStore>,

    /// In-memory OG card cache keyed by wizard id.
    pub og_cache: OgImageCache,

    /// Per-client fixed-window request limiter.
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Create application state with the default rate limiter.
    pub fn new(config: Config, store: WizardStore) -> Self {
        let og_cache = Cache::builder().max_capacity(OG_CACHE_CAPACITY).build();

        tracing::info!(
            wizards = store.len(),
            og_cache_capacity = OG_CACHE_CAPACITY,
            "application state initialized"
        );

        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            og_cache,
            limiter: Arc::new(RateLimiter::default()),
        }
    }

    /// Replace the rate limiter, for tests exercising small quotas.
    pub fn with_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = Arc::new(limiter);
        self
    }
}
