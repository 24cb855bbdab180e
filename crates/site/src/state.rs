//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{DataClient, IdentityClient, StorageClient};
use crate::cache::ContentCache;
use crate::config::SiteConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// managed backend clients, configuration, and the public read cache. The
/// clients are constructed exactly once here and injected into handlers
/// through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    data: DataClient,
    storage: StorageClient,
    identity: IdentityClient,
    cache: ContentCache,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        let data = DataClient::new(&config.backend);
        let storage = StorageClient::new(&config.backend);
        let identity = IdentityClient::new(&config.backend);
        let cache = ContentCache::new();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                data,
                storage,
                identity,
                cache,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the backend data client.
    #[must_use]
    pub fn data(&self) -> &DataClient {
        &self.inner.data
    }

    /// Get a reference to the backend file storage client.
    #[must_use]
    pub fn storage(&self) -> &StorageClient {
        &self.inner.storage
    }

    /// Get a reference to the backend identity client.
    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.inner.identity
    }

    /// Get a reference to the public read cache.
    #[must_use]
    pub fn cache(&self) -> &ContentCache {
        &self.inner.cache
    }
}
