//! In-memory cache for public read paths.
//!
//! Public pages (home, services, blog) serve from a short-lived `moka`
//! cache in front of the backend's list operations. The admin screens never
//! read this cache - the admin list is only trusted immediately after a
//! fresh fetch - and every admin mutation invalidates the affected entry.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::backend::{BackendError, BlogPost, DataClient, Project, Service};

/// Cache TTL for public list reads (5 minutes).
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Cached public content: one entry per entity collection.
#[derive(Clone)]
pub struct ContentCache {
    projects: Cache<(), Arc<Vec<Project>>>,
    services: Cache<(), Arc<Vec<Service>>>,
    posts: Cache<(), Arc<Vec<BlogPost>>>,
}

fn build<T: Send + Sync + 'static>() -> Cache<(), Arc<Vec<T>>> {
    Cache::builder().max_capacity(1).time_to_live(CACHE_TTL).build()
}

impl ContentCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            projects: build(),
            services: build(),
            posts: build(),
        }
    }

    /// Full project list, cached.
    ///
    /// # Errors
    ///
    /// Returns the backend error from the underlying list call on a miss.
    pub async fn projects(&self, data: &DataClient) -> Result<Arc<Vec<Project>>, BackendError> {
        if let Some(cached) = self.projects.get(&()).await {
            return Ok(cached);
        }
        let fresh = Arc::new(data.list_projects().await?);
        self.projects.insert((), Arc::clone(&fresh)).await;
        Ok(fresh)
    }

    /// Full service list, cached. Callers sort/filter for display.
    ///
    /// # Errors
    ///
    /// Returns the backend error from the underlying list call on a miss.
    pub async fn services(&self, data: &DataClient) -> Result<Arc<Vec<Service>>, BackendError> {
        if let Some(cached) = self.services.get(&()).await {
            return Ok(cached);
        }
        let fresh = Arc::new(data.list_services().await?);
        self.services.insert((), Arc::clone(&fresh)).await;
        Ok(fresh)
    }

    /// Full blog post list, cached. Callers filter to published posts.
    ///
    /// # Errors
    ///
    /// Returns the backend error from the underlying list call on a miss.
    pub async fn posts(&self, data: &DataClient) -> Result<Arc<Vec<BlogPost>>, BackendError> {
        if let Some(cached) = self.posts.get(&()).await {
            return Ok(cached);
        }
        let fresh = Arc::new(data.list_posts().await?);
        self.posts.insert((), Arc::clone(&fresh)).await;
        Ok(fresh)
    }

    /// Drop the cached project list (after an admin mutation).
    pub async fn invalidate_projects(&self) {
        self.projects.invalidate(&()).await;
    }

    /// Drop the cached service list (after an admin mutation).
    pub async fn invalidate_services(&self) {
        self.services.invalidate(&()).await;
    }

    /// Drop the cached blog post list (after an admin mutation).
    pub async fn invalidate_posts(&self) {
        self.posts.invalidate(&()).await;
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}
