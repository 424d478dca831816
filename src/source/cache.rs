//! Cached Source
//!
//! Wraps another [`DataSource`] and serves the last dataset it returned
//! until the TTL runs out. An expired entry whose refresh fails is not
//! served: the error goes to the caller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::{DataSource, SourceResult};
use crate::dataset::Dataset;

struct CacheEntry {
    dataset: Arc<Dataset>,
    loaded_at: Instant,
    fetched_at: DateTime<Utc>,
}

/// TTL cache in front of a slower source
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl<S: DataSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: RwLock::new(None),
        }
    }

    fn fresh(&self, entry: &CacheEntry) -> Option<Arc<Dataset>> {
        (entry.loaded_at.elapsed() < self.ttl).then(|| Arc::clone(&entry.dataset))
    }
}

#[async_trait]
impl<S: DataSource> DataSource for CachedSource<S> {
    fn name(&self) -> &str {
        "cached"
    }

    fn location(&self) -> &str {
        self.inner.location()
    }

    async fn fetch(&self) -> SourceResult<Arc<Dataset>> {
        if let Some(dataset) = self.entry.read().await.as_ref().and_then(|e| self.fresh(e)) {
            tracing::debug!("Serving cached dataset");
            return Ok(dataset);
        }

        let mut guard = self.entry.write().await;

        // Another task may have refreshed while we waited for the lock
        if let Some(dataset) = guard.as_ref().and_then(|e| self.fresh(e)) {
            return Ok(dataset);
        }

        let dataset = self.inner.fetch().await?;
        tracing::info!(
            source = self.inner.name(),
            ttl_secs = self.ttl.as_secs(),
            "Dataset cache refreshed"
        );

        *guard = Some(CacheEntry {
            dataset: Arc::clone(&dataset),
            loaded_at: Instant::now(),
            fetched_at: Utc::now(),
        });

        Ok(dataset)
    }

    async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.entry.read().await.as_ref().map(|e| e.fetched_at)
    }
}
