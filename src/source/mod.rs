//! Data Source Adapters
//!
//! This module provides the ways the dashboard obtains its dataset:
//! - HTTP (the remote CSV endpoint, with retry)
//! - Cache (a TTL wrapper around any other source)
//! - Static (a fixed in-memory dataset)
//!
//! Every render calls [`DataSource::fetch`] once. Failures are not papered
//! over: there is no fallback dataset.

mod cache;
mod http;

pub use cache::CachedSource;
pub use http::{HttpCsvSource, HttpSourceConfig, DEFAULT_SOURCE_URL};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::dataset::{Dataset, DatasetError};

/// Common trait for all dataset providers
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short name used in logs and health output
    fn name(&self) -> &str;

    /// Where the data comes from (URL or description)
    fn location(&self) -> &str;

    /// Produce the dataset for one render
    async fn fetch(&self) -> SourceResult<Arc<Dataset>>;

    /// When the dataset currently held was fetched upstream. Sources that
    /// hold nothing between renders return `None`.
    async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// A source that always returns the same dataset
pub struct StaticSource {
    dataset: Arc<Dataset>,
}

impl StaticSource {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}

#[async_trait]
impl DataSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn location(&self) -> &str {
        "in-memory"
    }

    async fn fetch(&self) -> SourceResult<Arc<Dataset>> {
        Ok(Arc::clone(&self.dataset))
    }
}

/// Errors that can occur while fetching the dataset
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Malformed dataset: {0}")]
    Dataset(#[from] DatasetError),
}

impl SourceError {
    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Unavailable(_) | SourceError::Timeout => true,
            SourceError::Http { status, .. } => *status == 429 || *status >= 500,
            SourceError::Request(_) | SourceError::Dataset(_) => false,
        }
    }
}

/// Result type alias for source operations
pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new(Dataset::new(vec![Record::new(2008, 44.0)]));
        let ds = source.fetch().await.unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(source.name(), "static");
        assert!(source.fetched_at().await.is_none());
    }

    #[test]
    fn test_transient_errors() {
        assert!(SourceError::Timeout.is_transient());
        assert!(SourceError::Http { status: 503, url: "u".into() }.is_transient());
        assert!(SourceError::Http { status: 429, url: "u".into() }.is_transient());
        assert!(!SourceError::Http { status: 404, url: "u".into() }.is_transient());
        assert!(!SourceError::Dataset(DatasetError::MissingColumn("Value".into())).is_transient());
    }
}
