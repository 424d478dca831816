//! Remote CSV Source
//!
//! Fetches the debt CSV over HTTP(S) and parses it. Transient failures
//! (connect errors, timeouts, 429 and 5xx) are retried with quadratic
//! backoff; anything else is returned on the spot.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use super::{DataSource, SourceError, SourceResult};
use crate::dataset::{parse_csv_str, Dataset};

/// Default upstream CSV of Lebanon's external debt
pub const DEFAULT_SOURCE_URL: &str =
    "https://linked.aub.edu.lb/pkgcube/data/ec4c40221073bbdf6f75b6c6127249c3_20240905_173222.csv";

/// Configuration for the HTTP source
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// CSV endpoint
    pub url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Base backoff delay; attempt `n` waits `n^2` times this
    pub retry_backoff_ms: u64,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            request_timeout_ms: 15_000,
            max_retries: 2,
            retry_backoff_ms: 1000,
        }
    }
}

/// Dataset source backed by a remote CSV file
pub struct HttpCsvSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpCsvSource {
    pub fn new(config: HttpSourceConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("debtscope/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpSourceConfig {
        &self.config
    }

    /// One GET of the CSV body
    async fn download(&self) -> SourceResult<String> {
        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: self.config.url.clone(),
            });
        }

        response.text().await.map_err(classify)
    }
}

#[async_trait]
impl DataSource for HttpCsvSource {
    fn name(&self) -> &str {
        "http"
    }

    fn location(&self) -> &str {
        &self.config.url
    }

    async fn fetch(&self) -> SourceResult<Arc<Dataset>> {
        let mut attempt: u32 = 0;

        let body = loop {
            if attempt > 0 {
                let delay = backoff_delay(self.config.retry_backoff_ms, attempt);
                tokio::time::sleep(delay).await;
            }

            match self.download().await {
                Ok(body) => break body,
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    tracing::warn!(
                        url = %self.config.url,
                        attempt = attempt + 1,
                        error = %e,
                        "Dataset fetch failed, retrying"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        let dataset = parse_csv_str(&body)?;
        tracing::info!(
            url = %self.config.url,
            rows = dataset.len(),
            bytes = body.len(),
            "Fetched debt dataset"
        );

        Ok(Arc::new(dataset))
    }
}

/// Wait before retry `attempt`: 1x, 4x, 9x... the base backoff
fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    Duration::from_millis(base_ms.saturating_mul(u64::from(attempt).saturating_pow(2)))
}

fn classify(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else if e.is_connect() {
        SourceError::Unavailable(e.to_string())
    } else {
        SourceError::Request(e)
    }
}
