//! HTTP client with rate limiting for the remote file host
//!
//! This module provides a rate-limited HTTP client that spaces out requests
//! to the directory index server and implements retry logic with exponential
//! backoff.

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::parser::parse_directory_listing;

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart.
/// Clones share the same clock, so a cloned client stays throttled.
#[derive(Clone)]
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Example
    /// ```
    /// use catalog_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0); // 2 requests per second
    /// ```
    ///
    /// # Panics
    /// If `requests_per_second` is not a positive finite number; use
    /// [`ClientConfig::min_interval`] to check a configured rate first.
    pub fn new(requests_per_second: f64) -> Self {
        Self::with_interval(Duration::from_secs_f64(1.0 / requests_per_second))
    }

    /// Create a rate limiter from the minimum interval between requests
    pub fn with_interval(min_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(now.checked_sub(min_interval).unwrap_or(now))),
        }
    }

    /// Acquire permission to make a request
    ///
    /// Waits if necessary so the minimum interval between requests is respected.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Retry attempts for 429 and 5xx responses (default: 3)
    pub max_retries: u32,
    /// Base delay for exponential backoff in milliseconds (default: 1000)
    pub retry_base_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2.0,
            timeout_secs: 30,
            max_retries: 3,
            retry_base_delay_ms: 1000,
        }
    }
}

/// HTTP client for directory indexes and the catalog document
///
/// This client automatically:
/// - Limits request rate to avoid hammering the file host
/// - Retries on transient errors (429, 5xx) with exponential backoff
/// - Sends no-cache headers when fetching the catalog document
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl ClientConfig {
    /// Minimum spacing between requests for the configured rate
    ///
    /// # Errors
    /// `CatalogError::InvalidValue` if `requests_per_second` is zero,
    /// negative, NaN or too small to express as an interval
    pub fn min_interval(&self) -> Result<Duration> {
        let rps = self.requests_per_second;
        if !(rps.is_finite() && rps > 0.0) {
            return Err(CatalogError::InvalidValue(format!(
                "requests_per_second must be positive, got {rps}"
            )));
        }
        Duration::try_from_secs_f64(1.0 / rps).map_err(|_| {
            CatalogError::InvalidValue(format!("requests_per_second {rps} is too small"))
        })
    }
}

impl CatalogClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `CatalogError::InvalidValue` if the request rate is not usable
    /// - `CatalogError::HttpError` if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let min_interval = config.min_interval()?;
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::with_interval(min_interval),
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        })
    }

    /// Fetch the body of `url` as text
    ///
    /// This method handles rate limiting and retries automatically.
    ///
    /// # Errors
    /// - `CatalogError::HttpError` - Network or HTTP error after all retries
    /// - `CatalogError::RateLimited` - Server returned 429 after all retries
    /// - `CatalogError::NotFound` - Server returned 404
    pub async fn fetch(&self, url: &str) -> Result<String> {
        self.fetch_with_retry(url, HeaderMap::new(), 0).await
    }

    /// Fetch `url` bypassing every cache on the way
    ///
    /// Appends a millisecond timestamp to the query and sends
    /// `Cache-Control: no-cache` and `Pragma: no-cache`.
    pub async fn fetch_fresh(&self, url: &str) -> Result<String> {
        let busted = cache_busted(url, unix_millis());
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        self.fetch_with_retry(&busted, headers, 0).await
    }

    /// Fetch an Apache-style directory index and return its entry names
    ///
    /// See [`parse_directory_listing`] for the filtering rules.
    pub async fn list_directory(&self, url: &str) -> Result<Vec<String>> {
        let html = self.fetch(url).await?;
        let items = parse_directory_listing(&html);
        debug!(url, entries = items.len(), "directory listed");
        Ok(items)
    }

    /// Internal method to fetch with retry logic
    fn fetch_with_retry<'a>(
        &'a self,
        url: &'a str,
        headers: HeaderMap,
        attempt: u32,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            self.rate_limiter.acquire().await;

            debug!(url, attempt, "GET");
            let response = self.client.get(url).headers(headers.clone()).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.text().await?);
            }

            // 404 is final
            if status == StatusCode::NOT_FOUND {
                return Err(CatalogError::NotFound(url.to_string()));
            }

            let transient = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if transient && attempt < self.max_retries {
                let delay = self.calculate_backoff_delay(attempt);
                warn!(url, %status, ?delay, "transient failure, retrying");
                sleep(delay).await;
                return self.fetch_with_retry(url, headers, attempt + 1).await;
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(CatalogError::RateLimited);
            }

            Err(status_error(response, url))
        })
    }

    /// Calculate exponential backoff delay for retry
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // base, 2*base, 4*base, ... saturating for large retry counts
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.retry_base_delay.saturating_mul(factor)
    }

    /// Get a reference to the rate limiter (for testing)
    #[cfg(test)]
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

fn status_error(response: Response, url: &str) -> CatalogError {
    match response.error_for_status() {
        Err(err) => CatalogError::HttpError(err),
        Ok(resp) => CatalogError::UnexpectedStatus {
            url: url.to_string(),
            status: resp.status().as_u16(),
        },
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Append a cache-busting stamp to the query of `url`
pub(crate) fn cache_busted(url: &str, stamp: u128) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{stamp}")
}
