//! HTTP client for the Seoul citydata API with bounded parallelism.
//!
//! This module provides congestion fetching with:
//! - Connection pooling shared across all requests
//! - Parallel fetching capped at a fixed number of in-flight requests
//! - Partial-failure tolerance (a failed place is logged and dropped)
//!
//! No retries: a place that fails is missing from this run's maps.

use futures::future;
use futures::stream::{self, StreamExt};
use log::{debug, info};
use reqwest::Client;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::citydata::parse_citydata;
use crate::config::Config;
use crate::error::Result;
use crate::CrowdReading;

/// Maximum number of citydata requests in flight at once.
pub const MAX_CONCURRENCY: usize = 10;
const REQUEST_TIMEOUT_SECS: u64 = 8;
// The API pages results; a single area needs only the first page.
const PAGE_RANGE: &str = "1/5";

/// Run `f` over `items` with at most `limit` futures in flight, keeping
/// every `Some` result in completion order.
pub async fn gather_bounded<I, T, F, Fut>(items: I, limit: usize, f: F) -> Vec<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    stream::iter(items)
        .map(f)
        .buffer_unordered(limit.max(1))
        .filter_map(future::ready)
        .collect()
        .await
}

/// Concurrent congestion fetcher
pub struct CongestionFetcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CongestionFetcher {
    /// Create a fetcher for the citydata API described by `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(MAX_CONCURRENCY)
            .pool_idle_timeout(Duration::from_secs(60))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.citydata_base_url.clone(),
            api_key: config.seoul_api_key.clone(),
        })
    }

    /// Fetch every place with bounded parallelism.
    ///
    /// Places whose request fails or whose response lacks congestion or
    /// coordinate data are dropped. The result is in completion order.
    pub async fn fetch_all(&self, places: &[&str]) -> Vec<CrowdReading> {
        let total = places.len();
        let completed = Arc::new(AtomicUsize::new(0));

        info!(
            "[CongestionFetcher] Starting fetch of {} places (max concurrent: {})",
            total, MAX_CONCURRENCY
        );

        let start = Instant::now();

        let readings = gather_bounded(places.iter().copied(), MAX_CONCURRENCY, |place| {
            let completed = Arc::clone(&completed);
            async move {
                let result = self.fetch_one(place).await;
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                debug!("[Progress] {}/{} | {:.2}s", done, total, start.elapsed().as_secs_f64());
                result
            }
        })
        .await;

        info!(
            "[CongestionFetcher] DONE: {}/{} collected ({} dropped) in {:.2}s",
            readings.len(),
            total,
            total - readings.len(),
            start.elapsed().as_secs_f64()
        );

        readings
    }

    /// Fetch and parse a single place. Never fails: errors become `None`.
    pub async fn fetch_one(&self, place: &str) -> Option<CrowdReading> {
        let url = self.place_url(place);
        let req_start = Instant::now();

        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!("[Fetch {}] request error: {}", place, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            // Body is still scanned; error pages simply carry no congestion block.
            debug!("[Fetch {}] HTTP {}", place, status);
        }

        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                debug!("[Fetch {}] body download error: {}", place, e);
                return None;
            }
        };

        let reading = parse_citydata(place, &body)?;
        info!(
            "[Fetch {}] collected ({}, score {}) in {:?}",
            place,
            reading.level.label(),
            reading.score(),
            req_start.elapsed()
        );
        Some(reading)
    }

    fn place_url(&self, place: &str) -> String {
        format!(
            "{}/{}/xml/citydata/{}/{}",
            self.base_url,
            self.api_key,
            PAGE_RANGE,
            urlencoding::encode(place)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_gather_bounded_respects_limit() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let results: Vec<usize> = gather_bounded(0..40usize, MAX_CONCURRENCY, |i| {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Some(i)
            }
        })
        .await;

        assert_eq!(results.len(), 40);
        let peak = peak.load(Ordering::SeqCst);
        assert!(peak <= MAX_CONCURRENCY, "peak in-flight was {}", peak);
        assert!(peak > 1, "expected parallel execution, peak was {}", peak);
    }

    #[tokio::test]
    async fn test_gather_bounded_drops_empty_results() {
        let results: Vec<u32> =
            gather_bounded(1..=10u32, 3, |i| async move { (i % 2 == 0).then_some(i) }).await;

        let mut sorted = results.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![2, 4, 6, 8, 10]);
    }

    #[tokio::test]
    async fn test_gather_bounded_zero_limit_still_runs() {
        let results: Vec<u8> = gather_bounded(vec![1u8, 2], 0, |i| async move { Some(i) }).await;
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_place_url_is_percent_encoded() {
        let config = Config::new("KEY", "MAP").with_base_urls("http://localhost:1", "http://x");
        let fetcher = CongestionFetcher::new(&config).unwrap();
        let url = fetcher.place_url("홍대 관광특구");
        assert!(url.starts_with("http://localhost:1/KEY/xml/citydata/1/5/"));
        assert!(!url.contains(' '));
        assert!(url.ends_with(&*urlencoding::encode("홍대 관광특구")));
    }
}
