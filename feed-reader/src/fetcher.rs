use crate::parser::FeedParser;
use crate::traits::FeedSource;
use crate::types::{FetchConfig, ParsedFeed, ReaderError, Result};
use async_trait::async_trait;
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// HTTP retrieval of feed documents.
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ReaderError::FetchFailure {
                url: url.to_string(),
                reason: format!("HTTP {}: {}", status, status.canonical_reason().unwrap_or("Unknown")),
            });
        }

        let limit = self.config.max_feed_size_mb * 1024 * 1024;
        if let Some(content_length) = response.content_length() {
            if content_length as usize > limit {
                return Err(too_large(url, content_length as usize, limit));
            }
        }

        // Chunked responses carry no length, so the body itself is checked too
        let body = response.bytes().await?;
        if body.len() > limit {
            return Err(too_large(url, body.len(), limit));
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl FeedSource for HttpFetcher {
    async fn fetch_document(&self, url: &str) -> Result<Vec<u8>> {
        let start_time = Instant::now();
        debug!("Fetching feed: {}", url);

        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_secs(self.config.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.config.retry_delay_seconds),
            max_interval: Duration::from_secs(self.config.retry_delay_seconds * 8),
            multiplier: 2.0,
            max_elapsed_time: Some(Duration::from_secs(self.config.retry_delay_seconds * 30)),
            ..Default::default()
        };

        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.fetch_once(url).await {
                Ok(body) => {
                    info!(
                        "Fetched feed: {} ({} bytes in {}ms)",
                        url,
                        body.len(),
                        start_time.elapsed().as_millis()
                    );
                    return Ok(body);
                }
                Err(e) => {
                    last_error = Some(e);

                    if attempt < self.config.max_retries {
                        if let Some(delay) = backoff.next_backoff() {
                            warn!("Attempt {} failed for {}, retrying in {:?}", attempt + 1, url, delay);
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                    }
                    break;
                }
            }
        }

        error!("Failed to fetch feed after {} attempts: {}", self.config.max_retries + 1, url);

        match last_error {
            Some(e @ ReaderError::FetchFailure { .. }) => Err(e),
            other => Err(ReaderError::FetchFailure {
                url: url.to_string(),
                reason: other.map(|e| e.to_string()).unwrap_or_else(|| "Unknown error".to_string()),
            }),
        }
    }
}

fn too_large(url: &str, size: usize, limit: usize) -> ReaderError {
    ReaderError::FetchFailure {
        url: url.to_string(),
        reason: format!("Feed too large: {} bytes (limit {} bytes)", size, limit),
    }
}

/// Retrieves a feed and parses it into article entries.
pub struct FeedFetcher {
    source: Arc<dyn FeedSource>,
    parser: FeedParser,
}

impl FeedFetcher {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self {
            source,
            parser: FeedParser::new(),
        }
    }

    pub fn http(config: FetchConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpFetcher::new(config)?)))
    }

    /// Fetch `url` and parse it. A document the parser rejects is reported as
    /// `MalformedFeed`, transport problems as `FetchFailure`.
    pub async fn fetch(&self, url: &str) -> Result<ParsedFeed> {
        let document = self.source.fetch_document(url).await?;
        let feed = self.parser.parse_feed(&document)?;
        info!("Feed {} yielded {} entries", url, feed.entries.len());
        Ok(feed)
    }
}
