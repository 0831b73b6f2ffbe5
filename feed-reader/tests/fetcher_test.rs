mod common;

use common::{init_tracing, serve_http};
use feed_reader::{FeedSource, FetchConfig, HttpFetcher, ReaderError, Result};
use tracing::info;

const NOT_FOUND: &str = "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

const CHUNKED_FEED: &str = "HTTP/1.1 200 OK\r\n\
Content-Type: application/rss+xml\r\n\
Transfer-Encoding: chunked\r\n\
Connection: close\r\n\
\r\n\
5\r\n<rss>\r\n\
6\r\n</rss>\r\n\
0\r\n\r\n";

fn single_attempt(max_feed_size_mb: usize) -> FetchConfig {
    FetchConfig {
        max_retries: 0,
        retry_delay_seconds: 0,
        timeout_seconds: 5,
        max_feed_size_mb,
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn test_http_status_failure_is_reported_once() -> Result<()> {
    init_tracing();
    let url = serve_http(NOT_FOUND).await;
    let fetcher = HttpFetcher::new(single_attempt(10))?;

    let error = match fetcher.fetch_document(&url).await {
        Err(e) => e,
        Ok(body) => panic!("expected a 404 failure, got {} bytes", body.len()),
    };
    let message = error.to_string();
    info!("404 error: {}", message);

    assert!(matches!(error, ReaderError::FetchFailure { .. }));
    assert!(message.contains("HTTP 404"), "message was {:?}", message);
    assert_eq!(message.matches("Error fetching feed").count(), 1, "message was {:?}", message);
    Ok(())
}

#[tokio::test]
async fn test_body_without_length_is_size_limited() -> Result<()> {
    init_tracing();
    let url = serve_http(CHUNKED_FEED).await;

    // A zero limit rejects any non-empty body, whether or not a length was sent
    let strict = HttpFetcher::new(single_attempt(0))?;
    match strict.fetch_document(&url).await {
        Err(ReaderError::FetchFailure { reason, .. }) => {
            info!("Oversized chunked body: {}", reason);
            assert!(reason.contains("too large"), "reason was {:?}", reason);
        }
        other => panic!("expected a size failure, got {:?}", other.map(|b| b.len())),
    }

    let relaxed = HttpFetcher::new(single_attempt(1))?;
    assert_eq!(relaxed.fetch_document(&url).await?, b"<rss></rss>".to_vec());
    Ok(())
}
