#![allow(dead_code)]

use async_trait::async_trait;
use feed_reader::{FeedSource, PolarityScorer, ReaderError, Result, Translator};
use std::collections::HashMap;
use std::sync::Once;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Sample News</title>
    <link>https://example.com</link>
    <description>Sample feed for tests</description>
    <item>
      <title>First story</title>
      <link>https://example.com/1</link>
      <description>&lt;p&gt;Great results for the rust team&lt;/p&gt;</description>
      <pubDate>Mon, 01 Jan 2024 10:00:00 GMT</pubDate>
      <media:thumbnail url="https://example.com/thumb1.jpg"/>
    </item>
    <item>
      <link>https://example.com/2</link>
      <description>Second story body</description>
      <enclosure url="https://example.com/photo2.jpg" type="image/jpeg" length="1024"/>
    </item>
    <item>
      <title>Third story</title>
      <link>https://example.com/3</link>
    </item>
  </channel>
</rss>"#;

pub const NOT_A_FEED: &str = "<html><body><p>definitely not a feed</p></body></html>";

/// Serves canned documents by url; unknown urls fail like an unreachable host.
#[derive(Default)]
pub struct StubSource {
    documents: HashMap<String, String>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, body: &str) -> Self {
        self.documents.insert(url.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl FeedSource for StubSource {
    async fn fetch_document(&self, url: &str) -> Result<Vec<u8>> {
        self.documents
            .get(url)
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| ReaderError::FetchFailure {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
    }
}

/// Returns every text unchanged.
pub struct EchoTranslator;

#[async_trait]
impl Translator for EchoTranslator {
    fn translator_name(&self) -> String {
        "echo".to_string()
    }

    async fn translate(&self, text: &str, _target_locale: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Looks texts up in a dictionary and fails for anything it doesn't know.
#[derive(Default)]
pub struct DictionaryTranslator {
    known: HashMap<String, String>,
}

impl DictionaryTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: &str, translated: &str) -> Self {
        self.known.insert(source.to_string(), translated.to_string());
        self
    }
}

#[async_trait]
impl Translator for DictionaryTranslator {
    fn translator_name(&self) -> String {
        "dictionary".to_string()
    }

    async fn translate(&self, text: &str, _target_locale: &str) -> Result<String> {
        self.known
            .get(text)
            .cloned()
            .ok_or_else(|| ReaderError::Translation(format!("service unavailable for {:?}", text)))
    }
}

/// Always reports the same polarity.
pub struct FixedScorer(pub f64);

impl PolarityScorer for FixedScorer {
    fn polarity(&self, _text: &str) -> Result<f64> {
        Ok(self.0)
    }
}

pub struct BrokenScorer;

impl PolarityScorer for BrokenScorer {
    fn polarity(&self, _text: &str) -> Result<f64> {
        Err(ReaderError::Sentiment("model not loaded".to_string()))
    }
}

/// Answer every connection on a local port with the same raw HTTP response.
/// Returns a feed url pointing at that port.
pub async fn serve_http(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind local listener");
    let addr = listener.local_addr().expect("local address");

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request).await;
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    format!("http://{}/feed.xml", addr)
}
