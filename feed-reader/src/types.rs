use serde::{Deserialize, Serialize};

pub const NO_TITLE: &str = "No Title Available";
pub const NO_CONTENT: &str = "No Content Available";
pub const NO_PUBLICATION_DATE: &str = "No Publication Date Available";
pub const TRANSLATION_UNAVAILABLE: &str = "Translation not available";

/// One persisted feed subscription.
///
/// A record with an empty `url` and `description` is a category placeholder:
/// it keeps a category alive before any feed has been added to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRecord {
    pub url: String,
    pub description: String,
    pub category: String,
}

impl FeedRecord {
    pub fn new(url: impl Into<String>, description: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
            category: category.into(),
        }
    }

    pub fn placeholder(category: impl Into<String>) -> Self {
        Self::new("", "", category)
    }

    pub fn is_placeholder(&self) -> bool {
        self.url.is_empty() && self.description.is_empty()
    }
}

/// Feeds grouped under one category, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub name: String,
    pub feeds: Vec<FeedRecord>,
}

/// An article from the currently selected feed. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleEntry {
    pub title: String,
    pub summary: Option<String>,
    pub link: String,
    /// Publication date re-rendered as RFC 2822 from the date feed-rs parsed,
    /// not the feed's raw text. A date feed-rs cannot parse is reported as
    /// `NO_PUBLICATION_DATE` even when the feed carries one.
    pub published: String,
    pub thumbnail_url: Option<String>,
}

impl ArticleEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: None,
            link: "#".to_string(),
            published: NO_PUBLICATION_DATE.to_string(),
            thumbnail_url: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = published.into();
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<ArticleEntry>,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Feed-Reader/1.0".to_string(),
            timeout_seconds: 30,
            max_retries: 1,
            retry_delay_seconds: 2,
            max_feed_size_mb: 10,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("Invalid feed: {0}")]
    MalformedFeed(String),

    #[error("Error fetching feed {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No entry at index {index} (feed has {len} entries)")]
    EntryNotFound { index: usize, len: usize },

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Sentiment error: {0}")]
    Sentiment(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReaderError>;
