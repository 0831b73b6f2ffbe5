use crate::composer::{AnalyzedDocument, DocumentComposer};
use crate::config::ReaderConfig;
use crate::fetcher::FeedFetcher;
use crate::registry::FeedRegistry;
use crate::translator::GoogleTranslator;
use crate::types::{ArticleEntry, FeedRecord, ReaderError, Result, NO_TITLE};
use std::sync::Arc;
use tracing::{error, info};
use url::Url;

/// The state a reader front end works against: the subscription registry,
/// the entries of the selected feed and the document being shown.
pub struct ReaderSession {
    registry: FeedRegistry,
    fetcher: FeedFetcher,
    composer: DocumentComposer,
    entries: Vec<ArticleEntry>,
    document: Option<AnalyzedDocument>,
}

impl ReaderSession {
    pub fn new(registry: FeedRegistry, fetcher: FeedFetcher, composer: DocumentComposer) -> Self {
        Self {
            registry,
            fetcher,
            composer,
            entries: Vec::new(),
            document: None,
        }
    }

    /// Load the registry and wire up the HTTP fetcher and Google translator.
    pub fn open(config: &ReaderConfig) -> Result<Self> {
        let registry = FeedRegistry::open(&config.store_path)?;
        let fetcher = FeedFetcher::http(config.fetch.clone())?;
        let translator = GoogleTranslator::new(&config.translate_endpoint, config.fetch.timeout_seconds)?;
        let composer = DocumentComposer::new(Arc::new(translator), &config.target_locale);

        Ok(Self::new(registry, fetcher, composer))
    }

    pub fn registry(&self) -> &FeedRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FeedRegistry {
        &mut self.registry
    }

    pub fn entries(&self) -> &[ArticleEntry] {
        &self.entries
    }

    pub fn titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }

    pub fn document(&self) -> Option<&AnalyzedDocument> {
        self.document.as_ref()
    }

    /// Validate a feed by fetching it, then file it under `category` using the
    /// feed's own title as description.
    pub async fn subscribe(&mut self, url: &str, category: &str) -> Result<FeedRecord> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ReaderError::InvalidInput("The URL cannot be empty.".to_string()));
        }
        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ReaderError::InvalidInput(format!("Unsupported URL scheme: {}", parsed.scheme())));
        }

        let feed = self.fetcher.fetch(url).await?;
        let description = feed.title.unwrap_or_else(|| NO_TITLE.to_string());

        self.registry.add_feed(url, &description, category)?;
        info!("Subscribed to {} as {:?}", url, description);

        Ok(FeedRecord::new(url, description, category))
    }

    /// Show the entries of the feed at `url`. The previous entries and
    /// document are cleared first, so a failure leaves an empty view.
    pub async fn select_feed(&mut self, url: &str) -> Result<&[ArticleEntry]> {
        self.entries.clear();
        self.document = None;

        match self.fetcher.fetch(url).await {
            Ok(feed) => {
                self.entries = feed.entries;
                Ok(&self.entries)
            }
            Err(e) => {
                error!("Error fetching feed {}: {}", url, e);
                Err(e)
            }
        }
    }

    pub async fn select_article(&mut self, index: usize) -> Result<&AnalyzedDocument> {
        let entry = self.entries.get(index).ok_or(ReaderError::EntryNotFound {
            index,
            len: self.entries.len(),
        })?;

        let document = self.composer.compose(entry).await;
        Ok(self.document.insert(document))
    }
}
