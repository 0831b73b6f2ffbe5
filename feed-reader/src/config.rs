use crate::translator::DEFAULT_TRANSLATE_ENDPOINT;
use crate::types::FetchConfig;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_STORE: &str = "feed_urls.txt";
pub const DEFAULT_TARGET_LOCALE: &str = "id";

#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub store_path: PathBuf,
    pub target_locale: String,
    pub translate_endpoint: String,
    pub fetch: FetchConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE),
            target_locale: DEFAULT_TARGET_LOCALE.to_string(),
            translate_endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

impl ReaderConfig {
    /// Defaults overridden by `FEED_READER_STORE`, `FEED_READER_TARGET_LANG`
    /// and `FEED_READER_TRANSLATE_URL`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            store_path: env::var("FEED_READER_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            target_locale: env::var("FEED_READER_TARGET_LANG").unwrap_or(defaults.target_locale),
            translate_endpoint: env::var("FEED_READER_TRANSLATE_URL").unwrap_or(defaults.translate_endpoint),
            fetch: defaults.fetch,
        }
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_target_locale(mut self, locale: impl Into<String>) -> Self {
        self.target_locale = locale.into();
        self
    }
}
