use crate::types::Result;
use async_trait::async_trait;

/// Something that can hand back the raw bytes of a feed document.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Retrieve the document at `url`.
    async fn fetch_document(&self, url: &str) -> Result<Vec<u8>>;
}

/// Remote machine translation, one call per text.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable name of the backend
    fn translator_name(&self) -> String;

    /// Translate `text` into `target_locale`, detecting the source language.
    async fn translate(&self, text: &str, target_locale: &str) -> Result<String>;
}

/// Computes a polarity score in `[-1.0, 1.0]` for a piece of text.
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> Result<f64>;
}
