use crate::types::{ArticleEntry, ParsedFeed, ReaderError, Result, NO_PUBLICATION_DATE, NO_TITLE};
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use feed_rs::parser;
use tracing::debug;

#[derive(Debug, Default)]
pub struct FeedParser;

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse an RSS or Atom document. Anything feed-rs refuses is a malformed feed.
    pub fn parse_feed(&self, content: &[u8]) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content).map_err(|e| ReaderError::MalformedFeed(e.to_string()))?;

        let title = feed
            .title
            .map(|t| t.content.trim().to_string())
            .filter(|t| !t.is_empty());

        let entries = feed.entries.into_iter().map(|entry| self.parse_entry(entry)).collect();

        Ok(ParsedFeed { title, entries })
    }

    fn parse_entry(&self, entry: Entry) -> ArticleEntry {
        let title = entry
            .title
            .as_ref()
            .map(|t| t.content.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());

        // Summary first, full content body as a fallback
        let summary = entry
            .summary
            .as_ref()
            .map(|s| s.content.clone())
            .or_else(|| entry.content.as_ref().and_then(|c| c.body.clone()));

        let published = entry
            .published
            .or(entry.updated)
            .map(format_date)
            .unwrap_or_else(|| NO_PUBLICATION_DATE.to_string());

        ArticleEntry {
            title,
            summary,
            link: select_link(&entry),
            published,
            thumbnail_url: select_thumbnail(&entry),
        }
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc2822()
}

/// media thumbnail, then media content, then an enclosure link.
fn select_thumbnail(entry: &Entry) -> Option<String> {
    let thumbnail = entry
        .media
        .iter()
        .flat_map(|media| media.thumbnails.iter())
        .map(|thumb| thumb.image.uri.trim())
        .find(|uri| !uri.is_empty());
    if let Some(uri) = thumbnail {
        return Some(uri.to_string());
    }

    let content = entry
        .media
        .iter()
        .flat_map(|media| media.content.iter())
        .find_map(|content| content.url.as_ref().map(|u| u.to_string()));
    if content.is_some() {
        return content;
    }

    entry
        .links
        .iter()
        .filter(|link| {
            link.rel
                .as_deref()
                .map(|rel| rel.eq_ignore_ascii_case("enclosure"))
                .unwrap_or(false)
        })
        .map(|link| link.href.trim())
        .find(|href| !href.is_empty())
        .map(|href| href.to_string())
}

fn select_link(entry: &Entry) -> String {
    let alternate = entry.links.iter().find(|link| {
        let rel = link.rel.as_deref().unwrap_or("");
        !link.href.trim().is_empty() && (rel.is_empty() || rel.eq_ignore_ascii_case("alternate"))
    });

    alternate
        .or_else(|| entry.links.iter().find(|link| !link.href.trim().is_empty()))
        .map(|link| link.href.trim().to_string())
        .unwrap_or_else(|| "#".to_string())
}
