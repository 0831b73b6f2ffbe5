use crate::keywords::KeywordExtractor;
use crate::sanitizer::strip_images;
use crate::sentiment::{SentimentAnalyzer, SentimentLabel};
use crate::text::title_case;
use crate::traits::Translator;
use crate::translator::{translate_field, FieldTranslation};
use crate::types::{ArticleEntry, NO_CONTENT, NO_TITLE};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// A fully analysed article, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedDocument {
    pub title: String,
    pub translated_title: Option<String>,
    pub content: String,
    pub translated_content: Option<String>,
    pub published: String,
    pub keywords: Vec<String>,
    pub sentiment: SentimentLabel,
    pub thumbnail_url: Option<String>,
    pub link: String,
}

impl AnalyzedDocument {
    pub fn is_dual_language(&self) -> bool {
        self.translated_title.is_some() && self.translated_content.is_some()
    }

    pub fn render_html(&self) -> String {
        let mut html = format!("<h1>{}</h1>", title_case(&self.title));
        if let Some(translated_title) = &self.translated_title {
            html.push_str(&format!("<h1>{}</h1>", title_case(translated_title)));
        }
        html.push_str(&format!("<p><strong>Published:</strong> {}</p>", self.published));
        html.push_str(&format!("<p><strong>Keywords:</strong> {}</p>", self.keywords.join(", ")));
        html.push_str(&format!("<p><strong>Sentiment:</strong> {}</p>", self.sentiment));
        html.push_str(&format!("<p>{}</p>", self.content));
        if let Some(translated_content) = &self.translated_content {
            html.push_str(&format!("<p>{}</p>", translated_content));
        }

        if let Some(thumbnail) = &self.thumbnail_url {
            html.push_str(&format!(
                "<p><img src=\"{}\" alt=\"Thumbnail\" style=\"max-width:100%;\"></p>",
                thumbnail
            ));
        }
        html.push_str(&format!("<p><a href=\"{}\">Read more</a></p>", self.link));
        html
    }
}

/// Runs sanitising, translation, sentiment and keyword extraction over an entry.
pub struct DocumentComposer {
    translator: Arc<dyn Translator>,
    sentiment: SentimentAnalyzer,
    keywords: KeywordExtractor,
    target_locale: String,
}

impl DocumentComposer {
    pub fn new(translator: Arc<dyn Translator>, target_locale: impl Into<String>) -> Self {
        Self {
            translator,
            sentiment: SentimentAnalyzer::default(),
            keywords: KeywordExtractor::new(),
            target_locale: target_locale.into(),
        }
    }

    pub fn with_sentiment(mut self, sentiment: SentimentAnalyzer) -> Self {
        self.sentiment = sentiment;
        self
    }

    pub fn target_locale(&self) -> &str {
        &self.target_locale
    }

    pub async fn compose(&self, entry: &ArticleEntry) -> AnalyzedDocument {
        let raw_content = entry.summary.as_deref().unwrap_or(NO_CONTENT);
        let content = strip_images(raw_content);

        let title = non_empty_or(entry.title.trim(), NO_TITLE);
        let content = non_empty_or(content.trim(), NO_CONTENT);

        // Each field is attempted regardless of how the other one went
        let title_translation = translate_field(self.translator.as_ref(), "title", &title, &self.target_locale).await;
        let content_translation =
            translate_field(self.translator.as_ref(), "content", &content, &self.target_locale).await;

        let sentiment = self.sentiment.classify(&content);

        let keywords = if content == NO_CONTENT {
            self.keywords.extract(&title)
        } else {
            self.keywords.extract(&content)
        };

        let (translated_title, translated_content) =
            select_translations(&title, &content, title_translation, content_translation);

        debug!("Composed {:?}: keywords {:?}, sentiment {}", title, keywords, sentiment);
        info!(
            "Composed document for {} ({})",
            entry.link,
            if translated_title.is_some() { "dual-language" } else { "single-language" }
        );

        AnalyzedDocument {
            title,
            translated_title,
            content,
            translated_content,
            published: entry.published.clone(),
            keywords,
            sentiment,
            thumbnail_url: entry.thumbnail_url.clone(),
            link: entry.link.clone(),
        }
    }
}

/// Both translations are dropped as soon as either one reads the same as
/// its source. A failed field is compared through its placeholder text.
fn select_translations(
    title: &str,
    content: &str,
    title_translation: FieldTranslation,
    content_translation: FieldTranslation,
) -> (Option<String>, Option<String>) {
    if title_translation.text() == title || content_translation.text() == content {
        return (None, None);
    }
    (
        Some(title_translation.text().to_string()),
        Some(content_translation.text().to_string()),
    )
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
