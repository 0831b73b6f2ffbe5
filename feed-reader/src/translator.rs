use crate::traits::Translator;
use crate::types::{ReaderError, Result, TRANSLATION_UNAVAILABLE};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
pub const MAX_TRANSLATION_CHARS: usize = 5000;

/// Outcome of translating one field of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum FieldTranslation {
    Translated(String),
    Failed(String),
}

impl FieldTranslation {
    /// The translated text, or the placeholder when translation failed.
    pub fn text(&self) -> &str {
        match self {
            Self::Translated(text) => text,
            Self::Failed(_) => TRANSLATION_UNAVAILABLE,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Translate a single field. Errors never escape; they become `Failed`.
pub async fn translate_field(translator: &dyn Translator, field: &str, text: &str, target_locale: &str) -> FieldTranslation {
    match translator.translate(text, target_locale).await {
        Ok(translated) => FieldTranslation::Translated(translated),
        Err(e) => {
            warn!("Translation error ({}): {}", field, e);
            FieldTranslation::Failed(e.to_string())
        }
    }
}

/// Client for the public Google Translate `translate_a/single` endpoint.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn request_url(&self, text: &str, target_locale: &str) -> Result<Url> {
        let url = Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_locale),
                ("dt", "t"),
                ("q", text),
            ],
        )?;
        Ok(url)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn translator_name(&self) -> String {
        "Google Translate".to_string()
    }

    async fn translate(&self, text: &str, target_locale: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let chars = text.chars().count();
        if chars > MAX_TRANSLATION_CHARS {
            return Err(ReaderError::Translation(format!(
                "text is {} characters, limit is {}",
                chars, MAX_TRANSLATION_CHARS
            )));
        }

        debug!("Translating {} characters to {}", chars, target_locale);

        let response = self.client.get(self.request_url(text, target_locale)?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReaderError::Translation(format!("translation service returned HTTP {}", status)));
        }

        let body: serde_json::Value = response.json().await?;
        parse_translation_response(&body)
    }
}

/// Join the translated segments of a `translate_a/single` response
/// (`[[["translated", "source", ...], ...], ...]`).
pub fn parse_translation_response(body: &serde_json::Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| ReaderError::Translation("unexpected response shape".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|s| s.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(ReaderError::Translation("empty translation".to_string()));
    }
    Ok(translated)
}
