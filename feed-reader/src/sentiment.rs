use crate::text::tokenize;
use crate::traits::PolarityScorer;
use crate::types::{ReaderError, Result};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

/// Three-way sentiment, or the reason scoring failed.
#[derive(Debug, Clone, PartialEq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Unavailable(String),
}

impl SentimentLabel {
    pub fn from_polarity(score: f64) -> Self {
        if score > 0.0 {
            Self::Positive
        } else if score < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "Positive"),
            Self::Negative => write!(f, "Negative"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Unavailable(reason) => write!(f, "Error analyzing sentiment: {}", reason),
        }
    }
}

impl Serialize for SentimentLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

const LEXICON: &str = include_str!("../data/sentiment/lexicon.tsv");

// word -> polarity in [-1, 1]
static POLARITY: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    LEXICON
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (word, score) = line.split_once('\t')?;
            Some((word.trim(), score.trim().parse::<f64>().ok()?))
        })
        .collect()
});

// Inflections tried when a word is not in the lexicon itself, e.g. `plunged` -> `plunge`.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ied", "y"),
    ("es", ""),
    ("s", ""),
    ("ed", ""),
    ("ed", "e"),
    ("ing", ""),
    ("ing", "e"),
    ("ly", ""),
];

pub fn lexicon_size() -> usize {
    POLARITY.len()
}

fn word_polarity(token: &str) -> Option<f64> {
    if let Some(&score) = POLARITY.get(token) {
        return Some(score);
    }

    SUFFIX_RULES.iter().find_map(|(suffix, replacement)| {
        let stem = token.strip_suffix(*suffix)?;
        if stem.len() + replacement.len() < 3 {
            return None;
        }
        POLARITY.get(format!("{}{}", stem, replacement).as_str()).copied()
    })
}

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("so", 1.2),
    ("incredibly", 1.5),
    ("highly", 1.3),
    ("quite", 1.1),
];

const NEGATORS: &[&str] = &["not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "without"];

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

fn intensity(token: &str) -> Option<f64> {
    INTENSIFIERS.iter().find(|(word, _)| *word == token).map(|(_, factor)| *factor)
}

/// Averages lexicon polarities over the words that carry one. Words are
/// looked up as written, then with common inflections removed.
///
/// An intensifier right before a word scales it; a negator within the two
/// preceding words flips it and halves its strength.
#[derive(Debug, Default, Clone)]
pub struct LexiconScorer;

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> Result<f64> {
        let tokens = tokenize(text);
        let mut assessed = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(base) = word_polarity(token) else {
                continue;
            };

            let mut score = base;
            if i >= 1 {
                if let Some(factor) = intensity(&tokens[i - 1]) {
                    score *= factor;
                }
            }
            let window = i.saturating_sub(2)..i;
            if tokens[window].iter().any(|t| is_negator(t)) {
                score *= -0.5;
            }
            assessed.push(score.clamp(-1.0, 1.0));
        }

        if assessed.is_empty() {
            return Ok(0.0);
        }
        Ok(assessed.iter().sum::<f64>() / assessed.len() as f64)
    }
}

pub struct SentimentAnalyzer {
    scorer: Arc<dyn PolarityScorer>,
}

impl SentimentAnalyzer {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    /// Label the polarity of `text`. Scoring failures come back as
    /// `SentimentLabel::Unavailable` rather than as an error.
    pub fn classify(&self, text: &str) -> SentimentLabel {
        let score = self.scorer.polarity(text).and_then(|score| {
            if score.is_finite() {
                Ok(score)
            } else {
                Err(ReaderError::Sentiment(format!("non-finite polarity {}", score)))
            }
        });

        match score {
            Ok(score) => {
                debug!("Polarity {:.3}", score);
                SentimentLabel::from_polarity(score)
            }
            Err(e) => {
                warn!("Sentiment scoring failed: {}", e);
                SentimentLabel::Unavailable(e.to_string())
            }
        }
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(LexiconScorer))
    }
}
