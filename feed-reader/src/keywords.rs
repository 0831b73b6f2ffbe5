use crate::text::{is_alphanumeric, tokenize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const ENGLISH: &str = include_str!("../data/stopwords/english.txt");
const INDONESIAN: &str = include_str!("../data/stopwords/indonesian.txt");
const NORWEGIAN: &str = include_str!("../data/stopwords/norwegian.txt");

pub const MAX_KEYWORDS: usize = 3;

/// English, Indonesian and Norwegian stopwords, merged once per process.
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [ENGLISH, INDONESIAN, NORWEGIAN]
        .into_iter()
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .collect()
});

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

pub fn stopword_count() -> usize {
    STOPWORDS.len()
}

/// Frequency-ranked keyword extraction.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    limit: usize,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self { limit: MAX_KEYWORDS }
    }

    /// The most frequent non-stopword tokens, at most three. Ties keep the
    /// order in which the tokens first appeared.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();

        for token in tokenize(text) {
            if !is_alphanumeric(&token) || is_stopword(&token) {
                continue;
            }
            let count = counts.entry(token.clone()).or_insert(0);
            if *count == 0 {
                first_seen.push(token);
            }
            *count += 1;
        }

        // sort_by is stable, so equal counts stay in first-seen order
        first_seen.sort_by(|a, b| counts[b].cmp(&counts[a]));
        first_seen.truncate(self.limit);
        first_seen
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}
