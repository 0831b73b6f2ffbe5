//! Small text helpers shared by the analysis stages.

use regex::Regex;
use std::sync::LazyLock;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>|&[#a-zA-Z0-9]+;").expect("markup pattern is valid"));

/// Replace tags and character entities with spaces.
pub fn strip_markup(html: &str) -> String {
    MARKUP.replace_all(html, " ").into_owned()
}

// Contractions split off the word they attach to, as in `apple's` -> `apple` + `'s`.
const CLITICS: &[&str] = &["'s", "'m", "'d", "'re", "'ve", "'ll"];

/// Lowercased word tokens of `text`, markup removed.
///
/// Hyphenated words stay whole (`well-known`) and are rejected later by the
/// alphanumeric filter. Trailing clitics are split into their own token, so
/// `apple's` yields `apple` and `'s`, and `don't` yields `do` and `n't`.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = strip_markup(text).to_lowercase().replace('\u{2019}', "'");
    let mut tokens = Vec::new();

    for word in normalized.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-')) {
        let word = word.trim_matches(|c: char| c == '\'' || c == '-');
        if word.is_empty() {
            continue;
        }

        match split_clitic(word) {
            Some((stem, clitic)) => {
                tokens.push(stem.to_string());
                tokens.push(clitic.to_string());
            }
            None => tokens.push(word.to_string()),
        }
    }

    tokens
}

fn split_clitic(word: &str) -> Option<(&str, &str)> {
    let at = if word.ends_with("n't") {
        word.len() - 3
    } else {
        let clitic = CLITICS.iter().find(|clitic| word.ends_with(**clitic))?;
        word.len() - clitic.len()
    };

    (at > 0).then(|| word.split_at(at))
}

pub fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}

/// Capitalise the first letter of every run of letters and lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_cased = true;
        } else {
            out.push(c);
            previous_cased = false;
        }
    }

    out
}
