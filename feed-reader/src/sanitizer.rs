use regex::Regex;
use std::sync::LazyLock;

// An unterminated `<img` at the end of the fragment counts as an image too.
static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img[^>]*(?:>|$)").expect("image tag pattern is valid"));

/// Remove every `<img ...>` element from an HTML fragment, leaving the rest
/// of the markup untouched.
///
/// Removal repeats until nothing matches, since deleting one tag can splice
/// together a new one (`<<img>img src=x>`). The result therefore never
/// contains `<img` and stripping it again is a no-op.
pub fn strip_images(html: &str) -> String {
    let mut current = html.to_string();
    while IMG_TAG.is_match(&current) {
        current = IMG_TAG.replace_all(&current, "").into_owned();
    }
    current
}
