//! Text normalization shared by downstream text processing.

use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("static tag pattern"))
}

fn digit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("static digit pattern"))
}

/// Strips markup tags, digits and ASCII punctuation, then lowercases.
///
/// Whitespace is left untouched so token boundaries survive.
pub fn clean_text(text: &str) -> String {
    let without_tags = tag_pattern().replace_all(text, "");
    let without_digits = digit_pattern().replace_all(&without_tags, "");
    without_digits
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .to_lowercase()
}
