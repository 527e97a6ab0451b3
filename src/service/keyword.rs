//! Focus keyword statistics over the visible page text.

use std::collections::HashSet;

use crate::domain::models::{ratio, KeywordAnalysis, KeywordTail};

/// Counts exact, case-insensitive token matches of `keyword` in `page_text`.
///
/// Tokens are whitespace separated, so a keyword made of several words is
/// compared against single tokens and never matches. The tail classification
/// still reports it as long tail.
pub fn analyze(page_text: &str, keyword: &str) -> KeywordAnalysis {
    let keyword = keyword.trim().to_lowercase();
    let tokens: Vec<String> = page_text
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    let positions: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| **token == keyword)
        .map(|(idx, _)| idx + 1)
        .collect();
    let occurrences = positions.len();

    let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    let keyword_words = keyword.split_whitespace().count();
    let keyword_length = keyword.chars().count();

    let tail = if keyword_words == 1 {
        KeywordTail::ShortTail
    } else {
        KeywordTail::LongTail
    };

    tracing::debug!(
        "Keyword '{}' found {} times in {} tokens",
        keyword,
        occurrences,
        tokens.len()
    );

    KeywordAnalysis {
        occurrences,
        positions,
        keyword_length,
        chars_per_word: ratio(keyword_length, keyword_words),
        density: ratio(occurrences, tokens.len()) * 100.0,
        frequency: ratio(occurrences, distinct.len()),
        tail,
        keyword,
    }
}
