use scraper::{Html, Selector};
use std::sync::OnceLock;

use crate::domain::models::HeadingsSummary;

fn level_selector(level: u8) -> &'static Selector {
    static SELECTORS: OnceLock<Vec<Selector>> = OnceLock::new();
    let selectors = SELECTORS.get_or_init(|| {
        (1..=6)
            .map(|level| Selector::parse(&format!("h{}", level)).expect("static selector"))
            .collect()
    });
    &selectors[usize::from(level - 1)]
}

/// Pure function: given a parsed document, collect headings per level.
///
/// Each level is walked on its own, so an `h2` can never land in the `h1` list.
/// Empty headings are kept; they still count as headings.
pub fn extract_headings(document: &Html) -> HeadingsSummary {
    let mut summary = HeadingsSummary::default();

    for level in 1..=6u8 {
        let texts: Vec<String> = document
            .select(level_selector(level))
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect();

        tracing::debug!("Found {} h{} headings", texts.len(), level);
        if let Some(bucket) = summary.level_mut(level) {
            *bucket = texts;
        }
    }

    summary
}
