use scraper::{Html, Selector};
use std::sync::OnceLock;

use crate::domain::models::{LinkEntry, LinksSummary};

fn anchor_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("a").expect("static selector"))
}

/// Classification is by prefix: `http` is external, `/` is internal.
/// Protocol-relative `//host` is checked before `/` and counts as neither, even
/// though a bare prefix match would call it internal. `mailto:`, `#frag` and
/// bare relative paths are neither as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    External,
    Internal,
    Other,
}

impl LinkKind {
    pub fn classify(href: &str) -> Self {
        if href.starts_with("http") {
            LinkKind::External
        } else if href.starts_with("//") {
            LinkKind::Other
        } else if href.starts_with('/') {
            LinkKind::Internal
        } else {
            LinkKind::Other
        }
    }
}

fn is_nofollow(rel: Option<&str>) -> bool {
    rel.map(|r| {
        r.split_whitespace()
            .any(|token| token.eq_ignore_ascii_case("nofollow"))
    })
    .unwrap_or(false)
}

/// Number of `<a>` elements, with or without an href.
pub fn count_anchors(document: &Html) -> usize {
    document.select(anchor_selector()).count()
}

pub fn extract_links(document: &Html) -> LinksSummary {
    let mut summary = LinksSummary::default();

    for element in document.select(anchor_selector()) {
        summary.total_links += 1;

        if is_nofollow(element.value().attr("rel")) {
            summary.nofollow_count += 1;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match LinkKind::classify(href) {
            LinkKind::External => summary.external_links += 1,
            LinkKind::Internal => summary.internal_links += 1,
            LinkKind::Other => {}
        }

        summary.links.push(LinkEntry {
            href: href.to_string(),
        });
    }

    tracing::debug!(
        "Found {} links ({} external, {} internal, {} nofollow)",
        summary.total_links,
        summary.external_links,
        summary.internal_links,
        summary.nofollow_count
    );
    summary
}
