use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use scraper::{Html, Node};
use std::sync::OnceLock;

use super::{general_extractor, heading_extractor, image_extractor, url_extractor};
use crate::domain::models::{HttpInfo, PageReport, WordCountInfo};

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// How far into the body a `<meta charset>` declaration is looked for.
const CHARSET_SNIFF_LIMIT: usize = 4096;

pub struct PageExtractor;

impl PageExtractor {
    /// Builds the full report from fetched bytes. Never fails: anything missing
    /// from the page shows up as a not-found state in the report.
    pub fn extract(raw: &[u8], request_url: &str, http: HttpInfo) -> PageReport {
        let html = Self::decode_body(raw);
        let document = Html::parse_document(&html);

        let page_text = Self::extract_visible_text(&document);
        let total_words = page_text.split_whitespace().count();
        let anchors = url_extractor::count_anchors(&document);

        let report = PageReport {
            url: request_url.to_string(),
            http,
            title: general_extractor::extract_title(&document),
            meta_description: general_extractor::extract_meta_description(&document),
            metadata: general_extractor::extract_metadata(&document),
            headings: heading_extractor::extract_headings(&document),
            word_count: WordCountInfo::new(total_words, anchors),
            links: url_extractor::extract_links(&document),
            images: image_extractor::extract_images(&document),
            page_text,
        };

        tracing::debug!(
            "Extracted report for {}: {} words, {} headings, {} links, {} images",
            report.url,
            report.word_count.total,
            report.headings.total(),
            report.links.total_links,
            report.images.total
        );
        report
    }

    /// UTF-8 (BOM aware) unless the bytes are not UTF-8 and the page declares
    /// another encoding.
    pub fn decode_body(raw: &[u8]) -> String {
        let (text, _, had_errors) = UTF_8.decode(raw);
        if had_errors {
            if let Some(encoding) = Self::declared_encoding(raw).filter(|e| *e != UTF_8) {
                tracing::debug!("Decoding body as declared {}", encoding.name());
                let (text, _, _) = encoding.decode(raw);
                return text.into_owned();
            }
        }
        text.into_owned()
    }

    fn declared_encoding(raw: &[u8]) -> Option<&'static Encoding> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([a-z0-9_\-:.]+)"#)
                .expect("static charset pattern")
        });

        let head = &raw[..raw.len().min(CHARSET_SNIFF_LIMIT)];
        let label = pattern.captures(head)?.get(1)?;
        Encoding::for_label(label.as_bytes())
    }

    /// Text nodes outside script/style blocks, joined with single spaces.
    pub fn extract_visible_text(document: &Html) -> String {
        let mut parts: Vec<&str> = Vec::new();

        for node in document.root_element().descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|el| HIDDEN_ELEMENTS.contains(&el.name()))
                    .unwrap_or(false)
            });
            if hidden {
                continue;
            }

            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }

        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ContentSize, Found};
    use std::collections::BTreeMap;

    fn http(status: u16) -> HttpInfo {
        HttpInfo {
            status,
            using_https: true,
            content_size: ContentSize::from_bytes(0),
            headers: BTreeMap::new(),
            redirected: false,
            response_time: 0.1,
            final_url: "https://example.com/".to_string(),
        }
    }

    const SAMPLE: &str = r#"<html><head><title>Hi</title></head><body><h1>Welcome</h1><p>test test test</p><a href="/about">About</a></body></html>"#;

    #[test]
    fn test_sample_page_report() {
        let report = PageExtractor::extract(SAMPLE.as_bytes(), "https://example.com/", http(200));

        assert_eq!(report.title.found, Found::Found);
        assert_eq!(report.title.length, 2);
        assert_eq!(report.headings.count(1), 1);
        assert_eq!(report.page_text, "Hi Welcome test test test About");
        assert_eq!(report.word_count.total, 6);
        assert_eq!(report.word_count.anchor_text_words, 1);
        assert_eq!(report.word_count.anchor_percentage, 16.67);
        assert_eq!(report.links.total_links, 1);
        assert_eq!(report.links.internal_links, 1);
        assert_eq!(report.links.external_links, 0);
        assert_eq!(report.meta_description.found, Found::NotFound);
        assert_eq!(report.images.total, 0);
        assert_eq!(report.url, "https://example.com/");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = PageExtractor::extract(SAMPLE.as_bytes(), "https://example.com/", http(200));
        let second = PageExtractor::extract(SAMPLE.as_bytes(), "https://example.com/", http(200));
        assert_eq!(first, second);
    }

    #[test]
    fn test_error_status_still_extracts() {
        let body = b"<html><head><title>404 Not Found</title></head><body><h1>Not Found</h1></body></html>";
        let report = PageExtractor::extract(body, "https://example.com/gone", http(404));
        assert_eq!(report.http.status, 404);
        assert_eq!(report.title.data, "404 Not Found");
        assert_eq!(report.headings.count(1), 1);
    }

    #[test]
    fn test_empty_body_has_no_division_errors() {
        let report = PageExtractor::extract(b"", "https://example.com/", http(200));
        assert_eq!(report.word_count.total, 0);
        assert_eq!(report.word_count.anchor_percentage, 0.0);
        assert_eq!(report.title.found, Found::NotFound);
        assert_eq!(report.headings.total(), 0);
        assert!(report.page_text.is_empty());
    }

    #[test]
    fn test_image_links_keep_anchor_percentage_within_bounds() {
        let body = br#"<html><body><p>Gallery</p>
<a href="/a"><img src="a.png" alt="a"></a>
<a href="/b"><img src="b.png" alt="b"></a>
<a href="/c"><img src="c.png" alt="c"></a>
</body></html>"#;
        let report = PageExtractor::extract(body, "https://example.com/", http(200));

        assert_eq!(report.word_count.total, 1);
        assert_eq!(report.word_count.anchor_text_words, 3);
        assert!(report.word_count.anchor_percentage <= 100.0);
        assert_eq!(report.word_count.anchor_percentage, 100.0);
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let body = b"<html><body><h1>Open heading<p>para <a href='/x'>link<img src=a.png><div>unclosed";
        let report = PageExtractor::extract(body, "https://example.com/", http(200));
        assert_eq!(report.headings.count(1), 1);
        assert_eq!(report.links.internal_links, 1);
        assert_eq!(report.images.total, 1);
        assert_eq!(report.images.no_alt, 1);
    }

    #[test]
    fn test_visible_text_skips_scripts_and_styles() {
        let html = r#"<html><head><style>body { color: red }</style>
            <script>var hidden = "secret";</script></head>
            <body><p>Shown</p><noscript>enable js</noscript><!-- comment --></body></html>"#;
        let doc = Html::parse_document(html);
        assert_eq!(PageExtractor::extract_visible_text(&doc), "Shown");
    }

    #[test]
    fn test_decode_declared_latin1() {
        let mut body = b"<html><head><meta charset=\"iso-8859-1\"><title>Caf".to_vec();
        body.push(0xE9);
        body.extend_from_slice(b"</title></head></html>");

        let decoded = PageExtractor::decode_body(&body);
        assert!(decoded.contains("Café"));
    }

    #[test]
    fn test_decode_utf8_with_bom() {
        let mut body = vec![0xEF, 0xBB, 0xBF];
        body.extend_from_slice("<title>Grüße</title>".as_bytes());
        assert_eq!(PageExtractor::decode_body(&body), "<title>Grüße</title>");
    }
}
