use scraper::{Html, Selector};
use std::sync::OnceLock;

use crate::domain::models::{
    Hreflang, MetaDescriptionInfo, MetadataInfo, TextTagInfo, TitleInfo, UNKNOWN_CHARSET,
};

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("static selector"))
}

pub fn extract_title(document: &Html) -> TitleInfo {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let title = document
        .select(selector(&SELECTOR, "title"))
        .next()
        .map(|el| el.text().collect::<String>());
    TextTagInfo::from_text(title.as_deref())
}

pub fn extract_meta_description(document: &Html) -> MetaDescriptionInfo {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let description = document
        .select(selector(&SELECTOR, "meta[name='description' i]"))
        .next()
        .map(|el| el.value().attr("content").unwrap_or_default());
    TextTagInfo::from_text(description)
}

/// Content attribute of the first `<meta name=...>` with the given name.
fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
}

fn link_href(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|s| s.trim().to_string())
}

/// `<meta charset>` first, then the charset parameter of an http-equiv content type.
fn extract_charset(document: &Html) -> String {
    static CHARSET: OnceLock<Selector> = OnceLock::new();
    static HTTP_EQUIV: OnceLock<Selector> = OnceLock::new();

    let declared = document
        .select(selector(&CHARSET, "meta[charset]"))
        .next()
        .and_then(|el| el.value().attr("charset"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    declared
        .or_else(|| {
            document
                .select(selector(&HTTP_EQUIV, "meta[http-equiv='content-type' i]"))
                .next()
                .and_then(|el| el.value().attr("content"))
                .and_then(charset_param)
        })
        .unwrap_or_else(|| UNKNOWN_CHARSET.to_string())
}

/// Pulls `utf-8` out of `text/html; charset=utf-8`.
fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}

fn extract_hreflangs(document: &Html) -> Vec<Hreflang> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    document
        .select(selector(&SELECTOR, "link[rel~='alternate' i][hreflang]"))
        .filter_map(|el| {
            let lang = el.value().attr("hreflang")?.trim().to_string();
            let href = el.value().attr("href").unwrap_or_default().trim().to_string();
            Some(Hreflang { lang, href })
        })
        .collect()
}

pub fn extract_metadata(document: &Html) -> MetadataInfo {
    static CANONICAL: OnceLock<Selector> = OnceLock::new();
    static FAVICON: OnceLock<Selector> = OnceLock::new();
    static VIEWPORT: OnceLock<Selector> = OnceLock::new();
    static KEYWORDS: OnceLock<Selector> = OnceLock::new();
    static ROBOTS: OnceLock<Selector> = OnceLock::new();
    static SITE_NAME: OnceLock<Selector> = OnceLock::new();
    static SITE_IMAGE: OnceLock<Selector> = OnceLock::new();

    MetadataInfo {
        charset: extract_charset(document),
        canonical: link_href(document, selector(&CANONICAL, "link[rel~='canonical' i]")),
        favicon: link_href(document, selector(&FAVICON, "link[rel~='icon' i]")),
        viewport: meta_content(document, selector(&VIEWPORT, "meta[name='viewport' i]")),
        keywords: meta_content(document, selector(&KEYWORDS, "meta[name='keywords' i]")),
        robots: meta_content(document, selector(&ROBOTS, "meta[name='robots' i]")),
        site_name: meta_content(
            document,
            selector(&SITE_NAME, "meta[property='og:site_name' i]"),
        ),
        site_image: meta_content(document, selector(&SITE_IMAGE, "meta[property='og:image' i]")),
        hreflangs: extract_hreflangs(document),
        ..MetadataInfo::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Found, NOT_FOUND_TEXT};

    #[test]
    fn test_title_found_and_trimmed() {
        let doc = Html::parse_document("<html><head><title>  Hi  </title></head></html>");
        let title = extract_title(&doc);
        assert_eq!(title.found, Found::Found);
        assert_eq!(title.data, "Hi");
        assert_eq!(title.length, 2);
        assert_eq!(title.words, 1);
        assert_eq!(title.chars_per_word, 2.0);
        assert_eq!(title.tag_count, 1);
    }

    #[test]
    fn test_missing_title() {
        let doc = Html::parse_document("<html><head></head><body><p>text</p></body></html>");
        let title = extract_title(&doc);
        assert_eq!(title.found, Found::NotFound);
        assert_eq!(title.data, NOT_FOUND_TEXT);
        assert_eq!(title.length, 0);
    }

    #[test]
    fn test_title_decodes_entities() {
        let doc = Html::parse_document("<title>Fish &amp; Chips</title>");
        assert_eq!(extract_title(&doc).data, "Fish & Chips");
    }

    #[test]
    fn test_meta_description() {
        let doc = Html::parse_document(
            r#"<head><meta name="Description" content=" Fast page analysis for everyone "></head>"#,
        );
        let meta = extract_meta_description(&doc);
        assert_eq!(meta.found, Found::Found);
        assert_eq!(meta.data, "Fast page analysis for everyone");
        assert_eq!(meta.words, 5);
        assert_eq!(meta.length, 31);
    }

    #[test]
    fn test_meta_description_without_content_is_empty() {
        let doc = Html::parse_document(r#"<head><meta name="description"></head>"#);
        let meta = extract_meta_description(&doc);
        assert_eq!(meta.found, Found::Found);
        assert_eq!(meta.length, 0);
        assert!(!meta.has_content());
    }

    #[test]
    fn test_metadata_all_present() {
        let html = r#"<html><head>
            <meta charset="utf-8">
            <link rel="canonical" href="https://example.com/page">
            <link rel="shortcut icon" href="/favicon.ico">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <meta name="keywords" content="rust, seo">
            <meta name="robots" content="index, follow">
            <meta property="og:site_name" content="Example">
            <meta property="og:image" content="https://example.com/og.png">
            <link rel="alternate" hreflang="de" href="https://example.com/de/">
            <link rel="alternate" hreflang="fr" href="https://example.com/fr/">
        </head></html>"#;
        let meta = extract_metadata(&Html::parse_document(html));

        assert_eq!(meta.charset, "utf-8");
        assert_eq!(meta.canonical.as_deref(), Some("https://example.com/page"));
        assert_eq!(meta.favicon.as_deref(), Some("/favicon.ico"));
        assert_eq!(
            meta.viewport.as_deref(),
            Some("width=device-width, initial-scale=1")
        );
        assert_eq!(meta.keywords.as_deref(), Some("rust, seo"));
        assert_eq!(meta.robots.as_deref(), Some("index, follow"));
        assert_eq!(meta.site_name.as_deref(), Some("Example"));
        assert_eq!(meta.site_image.as_deref(), Some("https://example.com/og.png"));
        assert_eq!(meta.content_type, "website");
        assert_eq!(meta.hreflangs.len(), 2);
        assert_eq!(meta.hreflangs[0].lang, "de");
        assert_eq!(meta.hreflangs[1].href, "https://example.com/fr/");
    }

    #[test]
    fn test_metadata_absent_defaults() {
        let meta = extract_metadata(&Html::parse_document("<p>bare</p>"));
        assert_eq!(meta, MetadataInfo::default());
        assert_eq!(meta.charset, UNKNOWN_CHARSET);
    }

    #[test]
    fn test_charset_from_http_equiv() {
        let html = r#"<head><meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1"></head>"#;
        let meta = extract_metadata(&Html::parse_document(html));
        assert_eq!(meta.charset, "ISO-8859-1");
    }

    #[test]
    fn test_charset_param_parsing() {
        assert_eq!(charset_param("text/html; charset=\"utf-8\"").as_deref(), Some("utf-8"));
        assert_eq!(charset_param("text/html"), None);
        assert_eq!(charset_param("text/html; charset="), None);
    }
}
