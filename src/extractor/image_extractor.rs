use scraper::{Html, Selector};
use std::sync::OnceLock;

use crate::domain::models::{ImageEntry, ImagesSummary};

/// Collects every `<img>`; an absent and an empty attribute count the same.
pub fn extract_images(document: &Html) -> ImagesSummary {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("img").expect("static selector"));

    let mut summary = ImagesSummary::default();
    for img in document.select(selector) {
        let src = img.value().attr("src").unwrap_or_default();
        let alt = img.value().attr("alt").unwrap_or_default();

        summary.total += 1;
        if src.is_empty() {
            summary.no_src += 1;
        }
        if alt.is_empty() {
            summary.no_alt += 1;
        }
        summary.images.push(ImageEntry {
            src: src.to_string(),
            alt: alt.to_string(),
        });
    }

    tracing::debug!(
        "Found {} images ({} without src, {} without alt)",
        summary.total,
        summary.no_src,
        summary.no_alt
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_image_alt_and_src() {
        let html = r#"<body>
            <img src="a.jpg" alt="desc">
            <img src="b.jpg">
            <img src="c.jpg" alt="">
            <img alt="no source">
        </body>"#;
        let images = extract_images(&Html::parse_document(html));

        assert_eq!(images.total, 4);
        assert_eq!(images.no_src, 1);
        assert_eq!(images.no_alt, 2);
        assert_eq!(
            images.images[0],
            ImageEntry {
                src: "a.jpg".to_string(),
                alt: "desc".to_string()
            }
        );
        assert_eq!(images.images[1].alt, "");
        assert_eq!(images.images[3].src, "");
        assert_eq!(images.images[3].alt, "no source");
    }

    #[test]
    fn test_no_images() {
        let images = extract_images(&Html::parse_document("<p>text only</p>"));
        assert_eq!(images, ImagesSummary::default());
    }
}
