//! Report entities produced by a single page analysis.
//!
//! Everything here is plain data: built once per analysis, serialized for the
//! display layer, then dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AppError, Result};

/// Text stored in place of a missing title or meta description.
pub const NOT_FOUND_TEXT: &str = "Not found";

/// Charset reported when the document declares none.
pub const UNKNOWN_CHARSET: &str = "Unknown";

/// Rounds to two decimal places, the precision every report ratio uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator`, or `0.0` when there is nothing to divide by.
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

// ====== Enums ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Found {
    #[serde(rename = "Found")]
    Found,
    #[serde(rename = "Not Found")]
    NotFound,
}

impl Found {
    pub fn from_present(present: bool) -> Self {
        if present {
            Found::Found
        } else {
            Found::NotFound
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Found::Found)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordTail {
    #[serde(rename = "Short Tail")]
    ShortTail,
    #[serde(rename = "Long Tail")]
    LongTail,
}

/// Colour band the display layer paints the score gauge with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Red,
    Yellow,
    Green,
}

impl ScoreBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Red => "red",
            ScoreBand::Yellow => "yellow",
            ScoreBand::Green => "green",
        }
    }
}

// ====== HTTP ======

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentSize {
    pub bytes: u64,
    pub kb: f64,
}

impl ContentSize {
    pub fn from_bytes(bytes: u64) -> Self {
        Self {
            bytes,
            kb: round2(bytes as f64 / 1024.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpInfo {
    pub status: u16,
    pub using_https: bool,
    pub content_size: ContentSize,
    pub headers: BTreeMap<String, String>,
    pub redirected: bool,
    /// Seconds until the response head arrived.
    pub response_time: f64,
    pub final_url: String,
}

// ====== Page elements ======

/// Shared shape of the title and meta description entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextTagInfo {
    pub found: Found,
    pub data: String,
    pub length: usize,
    pub words: usize,
    pub chars_per_word: f64,
    pub tag_count: u8,
}

impl TextTagInfo {
    /// Builds the entry for an element whose text may be absent.
    pub fn from_text(text: Option<&str>) -> Self {
        match text {
            Some(raw) => {
                let data = raw.trim().to_string();
                let length = data.chars().count();
                let words = data.split_whitespace().count();
                Self {
                    found: Found::Found,
                    chars_per_word: round2(ratio(length, words)),
                    data,
                    length,
                    words,
                    tag_count: 1,
                }
            }
            None => Self {
                found: Found::NotFound,
                data: NOT_FOUND_TEXT.to_string(),
                length: 0,
                words: 0,
                chars_per_word: 0.0,
                tag_count: 0,
            },
        }
    }

    pub fn has_content(&self) -> bool {
        self.found.is_found() && self.length > 0
    }
}

pub type TitleInfo = TextTagInfo;
pub type MetaDescriptionInfo = TextTagInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hreflang {
    pub lang: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataInfo {
    pub charset: String,
    pub canonical: Option<String>,
    pub favicon: Option<String>,
    pub viewport: Option<String>,
    pub keywords: Option<String>,
    pub robots: Option<String>,
    pub content_type: String,
    pub site_name: Option<String>,
    pub site_image: Option<String>,
    pub hreflangs: Vec<Hreflang>,
}

impl Default for MetadataInfo {
    fn default() -> Self {
        Self {
            charset: UNKNOWN_CHARSET.to_string(),
            canonical: None,
            favicon: None,
            viewport: None,
            keywords: None,
            robots: None,
            content_type: "website".to_string(),
            site_name: None,
            site_image: None,
            hreflangs: Vec::new(),
        }
    }
}

/// Heading texts per level, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HeadingsSummary {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl HeadingsSummary {
    pub fn level(&self, level: u8) -> &[String] {
        match level {
            1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            4 => &self.h4,
            5 => &self.h5,
            6 => &self.h6,
            _ => &[],
        }
    }

    pub fn level_mut(&mut self, level: u8) -> Option<&mut Vec<String>> {
        match level {
            1 => Some(&mut self.h1),
            2 => Some(&mut self.h2),
            3 => Some(&mut self.h3),
            4 => Some(&mut self.h4),
            5 => Some(&mut self.h5),
            6 => Some(&mut self.h6),
            _ => None,
        }
    }

    pub fn count(&self, level: u8) -> usize {
        self.level(level).len()
    }

    pub fn total(&self) -> usize {
        (1..=6).map(|level| self.count(level)).sum()
    }
}

// Counts travel next to the content lists so consumers never recount.
impl Serialize for HeadingsSummary {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(12))?;
        for level in 1..=6u8 {
            map.serialize_entry(&format!("h{}_count", level), &self.count(level))?;
            map.serialize_entry(&format!("h{}", level), self.level(level))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCountInfo {
    pub total: usize,
    pub corrected_word_count: usize,
    /// Number of anchor elements on the page, not the words inside them.
    pub anchor_text_words: usize,
    pub anchor_percentage: f64,
}

impl WordCountInfo {
    pub fn new(total: usize, anchors: usize) -> Self {
        Self {
            total,
            corrected_word_count: total,
            anchor_text_words: anchors,
            // Anchors can outnumber words when links wrap images.
            anchor_percentage: round2((ratio(anchors, total) * 100.0).min(100.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksSummary {
    pub total_links: usize,
    pub external_links: usize,
    pub internal_links: usize,
    pub nofollow_count: usize,
    pub links: Vec<LinkEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesSummary {
    pub total: usize,
    pub no_src: usize,
    pub no_alt: usize,
    pub images: Vec<ImageEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    pub url: String,
    pub http: HttpInfo,
    pub title: TitleInfo,
    pub meta_description: MetaDescriptionInfo,
    pub metadata: MetadataInfo,
    pub headings: HeadingsSummary,
    pub word_count: WordCountInfo,
    pub links: LinksSummary,
    pub images: ImagesSummary,
    pub page_text: String,
}

// ====== Keyword ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub keyword: String,
    pub occurrences: usize,
    pub positions: Vec<usize>,
    pub keyword_length: usize,
    pub chars_per_word: f64,
    pub density: f64,
    pub frequency: f64,
    pub tail: KeywordTail,
}

// ====== Engagement ======

/// Visitor metrics supplied by the caller; nothing here is measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    /// Percent of single-page visits, 0-100.
    pub bounce_rate: f64,
    /// Seconds.
    pub time_on_page: f64,
    pub pages_per_session: f64,
}

impl Default for EngagementMetrics {
    fn default() -> Self {
        Self {
            bounce_rate: 50.0,
            time_on_page: 30.0,
            pages_per_session: 2.0,
        }
    }
}

impl EngagementMetrics {
    pub fn validate(&self) -> Result<()> {
        if !self.bounce_rate.is_finite() || !(0.0..=100.0).contains(&self.bounce_rate) {
            return Err(AppError::invalid_input(format!(
                "bounce rate must be between 0 and 100, got {}",
                self.bounce_rate
            )));
        }
        if !self.time_on_page.is_finite() || self.time_on_page < 0.0 {
            return Err(AppError::invalid_input(format!(
                "time on page must be zero or more seconds, got {}",
                self.time_on_page
            )));
        }
        if !self.pages_per_session.is_finite() || self.pages_per_session < 1.0 {
            return Err(AppError::invalid_input(format!(
                "pages per session must be at least 1, got {}",
                self.pages_per_session
            )));
        }
        Ok(())
    }
}

// ====== Score ======

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRule {
    pub rule: String,
    pub points: u8,
    pub awarded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoScore {
    pub value: u8,
    pub band: ScoreBand,
    pub breakdown: Vec<ScoreRule>,
}

impl SeoScore {
    pub const MAX: u8 = 100;

    pub fn band_for(value: u8) -> ScoreBand {
        match value {
            0..=49 => ScoreBand::Red,
            50..=74 => ScoreBand::Yellow,
            _ => ScoreBand::Green,
        }
    }
}
