//! Fixed-weight SEO score.
//!
//! Every rule is checked on its own, passing rules add their points, and the
//! sum is capped at 100.

use crate::domain::models::{
    EngagementMetrics, KeywordAnalysis, PageReport, ScoreRule, SeoScore,
};

/// Ideal keyword density, percent, inclusive on both ends.
const IDEAL_DENSITY: std::ops::RangeInclusive<f64> = 1.0..=3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    TitlePresent,
    MetaDescriptionPresent,
    HasLinks,
    NoNofollowLinks,
    SubstantialContent,
    KeywordUsed,
    KeywordDensity,
    HasHeadings,
    LowBounceRate,
    LongTimeOnPage,
    ManyPagesPerSession,
    ImagesHaveAlt,
    FastResponse,
}

impl Rule {
    pub const ALL: [Rule; 13] = [
        Rule::TitlePresent,
        Rule::MetaDescriptionPresent,
        Rule::HasLinks,
        Rule::NoNofollowLinks,
        Rule::SubstantialContent,
        Rule::KeywordUsed,
        Rule::KeywordDensity,
        Rule::HasHeadings,
        Rule::LowBounceRate,
        Rule::LongTimeOnPage,
        Rule::ManyPagesPerSession,
        Rule::ImagesHaveAlt,
        Rule::FastResponse,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Rule::TitlePresent => "title_present",
            Rule::MetaDescriptionPresent => "meta_description_present",
            Rule::HasLinks => "has_links",
            Rule::NoNofollowLinks => "no_nofollow_links",
            Rule::SubstantialContent => "substantial_content",
            Rule::KeywordUsed => "keyword_used",
            Rule::KeywordDensity => "keyword_density",
            Rule::HasHeadings => "has_headings",
            Rule::LowBounceRate => "low_bounce_rate",
            Rule::LongTimeOnPage => "long_time_on_page",
            Rule::ManyPagesPerSession => "many_pages_per_session",
            Rule::ImagesHaveAlt => "images_have_alt",
            Rule::FastResponse => "fast_response",
        }
    }

    pub fn points(&self) -> u8 {
        match self {
            Rule::TitlePresent => 5,
            Rule::MetaDescriptionPresent => 10,
            Rule::HasLinks => 10,
            Rule::NoNofollowLinks => 5,
            Rule::SubstantialContent => 10,
            Rule::KeywordUsed => 10,
            Rule::KeywordDensity => 5,
            Rule::HasHeadings => 10,
            Rule::LowBounceRate => 15,
            Rule::LongTimeOnPage => 10,
            Rule::ManyPagesPerSession => 10,
            Rule::ImagesHaveAlt => 5,
            Rule::FastResponse => 5,
        }
    }

    /// Keyword rules never pass without a keyword analysis.
    pub fn passes(
        &self,
        report: &PageReport,
        keyword: Option<&KeywordAnalysis>,
        engagement: &EngagementMetrics,
    ) -> bool {
        match self {
            Rule::TitlePresent => report.title.has_content(),
            Rule::MetaDescriptionPresent => report.meta_description.has_content(),
            Rule::HasLinks => report.links.total_links > 0,
            Rule::NoNofollowLinks => {
                report.links.total_links > 0 && report.links.nofollow_count == 0
            }
            Rule::SubstantialContent => report.word_count.total > 100,
            Rule::KeywordUsed => keyword.is_some_and(|k| k.occurrences > 0),
            Rule::KeywordDensity => keyword.is_some_and(|k| IDEAL_DENSITY.contains(&k.density)),
            Rule::HasHeadings => report.headings.total() > 0,
            Rule::LowBounceRate => engagement.bounce_rate < 50.0,
            Rule::LongTimeOnPage => engagement.time_on_page > 30.0,
            Rule::ManyPagesPerSession => engagement.pages_per_session > 2.0,
            Rule::ImagesHaveAlt => report.images.total > 0 && report.images.no_alt == 0,
            Rule::FastResponse => report.http.response_time < 2.0,
        }
    }
}

/// Scores a report. Deterministic and stateless.
pub fn calculate(
    report: &PageReport,
    keyword: Option<&KeywordAnalysis>,
    engagement: &EngagementMetrics,
) -> SeoScore {
    let breakdown: Vec<ScoreRule> = Rule::ALL
        .iter()
        .map(|rule| ScoreRule {
            rule: rule.key().to_string(),
            points: rule.points(),
            awarded: rule.passes(report, keyword, engagement),
        })
        .collect();

    let total: u32 = breakdown
        .iter()
        .filter(|r| r.awarded)
        .map(|r| u32::from(r.points))
        .sum();
    let value = total.min(u32::from(SeoScore::MAX)) as u8;

    tracing::debug!("Score {} (raw {}) for {}", value, total, report.url);

    SeoScore {
        value,
        band: SeoScore::band_for(value),
        breakdown,
    }
}
