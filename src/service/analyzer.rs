//! Outermost analysis call: fetch, extract, keyword statistics, score.
//!
//! Every failure is resolved here into an `AnalysisOutcome`; nothing is thrown
//! past this point.

use serde::{Deserialize, Serialize};

use super::{keyword, scoring};
use crate::config::AnalyzerConfig;
use crate::domain::models::{EngagementMetrics, KeywordAnalysis, PageReport, SeoScore};
use crate::error::{AppError, Result};
use crate::extractor::PageExtractor;
use crate::io::HttpClient;

pub const SUCCESS_MESSAGE: &str = "Report Generated Successfully";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    pub focus_keyword: Option<String>,
    pub engagement: EngagementMetrics,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            focus_keyword: None,
            engagement: EngagementMetrics::default(),
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.focus_keyword = Some(keyword.into());
        self
    }

    pub fn with_engagement(mut self, engagement: EngagementMetrics) -> Self {
        self.engagement = engagement;
        self
    }

    /// The keyword to analyze, if one was given and is not blank.
    fn keyword(&self) -> Option<&str> {
        self.focus_keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Single success/failure verdict handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub success: bool,
    pub message: String,
    pub report: Option<PageReport>,
    pub keyword_analysis: Option<KeywordAnalysis>,
    pub score: Option<SeoScore>,
}

impl AnalysisOutcome {
    fn failed(error: &AppError) -> Self {
        Self {
            success: false,
            message: format!("Error: {}", error),
            report: None,
            keyword_analysis: None,
            score: None,
        }
    }
}

pub struct SeoAnalyzer {
    client: HttpClient,
}

impl Default for SeoAnalyzer {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

impl SeoAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            client: HttpClient::new(config.user_agent.clone()),
        }
    }

    /// Analyze one page. Always returns an outcome; failures carry a message.
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        tracing::info!("[ANALYZE] Starting analysis: {}", request.url);

        match self.run(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("[ANALYZE] Analysis of {} failed: {}", request.url, e);
                AnalysisOutcome::failed(&e)
            }
        }
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome> {
        request.engagement.validate()?;

        let page = self.client.fetch(&request.url).await?;
        let report = PageExtractor::extract(&page.body, &request.url, page.http);

        let keyword_analysis = request
            .keyword()
            .map(|k| keyword::analyze(&report.page_text, k));
        if keyword_analysis.is_none() {
            tracing::debug!("[ANALYZE] No focus keyword given, skipping keyword analysis");
        }

        let score = scoring::calculate(&report, keyword_analysis.as_ref(), &request.engagement);

        tracing::info!(
            "[ANALYZE] Complete - status: {}, words: {}, score: {} ({})",
            report.http.status,
            report.word_count.total,
            score.value,
            score.band.as_str()
        );

        Ok(AnalysisOutcome {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            report: Some(report),
            keyword_analysis,
            score: Some(score),
        })
    }
}
