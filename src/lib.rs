// src/lib.rs

pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod io;
pub mod lifecycle;
pub mod service;
pub mod text;

pub use config::AnalyzerConfig;
pub use domain::models::{EngagementMetrics, KeywordAnalysis, PageReport, SeoScore};
pub use error::{AppError, Result};
pub use service::{AnalysisOutcome, AnalysisRequest, SeoAnalyzer};
