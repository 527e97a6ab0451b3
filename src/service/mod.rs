pub mod analyzer;
pub mod keyword;
pub mod scoring;

pub use analyzer::{AnalysisOutcome, AnalysisRequest, SeoAnalyzer};
