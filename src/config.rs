//! Analyzer settings, loadable from a JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::models::EngagementMetrics;
use crate::io::DEFAULT_USER_AGENT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub user_agent: String,
    /// Used when the caller does not pass engagement metrics.
    pub engagement: EngagementMetrics,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            engagement: EngagementMetrics::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse analyzer config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&raw)?;
        config
            .engagement
            .validate()
            .with_context(|| format!("Invalid engagement defaults in {}", path.display()))?;
        Ok(config)
    }
}
