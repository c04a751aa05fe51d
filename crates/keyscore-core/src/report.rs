//! Grading report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{ScoreResult, ScoringConfig};
use crate::statistics::{compute_summary, GradingSummary};

/// A complete grading report for a batch of responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the config responses were graded against.
    pub config: ConfigSummary,
    /// Individual response scores.
    pub responses: Vec<ResponseScore>,
    /// Aggregate statistics.
    pub summary: GradingSummary,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a scoring config (without the alternatives).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSummary {
    /// Where the config was loaded from.
    pub source: String,
    pub group_count: usize,
    pub max_possible: u64,
}

impl ConfigSummary {
    pub fn new(source: impl Into<String>, config: &ScoringConfig) -> Self {
        Self {
            source: source.into(),
            group_count: config.groups.len(),
            max_possible: config.max_possible(),
        }
    }
}

/// The score of one named response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseScore {
    /// Response name, usually its file stem.
    pub name: String,
    pub result: ScoreResult,
}

impl GradingReport {
    /// Build a report, computing the summary from the response scores.
    pub fn new(config: ConfigSummary, responses: Vec<ResponseScore>, duration_ms: u64) -> Self {
        let summary = compute_summary(responses.iter().map(|r| &r.result));
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            config,
            responses,
            summary,
            duration_ms,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradingReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Config:** `{}` ({} groups, {} points max)\n\n",
            self.config.source, self.config.group_count, self.config.max_possible
        ));
        md.push_str(&format!(
            "**Summary:** {} responses, mean {:.1}, median {:.1}, range {}-{}\n\n",
            self.summary.response_count,
            self.summary.mean_total,
            self.summary.median_total,
            self.summary.min_total,
            self.summary.max_total
        ));

        if !self.responses.is_empty() {
            md.push_str("### Responses\n\n");
            md.push_str("| Response | Score | Percent | Groups matched |\n");
            md.push_str("|----------|-------|---------|----------------|\n");
            for r in &self.responses {
                md.push_str(&format!(
                    "| {} | {}/{} | {:.1}% | {} |\n",
                    r.name,
                    r.result.total,
                    r.result.max_possible,
                    r.result.ratio() * 100.0,
                    r.result.matched_groups().count()
                ));
            }
            md.push('\n');
        }

        if !self.summary.group_hit_rates.is_empty() {
            md.push_str("### Keyword groups\n\n");
            md.push_str("| Group | Hit rate |\n");
            md.push_str("|-------|----------|\n");
            for (index, rate) in self.summary.group_hit_rates.iter().enumerate() {
                md.push_str(&format!("| {} | {:.1}% |\n", index + 1, rate * 100.0));
            }
        }

        md
    }
}
