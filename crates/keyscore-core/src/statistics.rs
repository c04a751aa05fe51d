//! Aggregate statistics over a batch of scored responses.

use serde::{Deserialize, Serialize};

use crate::model::ScoreResult;

/// Summary of a grading batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradingSummary {
    /// Number of responses graded.
    pub response_count: usize,
    /// Mean total score.
    pub mean_total: f64,
    /// Median total score.
    pub median_total: f64,
    /// Lowest total score.
    pub min_total: u64,
    /// Highest total score.
    pub max_total: u64,
    /// Mean of `total / max_possible`.
    pub mean_ratio: f64,
    /// Fraction of responses in which each keyword group scored, by group index.
    pub group_hit_rates: Vec<f64>,
}

/// Compute summary statistics for scored responses.
///
/// All results are expected to come from the same config; the group hit
/// rates are sized by the widest result.
pub fn compute_summary<'a, I>(results: I) -> GradingSummary
where
    I: IntoIterator<Item = &'a ScoreResult>,
{
    let results: Vec<&ScoreResult> = results.into_iter().collect();
    if results.is_empty() {
        return GradingSummary::default();
    }

    let n = results.len();
    let mut totals: Vec<u64> = results.iter().map(|r| r.total).collect();
    totals.sort_unstable();

    let sum: u64 = totals.iter().sum();
    let median_total = if n % 2 == 0 {
        (totals[n / 2 - 1] + totals[n / 2]) as f64 / 2.0
    } else {
        totals[n / 2] as f64
    };

    let group_count = results.iter().map(|r| r.groups.len()).max().unwrap_or(0);
    let mut hits = vec![0usize; group_count];
    for result in &results {
        for outcome in result.matched_groups() {
            if let Some(slot) = hits.get_mut(outcome.index) {
                *slot += 1;
            }
        }
    }

    GradingSummary {
        response_count: n,
        mean_total: sum as f64 / n as f64,
        median_total,
        min_total: totals[0],
        max_total: totals[n - 1],
        mean_ratio: results.iter().map(|r| r.ratio()).sum::<f64>() / n as f64,
        group_hit_rates: hits.into_iter().map(|h| h as f64 / n as f64).collect(),
    }
}
