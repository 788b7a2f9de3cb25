//! Reduction of per-category outcomes into one report

use super::inspectors::CategoryOutcome;
use crate::{AnalysisReport, Category, Metric};

/// Builds the final report from category outcomes
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Sum scores and concatenate issues, keeping the order of `outcomes`.
    /// Degraded categories score 0 and also land in `diagnostics`.
    pub fn build_report(outcomes: Vec<(Category, CategoryOutcome)>) -> AnalysisReport {
        let mut metrics = Vec::with_capacity(outcomes.len());
        let mut issues = Vec::new();
        let mut diagnostics = Vec::new();

        for (category, outcome) in outcomes {
            metrics.push(Metric {
                category,
                score: outcome.score(category),
            });
            if let CategoryOutcome::Degraded { diagnostic } = &outcome {
                diagnostics.push(format!("{}: {}", category.display_name(), diagnostic));
            }
            issues.extend(outcome.issues());
        }

        let overall_score = metrics
            .iter()
            .map(|m| m.score as u32)
            .sum::<u32>()
            .min(100) as u8;

        AnalysisReport {
            overall_score,
            metrics,
            issues,
            diagnostics,
        }
    }
}
