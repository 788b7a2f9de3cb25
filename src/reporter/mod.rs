//! Reporter module for output formatting

pub mod console;
pub mod json;

pub use console::ConsoleReporter;
pub use json::JsonReporter;

use crate::AnalysisReport;
use serde::Serialize;
use std::path::PathBuf;

/// Report of one analyzed file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub report: AnalysisReport,
}

/// Totals over a batch of analyzed files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub files_analyzed: usize,
    pub average_score: u8,
    pub below_threshold: usize,
}

impl Summary {
    pub fn of(results: &[FileReport], threshold: Option<u8>) -> Self {
        let files_analyzed = results.len();
        let total: usize = results
            .iter()
            .map(|r| r.report.overall_score as usize)
            .sum();
        let average_score = if files_analyzed == 0 {
            0
        } else {
            (total as f64 / files_analyzed as f64).round() as u8
        };
        let below_threshold = threshold
            .map(|t| {
                results
                    .iter()
                    .filter(|r| r.report.overall_score < t)
                    .count()
            })
            .unwrap_or(0);
        Self {
            files_analyzed,
            average_score,
            below_threshold,
        }
    }
}
