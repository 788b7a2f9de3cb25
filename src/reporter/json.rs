//! JSON reporter for machine-readable output

use super::FileReport;
use crate::AnalysisReport;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// One report as a JSON object
    pub fn report(&self, report: &AnalysisReport) -> String {
        self.render(report, "{}")
    }

    /// Several reports as an array of `{ "file", "report" }` objects
    pub fn report_many(&self, results: &[FileReport]) -> String {
        self.render(results, "[]")
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Metric};
    use serde_json::Value;
    use std::path::PathBuf;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            overall_score: 30,
            metrics: Category::ALL
                .iter()
                .map(|c| Metric {
                    category: *c,
                    score: 5,
                })
                .collect(),
            issues: vec!["Good formatting and indentation!".to_string()],
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_report_shape() {
        let json = JsonReporter::new().report(&sample_report());
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["overall_score"], 30);
        assert_eq!(value["metrics"][0]["name"], "Naming Conventions");
        assert_eq!(value["metrics"][5]["name"], "Best Practices");
        assert_eq!(value["metrics"][2]["score"], 5);
        assert_eq!(value["issues"][0], "Good formatting and indentation!");
        assert!(value.get("diagnostics").is_none());
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_report_many_pretty() {
        let results = vec![FileReport {
            file: PathBuf::from("src/app.py"),
            report: sample_report(),
        }];
        let json = JsonReporter::new().pretty().report_many(&results);
        assert!(json.contains('\n'));
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["file"], "src/app.py");
        assert_eq!(value[0]["report"]["overall_score"], 30);
    }
}
