//! Console reporter with colored output

use super::{FileReport, Summary};
use crate::{AnalysisReport, Grade, Metric};
use colored::{ColoredString, Colorize};
use std::path::Path;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Print a full report for one file
    pub fn report(&self, file: &Path, report: &AnalysisReport) {
        print!("{}", self.render(file, report));
    }

    /// Print every report followed by a summary
    pub fn report_many(&self, results: &[FileReport], threshold: Option<u8>) {
        for result in results {
            self.report(&result.file, &result.report);
            println!("{}", "─".repeat(60));
        }
        print!("{}", self.render_summary(&Summary::of(results, threshold)));
    }

    /// Print one line per file: path, score and grade
    pub fn report_quiet(&self, file: &Path, report: &AnalysisReport) {
        println!("{}", self.render_quiet(file, report));
    }

    pub fn render_quiet(&self, file: &Path, report: &AnalysisReport) -> String {
        format!(
            "{}: {} ({})",
            file.display(),
            report.overall_score,
            self.colorize_grade(report.grade())
        )
    }

    pub fn render(&self, file: &Path, report: &AnalysisReport) -> String {
        let mut out = String::new();
        out.push('\n');
        out.push_str(&format!(
            "{}\n\n",
            self.bold(&format!("Code Quality Analysis: {}", file.display()))
        ));
        out.push_str(&format!(
            "   Score: {} {}\n\n",
            self.create_score_bar(report.overall_score),
            self.bold(&self.colorize_grade(report.grade()).to_string())
        ));

        out.push_str(&format!("   {}\n", self.bold("Score Breakdown:")));
        for metric in &report.metrics {
            out.push_str(&format!("   {}\n", self.render_metric(metric)));
        }
        out.push('\n');

        out.push_str(&format!("   {}\n", self.bold("Issues:")));
        for issue in &report.issues {
            out.push_str(&format!("   {} {}\n", self.arrow(), issue));
        }

        if !report.diagnostics.is_empty() {
            out.push('\n');
            out.push_str(&format!("   {}\n", self.bold("Diagnostics:")));
            for diagnostic in &report.diagnostics {
                let line = format!("   ! {}", diagnostic);
                if self.use_colors {
                    out.push_str(&format!("{}\n", line.yellow()));
                } else {
                    out.push_str(&format!("{}\n", line));
                }
            }
        }
        out.push('\n');
        out
    }

    pub fn render_summary(&self, summary: &Summary) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "═".repeat(60)));
        out.push_str(&format!("{}\n", self.bold("Summary")));
        out.push_str(&format!("{}\n", "═".repeat(60)));
        out.push_str(&format!("   Files analyzed: {}\n", summary.files_analyzed));
        out.push_str(&format!(
            "   Average score:  {} ({})\n",
            summary.average_score,
            self.colorize_grade(Grade::from_score(summary.average_score))
        ));
        if summary.below_threshold > 0 {
            out.push_str(&format!(
                "   Below threshold: {}\n",
                summary.below_threshold
            ));
        }
        out
    }

    fn render_metric(&self, metric: &Metric) -> String {
        let max = metric.max_score();
        let bar = self.create_mini_bar(metric.score, max);
        let score_str = format!("{:>2}/{:<2}", metric.score, max);
        let score_str = if !self.use_colors {
            score_str
        } else if metric.score as u32 * 100 >= max as u32 * 80 {
            score_str.green().to_string()
        } else if metric.score as u32 * 100 >= max as u32 * 50 {
            score_str.yellow().to_string()
        } else {
            score_str.red().to_string()
        };
        format!("{} {} {}", bar, score_str, metric.category)
    }

    fn colorize_grade(&self, grade: Grade) -> ColoredString {
        let text = grade.to_string();
        if !self.use_colors {
            return text.normal();
        }
        match grade {
            Grade::A => text.green(),
            Grade::B => text.bright_green(),
            Grade::C => text.yellow(),
            Grade::D => text.bright_red(),
            Grade::F => text.red(),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn arrow(&self) -> String {
        if self.use_colors {
            "→".cyan().to_string()
        } else {
            "→".to_string()
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score.min(100) as usize * 20) / 100;
        let empty = 20 - filled;
        let bar = format!("[{}{}] {:>3}%", "█".repeat(filled), "░".repeat(empty), score);

        if !self.use_colors {
            bar
        } else if score >= 80 {
            bar.green().to_string()
        } else if score >= 60 {
            bar.yellow().to_string()
        } else {
            bar.red().to_string()
        }
    }

    fn create_mini_bar(&self, score: u8, max: u8) -> String {
        let filled = (score.min(max) as usize * 10) / max.max(1) as usize;
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            overall_score: 85,
            metrics: Category::ALL
                .iter()
                .map(|c| Metric {
                    category: *c,
                    score: c.max_score(),
                })
                .collect(),
            issues: vec!["Avoid using 'var'. Use 'let' or 'const' instead for better scoping.".to_string()],
            diagnostics: vec!["Naming Conventions: Syntax error".to_string()],
        }
    }

    #[test]
    fn test_render_plain() {
        let reporter = ConsoleReporter::new().without_colors();
        let out = reporter.render(Path::new("app.js"), &sample_report());
        assert!(out.contains("Code Quality Analysis: app.js"));
        assert!(out.contains("[█████████████████░░░]  85%"));
        assert!(out.contains("[▓▓▓▓▓▓▓▓▓▓] 20/20 Function Modularity"));
        assert!(out.contains("→ Avoid using 'var'"));
        assert!(out.contains("! Naming Conventions: Syntax error"));
    }

    #[test]
    fn test_render_quiet() {
        let reporter = ConsoleReporter::new().without_colors();
        assert_eq!(
            reporter.render_quiet(Path::new("app.js"), &sample_report()),
            "app.js: 85 (B)"
        );
    }

    #[test]
    fn test_mini_bar_bounds() {
        let reporter = ConsoleReporter::new().without_colors();
        assert_eq!(reporter.create_mini_bar(0, 15), "[░░░░░░░░░░]");
        assert_eq!(reporter.create_mini_bar(15, 15), "[▓▓▓▓▓▓▓▓▓▓]");
    }
}
