//! Category inspectors, one set per language variant

pub mod lexical;
pub mod lines;
pub mod structural;

use crate::Category;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Result of running one category inspector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOutcome {
    /// Normal result. `issues` is never empty: it holds either the violations
    /// found or a single positive confirmation.
    Scored { score: u8, issues: Vec<String> },
    /// The inspector could not run (the source did not parse)
    Degraded { diagnostic: String },
}

impl CategoryOutcome {
    /// Score this outcome contributes, clamped to the category maximum
    pub fn score(&self, category: Category) -> u8 {
        match self {
            CategoryOutcome::Scored { score, .. } => (*score).min(category.max_score()),
            CategoryOutcome::Degraded { .. } => 0,
        }
    }

    /// Issues this outcome contributes to the report
    pub fn issues(&self) -> Vec<String> {
        match self {
            CategoryOutcome::Scored { issues, .. } => issues.clone(),
            CategoryOutcome::Degraded { diagnostic } => vec![diagnostic.clone()],
        }
    }
}

/// Trait for category inspectors. `I` is the prepared source of a language
/// variant ([`PythonSource`](crate::parser::PythonSource) or
/// [`JsSource`](crate::parser::JsSource)).
pub trait Inspector<I: ?Sized>: Send + Sync {
    /// Name of the inspector
    fn name(&self) -> &'static str;

    /// Category the inspector scores
    fn category(&self) -> Category;

    /// Inspect a prepared source
    fn inspect(&self, source: &I) -> CategoryOutcome;
}

/// Running score and issue list for one category, starting from the
/// category maximum.
#[derive(Debug)]
pub struct Tally {
    category: Category,
    score: i32,
    issues: Vec<String>,
}

impl Tally {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            score: category.max_score() as i32,
            issues: Vec::new(),
        }
    }

    /// Subtract `points` and record the issue
    pub fn deduct(&mut self, points: i32, issue: impl Into<String>) {
        self.score -= points;
        self.issues.push(issue.into());
    }

    /// Record an issue without changing the score
    pub fn note(&mut self, issue: impl Into<String>) {
        self.issues.push(issue.into());
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Replace the running score (for ratio-based categories)
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    /// Finish with `praise` as the issue when nothing was recorded
    pub fn finish(mut self, praise: &str) -> CategoryOutcome {
        if self.issues.is_empty() {
            self.issues.push(praise.to_string());
        }
        CategoryOutcome::Scored {
            score: self.score.clamp(0, self.category.max_score() as i32) as u8,
            issues: self.issues,
        }
    }
}

/// Hex SHA-256 of a function body, used to group identical bodies
pub fn body_fingerprint(body: &str) -> String {
    hex::encode(Sha256::digest(body.as_bytes()))
}

/// Number of fingerprints shared by two or more bodies
pub fn duplicate_groups<'b>(bodies: impl IntoIterator<Item = &'b str>) -> usize {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for body in bodies {
        *counts.entry(body_fingerprint(body)).or_default() += 1;
    }
    counts.values().filter(|count| **count > 1).count()
}
