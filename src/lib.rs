//! Codegrade: source file quality grader
//!
//! This library scores a single Python or JavaScript source file against six
//! fixed categories (naming, modularity, documentation, formatting,
//! reusability, best practices) and returns a numeric breakdown together with
//! human-readable issues.

pub mod analyzer;
pub mod config;
pub mod language;
pub mod parser;
pub mod reporter;

pub use language::{Language, LanguageRegistry, LanguageVariant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cap on the size of a single analyzed source (1 MiB)
pub const DEFAULT_MAX_SOURCE_BYTES: usize = 1024 * 1024;

/// Errors that abort a whole analysis call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The filename's extension is not mapped to any supported language
    #[error("Unsupported language: {extension}")]
    UnsupportedLanguage { extension: String },
    /// The source exceeds the configured size cap
    #[error("Source is too large to analyze ({size} bytes, limit is {limit} bytes)")]
    SourceTooLarge { size: usize, limit: usize },
    /// The file content could not be decoded as UTF-8 text.
    /// Raised by callers that read raw bytes, never by [`analyze`] itself.
    #[error("{filename} is not valid UTF-8 text")]
    Encoding { filename: String },
}

/// One of the six scoring dimensions, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Naming Conventions")]
    Naming,
    #[serde(rename = "Function Modularity")]
    Modularity,
    #[serde(rename = "Comments & Docstrings")]
    Documentation,
    #[serde(rename = "Formatting & Indentation")]
    Formatting,
    #[serde(rename = "Reusability (DRY)")]
    Reusability,
    #[serde(rename = "Best Practices")]
    BestPractices,
}

impl Category {
    /// All categories in the fixed report order
    pub const ALL: [Category; 6] = [
        Category::Naming,
        Category::Modularity,
        Category::Documentation,
        Category::Formatting,
        Category::Reusability,
        Category::BestPractices,
    ];

    /// Maximum score of the category. The six maxima sum to 100.
    pub fn max_score(self) -> u8 {
        match self {
            Category::Naming => 10,
            Category::Modularity => 20,
            Category::Documentation => 20,
            Category::Formatting => 15,
            Category::Reusability => 15,
            Category::BestPractices => 20,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Naming => "Naming Conventions",
            Category::Modularity => "Function Modularity",
            Category::Documentation => "Comments & Docstrings",
            Category::Formatting => "Formatting & Indentation",
            Category::Reusability => "Reusability (DRY)",
            Category::BestPractices => "Best Practices",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Score of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Category this metric belongs to (serialized as its display name)
    #[serde(rename = "name")]
    pub category: Category,
    /// Score, always within `0..=category.max_score()`
    pub score: u8,
}

impl Metric {
    pub fn max_score(&self) -> u8 {
        self.category.max_score()
    }
}

/// The result of analyzing one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Sum of the six metric scores (0-100)
    pub overall_score: u8,
    /// One metric per category, in [`Category::ALL`] order
    pub metrics: Vec<Metric>,
    /// All issues, grouped in category order
    pub issues: Vec<String>,
    /// Parse failures that degraded one or more categories
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

impl AnalysisReport {
    pub fn grade(&self) -> Grade {
        Grade::from_score(self.overall_score)
    }

    pub fn metric(&self, category: Category) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.category == category)
    }
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=100 => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// A source file handed to the engine: name, text and resolved language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    filename: String,
    text: String,
    language: Language,
}

impl SourceUnit {
    pub fn new(filename: impl Into<String>, text: impl Into<String>, language: Language) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            language,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn variant(&self) -> LanguageVariant {
        self.language.variant()
    }
}

/// Public API: analyze one source file with the default engine.
///
/// * `filename` - only its extension is used, to pick the language
/// * `source` - the already decoded file content
pub fn analyze(filename: &str, source: &str) -> Result<AnalysisReport, AnalysisError> {
    analyzer::AnalysisEngine::new().analyze(filename, source)
}
