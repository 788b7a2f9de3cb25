//! Analysis engine - resolves the language and runs the six inspectors

use super::inspectors::{lexical, structural, CategoryOutcome, Inspector};
use super::ScoreCalculator;
use crate::config::Config;
use crate::parser::{JsSource, PythonSource};
use crate::{
    AnalysisError, AnalysisReport, Category, LanguageRegistry, LanguageVariant, SourceUnit,
    DEFAULT_MAX_SOURCE_BYTES,
};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Main analysis engine. Holds no per-call state, so one engine can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    registry: LanguageRegistry,
    max_source_bytes: usize,
}

impl AnalysisEngine {
    /// Engine with the built-in languages and the default size cap
    pub fn new() -> Self {
        Self {
            registry: LanguageRegistry::new(),
            max_source_bytes: DEFAULT_MAX_SOURCE_BYTES,
        }
    }

    /// Engine configured from a config file
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_registry(LanguageRegistry::new().with_extensions(&config.languages))
            .with_max_source_bytes(config.max_source_bytes())
    }

    pub fn with_registry(mut self, registry: LanguageRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the largest source accepted, in bytes
    pub fn with_max_source_bytes(mut self, limit: usize) -> Self {
        self.max_source_bytes = limit;
        self
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Analyze already decoded source text. Only the extension of
    /// `filename` is used.
    pub fn analyze(&self, filename: &str, source: &str) -> Result<AnalysisReport, AnalysisError> {
        let language = self.registry.resolve(filename)?;
        if source.len() > self.max_source_bytes {
            return Err(AnalysisError::SourceTooLarge {
                size: source.len(),
                limit: self.max_source_bytes,
            });
        }

        let unit = SourceUnit::new(filename, source, language);
        let report = self.run(&unit);
        debug!(
            file = unit.filename(),
            language = %unit.language(),
            score = report.overall_score,
            "analyzed"
        );
        Ok(report)
    }

    /// Read, decode and analyze a file
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisReport> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        let text = String::from_utf8(bytes).map_err(|_| AnalysisError::Encoding {
            filename: path.display().to_string(),
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(self.analyze(&filename, &text)?)
    }

    fn run(&self, unit: &SourceUnit) -> AnalysisReport {
        let outcomes = match unit.variant() {
            LanguageVariant::Structural => {
                let source = PythonSource::parse(unit.text());
                run_inspectors(&structural::inspectors(), &source, unit.filename())
            }
            LanguageVariant::Lexical => {
                let source = JsSource::prepare(unit.text());
                run_inspectors(&lexical::inspectors(), &source, unit.filename())
            }
        };
        ScoreCalculator::build_report(outcomes)
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn run_inspectors<I>(
    inspectors: &[Box<dyn Inspector<I>>],
    source: &I,
    filename: &str,
) -> Vec<(Category, CategoryOutcome)> {
    inspectors
        .iter()
        .map(|inspector| {
            let outcome = inspector.inspect(source);
            if let CategoryOutcome::Degraded { diagnostic } = &outcome {
                warn!(
                    file = filename,
                    inspector = inspector.name(),
                    %diagnostic,
                    "category degraded"
                );
            }
            (inspector.category(), outcome)
        })
        .collect()
}
