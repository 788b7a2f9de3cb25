//! Analyzer module - source quality analysis engine

pub mod engine;
pub mod inspectors;
pub mod scoring;

pub use engine::AnalysisEngine;
pub use inspectors::{CategoryOutcome, Inspector};
pub use scoring::ScoreCalculator;
