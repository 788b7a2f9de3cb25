//! Config schema and deserialization

use crate::{Language, DEFAULT_MAX_SOURCE_BYTES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root config structure for .codegraderc.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Minimum overall score (exit 1 if any file is below). Default: none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Largest source analyzed, in bytes. Default: 1 MiB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_source_bytes: Option<usize>,

    /// Extra extension -> language mappings, e.g. `{ "pyw": "python" }`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub languages: BTreeMap<String, Language>,

    /// Glob patterns for files/directories to exclude when walking directories
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Config {
    pub fn max_source_bytes(&self) -> usize {
        self.max_source_bytes.unwrap_or(DEFAULT_MAX_SOURCE_BYTES)
    }

    /// Apply command-line overrides (CLI wins over the file)
    pub fn merge_with_cli(mut self, threshold: Option<u8>) -> Self {
        if threshold.is_some() {
            self.threshold = threshold;
        }
        self
    }

    /// Config written by `codegrade init`
    pub fn starter() -> Self {
        Self {
            threshold: Some(70),
            max_source_bytes: None,
            languages: BTreeMap::new(),
            ignore: vec![
                "**/node_modules/**".to_string(),
                "**/venv/**".to_string(),
                "**/.venv/**".to_string(),
                "**/dist/**".to_string(),
                "**/__pycache__/**".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config: Config = serde_json::from_str(
            r#"{
                "threshold": 75,
                "maxSourceBytes": 2048,
                "languages": { "pyw": "python", "es6": "javascript" },
                "ignore": ["**/vendor/**"]
            }"#,
        )
        .unwrap();
        assert_eq!(config.threshold, Some(75));
        assert_eq!(config.max_source_bytes(), 2048);
        assert_eq!(config.languages.get("pyw"), Some(&Language::Python));
        assert_eq!(config.languages.get("es6"), Some(&Language::JavaScript));
        assert_eq!(config.ignore, vec!["**/vendor/**"]);
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_source_bytes(), DEFAULT_MAX_SOURCE_BYTES);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{ "treshold": 70 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_language_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{ "languages": { "rb": "ruby" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_threshold_wins() {
        let config = Config {
            threshold: Some(60),
            ..Config::default()
        };
        assert_eq!(config.clone().merge_with_cli(Some(90)).threshold, Some(90));
        assert_eq!(config.merge_with_cli(None).threshold, Some(60));
    }

    #[test]
    fn test_starter_round_trips() {
        let json = serde_json::to_string_pretty(&Config::starter()).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Config::starter());
    }
}
