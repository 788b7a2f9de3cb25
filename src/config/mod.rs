//! Configuration loading for codegrade

mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".codegraderc.json";

/// Find and load the config file. Searches `work_dir` then its parents;
/// an explicit `custom_path` must exist.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Some(path)
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            read_config(&path)
        }
        None => Ok(Config::default()),
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    if let Some(threshold) = config.threshold {
        if threshold > 100 {
            anyhow::bail!(
                "Invalid config: {}: threshold must be between 0 and 100, got {}",
                path.display(),
                threshold
            );
        }
    }
    Ok(config)
}

/// Search for .codegraderc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Write a starter config into `dir`. Refuses to overwrite an existing one.
pub fn write_starter_config(dir: &Path, threshold: Option<u8>) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILENAME);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    let config = Config::starter().merge_with_cli(threshold);
    let json = serde_json::to_string_pretty(&config)
        .context("Failed to serialize starter config")?;
    fs::write(&path, json + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Build a GlobSet from ignore patterns for path matching
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build ignore patterns")
}

/// Check if a path should be ignored based on config glob patterns
pub fn is_ignored(path: &Path, ignore_set: &GlobSet) -> bool {
    ignore_set.is_match(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_ignored() {
        let set = build_ignore_set(&["**/node_modules/**".to_string()]).unwrap();
        assert!(is_ignored(Path::new("web/node_modules/lib/index.js"), &set));
        assert!(!is_ignored(Path::new("web/src/index.js"), &set));
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let err = build_ignore_set(&["[".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Invalid ignore pattern"));
    }

    #[test]
    fn test_config_found_in_parent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{ "threshold": 80 }"#).unwrap();
        let nested = dir.path().join("src").join("app");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config(&nested, None).unwrap();
        assert_eq!(config.threshold, Some(80));
    }

    #[test]
    fn test_missing_custom_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path(), Some(Path::new("nope.json"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ threshold: }").unwrap();
        let err = load_config(dir.path(), Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }

    #[test]
    fn test_threshold_out_of_range_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{ "threshold": 150 }"#).unwrap();
        let err = load_config(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("threshold must be between 0 and 100"));

        fs::write(dir.path().join(CONFIG_FILENAME), r#"{ "threshold": 100 }"#).unwrap();
        assert_eq!(load_config(dir.path(), None).unwrap().threshold, Some(100));
    }

    #[test]
    fn test_write_starter_config_once() {
        let dir = TempDir::new().unwrap();
        let path = write_starter_config(dir.path(), None).unwrap();
        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config, Config::starter());
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(write_starter_config(dir.path(), Some(90)).is_err());
    }

    #[test]
    fn test_write_starter_config_with_threshold() {
        let dir = TempDir::new().unwrap();
        write_starter_config(dir.path(), Some(85)).unwrap();
        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.threshold, Some(85));
    }
}
