//! Language dispatch: file extension -> language -> inspection variant

use crate::AnalysisError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a language is inspected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageVariant {
    /// Parsed into a syntax tree (tree-sitter) and inspected node by node
    Structural,
    /// Inspected as raw text with compiled patterns
    Lexical,
}

/// Supported source languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
}

impl Language {
    pub fn variant(self) -> LanguageVariant {
        match self {
            Language::Python => LanguageVariant::Structural,
            Language::JavaScript => LanguageVariant::Lexical,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Python => write!(f, "Python"),
            Language::JavaScript => write!(f, "JavaScript"),
        }
    }
}

const BUILTIN_EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("js", Language::JavaScript),
    ("mjs", Language::JavaScript),
    ("cjs", Language::JavaScript),
    ("jsx", Language::JavaScript),
];

/// Extension of a filename: the text after the last `.`, or the whole name
/// when there is no `.`. Case is preserved.
pub fn extension_of(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => &filename[idx + 1..],
        None => filename,
    }
}

/// Extension table used to resolve a filename to a language
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    extensions: BTreeMap<String, Language>,
}

impl LanguageRegistry {
    /// Registry with the built-in extensions only
    pub fn new() -> Self {
        let extensions = BUILTIN_EXTENSIONS
            .iter()
            .map(|(ext, lang)| (ext.to_string(), *lang))
            .collect();
        Self { extensions }
    }

    /// Add extra extension mappings. Built-in mappings are kept.
    pub fn with_extensions<'a>(
        mut self,
        extra: impl IntoIterator<Item = (&'a String, &'a Language)>,
    ) -> Self {
        for (ext, lang) in extra {
            let ext = ext.trim_start_matches('.');
            let builtin = BUILTIN_EXTENSIONS.iter().any(|(b, _)| *b == ext);
            if !builtin {
                self.extensions.insert(ext.to_string(), *lang);
            }
        }
        self
    }

    /// Resolve a filename to its language
    pub fn resolve(&self, filename: &str) -> Result<Language, AnalysisError> {
        let ext = extension_of(filename);
        if ext.len() == filename.len() {
            // No `.` at all: the whole name never counts as an extension
            return Err(AnalysisError::UnsupportedLanguage {
                extension: ext.to_string(),
            });
        }
        self.extensions
            .get(ext)
            .copied()
            .ok_or_else(|| AnalysisError::UnsupportedLanguage {
                extension: ext.to_string(),
            })
    }

    /// Whether the file at `path` would be accepted by [`resolve`](Self::resolve)
    pub fn supports(&self, path: &std::path::Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.resolve(name).is_ok())
    }

    pub fn extensions(&self) -> impl Iterator<Item = (&str, Language)> {
        self.extensions.iter().map(|(e, l)| (e.as_str(), *l))
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_resolve_builtin() {
        let registry = LanguageRegistry::new();
        assert_eq!(registry.resolve("app.py").unwrap(), Language::Python);
        assert_eq!(registry.resolve("src/app.js").unwrap(), Language::JavaScript);
        assert_eq!(registry.resolve("x.test.jsx").unwrap(), Language::JavaScript);
        assert_eq!(Language::Python.variant(), LanguageVariant::Structural);
        assert_eq!(Language::JavaScript.variant(), LanguageVariant::Lexical);
    }

    #[test]
    fn test_unsupported_carries_extension() {
        let registry = LanguageRegistry::new();
        assert_eq!(
            registry.resolve("sample.rb"),
            Err(AnalysisError::UnsupportedLanguage {
                extension: "rb".to_string()
            })
        );
    }

    #[test]
    fn test_extension_is_case_sensitive() {
        let registry = LanguageRegistry::new();
        assert!(registry.resolve("MAIN.PY").is_err());
    }

    #[test]
    fn test_no_dot_uses_whole_name() {
        assert_eq!(extension_of("Makefile"), "Makefile");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("trailing."), "");

        let registry = LanguageRegistry::new();
        for name in ["py", "js", "Makefile"] {
            assert_eq!(
                registry.resolve(name),
                Err(AnalysisError::UnsupportedLanguage {
                    extension: name.to_string()
                })
            );
        }
    }

    #[test]
    fn test_extra_extensions_do_not_override_builtin() {
        let mut extra = BTreeMap::new();
        extra.insert(".pyw".to_string(), Language::Python);
        extra.insert("js".to_string(), Language::Python);
        let registry = LanguageRegistry::new().with_extensions(&extra);
        assert_eq!(registry.resolve("tool.pyw").unwrap(), Language::Python);
        assert_eq!(registry.resolve("a.js").unwrap(), Language::JavaScript);
    }

    #[test]
    fn test_supports_path() {
        let registry = LanguageRegistry::new();
        assert!(registry.supports(Path::new("dir/a.py")));
        assert!(!registry.supports(Path::new("dir/README.md")));
        assert!(!registry.supports(Path::new("dir/py")));
    }
}
