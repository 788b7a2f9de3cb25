use crate::analyzer::inspectors::{CategoryOutcome, Inspector, Tally};
use crate::parser::{global_patterns, PythonSource};
use crate::Category;

/// Security and operational heuristics over the raw text. Runs whether or
/// not the source parses.
pub struct BestPracticesInspector;

impl<'a> Inspector<PythonSource<'a>> for BestPracticesInspector {
    fn name(&self) -> &'static str {
        "best-practices"
    }

    fn category(&self) -> Category {
        Category::BestPractices
    }

    fn inspect(&self, source: &PythonSource<'a>) -> CategoryOutcome {
        let patterns = global_patterns();
        let text = source.text;
        let mut tally = Tally::new(self.category());

        if patterns.py_secret_literal.is_match(text) {
            tally.deduct(
                5,
                "Hardcoded API keys or secrets detected. Use environment variables instead.",
            );
        }
        if patterns.py_dynamic_eval.is_match(text) {
            tally.deduct(
                5,
                "Usage of 'eval()' detected. This can lead to security vulnerabilities.",
            );
        }
        if patterns.py_string_built_sql.is_match(text) {
            tally.deduct(
                5,
                "Possible SQL injection risk found in raw SQL queries. Use parameterized queries instead.",
            );
        }
        if patterns.has_py_debug_call(text) {
            tally.deduct(
                3,
                "Found 'print' or 'debug' statements. Use logging instead for production applications.",
            );
        }
        if !patterns.py_env_lookup.is_match(text) {
            tally.deduct(
                2,
                "Environment variables not used for configuration. Store secrets securely.",
            );
        }

        tally.finish("Good web development best practices followed!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspect(source: &str) -> (u8, Vec<String>) {
        let source = PythonSource::parse(source);
        match BestPracticesInspector.inspect(&source) {
            CategoryOutcome::Scored { score, issues } => (score, issues),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_clean() {
        let (score, issues) = inspect("import os\n\nTOKEN = os.getenv('TOKEN')\n");
        assert_eq!(score, 20);
        assert_eq!(issues, vec!["Good web development best practices followed!"]);
    }

    #[test]
    fn test_secret_and_print_with_env_lookup() {
        let (score, issues) = inspect(
            "import os\nKEY = 'sk-abc123'\nHOME = os.environ['HOME']\nprint(KEY)\n",
        );
        assert_eq!(score, 12);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_every_check_fires() {
        let (score, issues) = inspect(
            "key = \"AKIAABCDEF\"\neval(data)\ncursor.execute(f\"SELECT * FROM t WHERE id={uid}\")\nprint(key)\n",
        );
        assert_eq!(score, 0);
        assert_eq!(issues.len(), 5);
    }

    #[test]
    fn test_debug_method_definition_is_not_flagged() {
        let (score, issues) = inspect(
            "import os\n\nclass Job:\n    def debug(self):\n        return os.getenv('JOB')\n",
        );
        assert_eq!(score, 20);
        assert_eq!(issues, vec!["Good web development best practices followed!"]);
    }

    #[test]
    fn test_runs_on_unparsable_source() {
        let (score, _) = inspect("def broken(:\n    evaluate(x)\n");
        assert_eq!(score, 18);
    }
}
