use crate::analyzer::inspectors::lines::{check_blank_runs, check_trailing_whitespace};
use crate::analyzer::inspectors::{CategoryOutcome, Inspector, Tally};
use crate::parser::PythonSource;
use crate::Category;

/// Raw-line formatting checks. Runs on sources that do not parse and
/// reports the parser's indentation error as one of its issues.
pub struct FormattingInspector;

impl<'a> Inspector<PythonSource<'a>> for FormattingInspector {
    fn name(&self) -> &'static str {
        "formatting"
    }

    fn category(&self) -> Category {
        Category::Formatting
    }

    fn inspect(&self, source: &PythonSource<'a>) -> CategoryOutcome {
        let lines: Vec<&str> = source.text.split('\n').collect();
        let mut tally = Tally::new(self.category());

        let uses_tabs = lines.iter().any(|line| line.contains('\t'));
        let uses_spaces = lines.iter().any(|line| line.contains("    "));
        if uses_tabs && uses_spaces {
            tally.deduct(
                5,
                "Mixed indentation detected (Tabs and Spaces). Use spaces only.",
            );
        }

        if let Some(failure) = source.indentation_error() {
            tally.deduct(
                5,
                format!(
                    "Indentation error: {} (line {})",
                    failure.message, failure.line
                ),
            );
        }

        check_trailing_whitespace(&mut tally, &lines);
        check_blank_runs(&mut tally, &lines);

        tally.finish("Good formatting and indentation!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspect(source: &str) -> (u8, Vec<String>) {
        let source = PythonSource::parse(source);
        match FormattingInspector.inspect(&source) {
            CategoryOutcome::Scored { score, issues } => (score, issues),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_clean_source() {
        let (score, issues) = inspect("def f():\n    return 1\n");
        assert_eq!(score, 15);
        assert_eq!(issues, vec!["Good formatting and indentation!"]);
    }

    #[test]
    fn test_mixed_indentation() {
        let (score, issues) = inspect("if a:\n    b = 1\nif c:\n\td = 2\n");
        assert_eq!(score, 10);
        assert_eq!(
            issues[0],
            "Mixed indentation detected (Tabs and Spaces). Use spaces only."
        );
    }

    #[test]
    fn test_indentation_error_still_scored() {
        let (score, issues) = inspect("def f():\nreturn 1\n");
        assert_eq!(score, 10);
        assert_eq!(
            issues,
            vec!["Indentation error: expected an indented block (line 2)"]
        );
    }

    #[test]
    fn test_whitespace_checks_accumulate() {
        let (score, issues) = inspect("a = 1 \n\n\n\nb = 2\n");
        assert_eq!(score, 10);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("[1]"));
        assert!(issues[1].contains("[2]"));
    }
}
