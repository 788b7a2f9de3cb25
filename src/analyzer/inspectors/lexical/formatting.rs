use crate::analyzer::inspectors::lines::{check_blank_runs, check_trailing_whitespace};
use crate::analyzer::inspectors::{CategoryOutcome, Inspector, Tally};
use crate::parser::{global_patterns, JsSource};
use crate::Category;

const INDENT_WIDTH: usize = 4;
const REPORTED_LINES: usize = 5;

/// Indentation, operator spacing and whitespace checks
pub struct FormattingInspector;

impl<'a> Inspector<JsSource<'a>> for FormattingInspector {
    fn name(&self) -> &'static str {
        "formatting"
    }

    fn category(&self) -> Category {
        Category::Formatting
    }

    fn inspect(&self, source: &JsSource<'a>) -> CategoryOutcome {
        let patterns = global_patterns();
        let lines: Vec<&str> = source.text.split('\n').collect();
        let mut tally = Tally::new(self.category());

        let space_indented = lines.iter().any(|line| patterns.js_space_indent.is_match(line));
        let tab_indented = lines.iter().any(|line| patterns.js_tab_indent.is_match(line));
        if space_indented && tab_indented {
            tally.deduct(
                5,
                "Mixed spaces and tabs detected. Use a consistent indentation style.",
            );
        }

        let irregular = irregular_indentation(source);
        if !irregular.is_empty() {
            let shown = &irregular[..irregular.len().min(REPORTED_LINES)];
            let message = if irregular.len() > REPORTED_LINES {
                format!(
                    "Incorrect indentation found on lines: {:?}... (showing first {})",
                    shown, REPORTED_LINES
                )
            } else {
                format!("Incorrect indentation found on lines: {:?}.", shown)
            };
            tally.deduct(5, message);
        }

        if patterns.js_operator_without_spaces.is_match(&source.code) {
            tally.deduct(
                5,
                "Missing spaces around operators (e.g., `a=1` should be `a = 1`).",
            );
        }

        check_trailing_whitespace(&mut tally, &lines);
        check_blank_runs(&mut tally, &lines);

        tally.finish("Good formatting and indentation!")
    }
}

/// 1-indexed code lines indented by spaces only, by a width that is not a
/// multiple of four. Lines that hold only comment or string content are
/// skipped.
fn irregular_indentation(source: &JsSource<'_>) -> Vec<usize> {
    source
        .text
        .split('\n')
        .zip(source.code.split('\n'))
        .enumerate()
        .filter(|(_, (_, code))| !code.trim().is_empty())
        .filter_map(|(idx, (raw, _))| {
            let indent = &raw[..raw.len() - raw.trim_start().len()];
            let irregular = !indent.contains('\t') && indent.len() % INDENT_WIDTH != 0;
            irregular.then_some(idx + 1)
        })
        .collect()
}
