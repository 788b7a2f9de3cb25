use crate::analyzer::inspectors::{CategoryOutcome, Inspector, Tally};
use crate::parser::{global_patterns, JsSource};
use crate::Category;

const MAX_BODY_LINES: usize = 20;

/// Function length and single-responsibility checks on brace-matched bodies.
/// A script without any function declaration scores zero here.
pub struct ModularityInspector;

impl<'a> Inspector<JsSource<'a>> for ModularityInspector {
    fn name(&self) -> &'static str {
        "modularity"
    }

    fn category(&self) -> Category {
        Category::Modularity
    }

    fn inspect(&self, source: &JsSource<'a>) -> CategoryOutcome {
        if source.functions.is_empty() {
            return CategoryOutcome::Scored {
                score: 0,
                issues: vec!["No functions found. Define functions for better modularity.".into()],
            };
        }

        let mut tally = Tally::new(self.category());
        let patterns = global_patterns();
        for function in &source.functions {
            let lines = function.body_lines();
            if lines > MAX_BODY_LINES {
                tally.deduct(
                    5,
                    format!(
                        "Function '{}' is too long ({} lines). Consider splitting it.",
                        function.name, lines
                    ),
                );
            }

            let loops = patterns.js_loop_keyword.find_iter(&function.code_body).count();
            let conditionals = patterns
                .js_conditional_keyword
                .find_iter(&function.code_body)
                .count();
            if loops > 1 || conditionals > 2 {
                tally.deduct(
                    5,
                    format!(
                        "Function '{}' seems to handle multiple tasks. Consider breaking it into smaller functions.",
                        function.name
                    ),
                );
            }
        }

        tally.finish("Good function structure and modularity!")
    }
}
