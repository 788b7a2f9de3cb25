use crate::analyzer::inspectors::{CategoryOutcome, Inspector, Tally};
use crate::parser::{global_patterns, JsSource};
use crate::Category;

const MAX_FUNCTION_LINES: usize = 50;

/// Legacy declarations, unguarded async code, raw HTML writes and oversized
/// functions
pub struct BestPracticesInspector;

impl<'a> Inspector<JsSource<'a>> for BestPracticesInspector {
    fn name(&self) -> &'static str {
        "best-practices"
    }

    fn category(&self) -> Category {
        Category::BestPractices
    }

    fn inspect(&self, source: &JsSource<'a>) -> CategoryOutcome {
        let patterns = global_patterns();
        let code = source.code.as_str();
        let mut tally = Tally::new(self.category());

        if patterns.js_var_keyword.is_match(code) {
            tally.deduct(
                5,
                "Avoid using 'var'. Use 'let' or 'const' instead for better scoping.",
            );
        }

        if patterns.js_async_function.is_match(code) && !patterns.js_try_block.is_match(code) {
            tally.deduct(
                5,
                "Async functions should have proper error handling using 'try-catch'.",
            );
        }

        if patterns.js_dom_write.is_match(code) {
            tally.deduct(
                5,
                "Avoid writing raw HTML with 'innerHTML' or 'document.write'. Use 'textContent' or 'createElement' to prevent XSS vulnerabilities.",
            );
        }

        let oversized: Vec<&str> = source
            .functions
            .iter()
            .filter(|f| f.body.split('\n').count() > MAX_FUNCTION_LINES)
            .map(|f| f.name.as_str())
            .collect();
        if !oversized.is_empty() {
            tally.deduct(
                5,
                format!(
                    "Functions {:?} exceed {} lines. Consider breaking them into smaller, reusable functions.",
                    oversized, MAX_FUNCTION_LINES
                ),
            );
        }

        tally.finish("Good adherence to web development best practices!")
    }
}
