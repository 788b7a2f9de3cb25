//! Module and function docstrings, plus the presence of `#` comments.

use super::parsed;
use crate::analyzer::inspectors::{CategoryOutcome, Inspector, Tally};
use crate::parser::{NodeKind, PythonSource};
use crate::Category;

/// Minimum trimmed length of a docstring that counts as documentation
const MIN_DOCSTRING_CHARS: usize = 10;

pub struct DocumentationInspector;

impl<'a> Inspector<PythonSource<'a>> for DocumentationInspector {
    fn name(&self) -> &'static str {
        "documentation"
    }

    fn category(&self) -> Category {
        Category::Documentation
    }

    fn inspect(&self, source: &PythonSource<'a>) -> CategoryOutcome {
        let module = match parsed(source) {
            Ok(module) => module,
            Err(degraded) => return degraded,
        };
        let mut tally = Tally::new(self.category());

        if !is_proper_docstring(module.docstring.as_deref()) {
            tally.deduct(5, "Missing or insufficient module-level docstring.");
        }

        let mut total = 0usize;
        let mut documented = 0usize;
        for (_, def) in module.functions() {
            total += 1;
            if is_proper_docstring(def.docstring.as_deref()) {
                documented += 1;
            } else {
                tally.note(format!(
                    "Function `{}` is missing a proper docstring.",
                    def.name
                ));
            }
        }

        if total > 0 {
            let ratio = documented as f64 / total as f64;
            if ratio < 0.5 {
                tally.deduct(10, "Less than 50% of functions have proper docstrings.");
            } else if ratio < 1.0 {
                tally.deduct(5, "Some functions are missing docstrings.");
            }

            let comments = module
                .walk()
                .filter(|node| matches!(node.kind, NodeKind::Comment))
                .count();
            if comments == 0 {
                tally.deduct(
                    5,
                    "No inline comments found. Consider adding explanations for complex code.",
                );
            }
        }

        tally.finish("Good documentation and comments!")
    }
}

fn is_proper_docstring(docstring: Option<&str>) -> bool {
    docstring.is_some_and(|doc| doc.trim().chars().count() >= MIN_DOCSTRING_CHARS)
}
