use crate::analyzer::inspectors::{duplicate_groups, CategoryOutcome, Inspector, Tally};
use crate::parser::{global_patterns, JsSource};
use crate::Category;
use std::collections::HashMap;

/// A line seen more often than this counts as repeated code
const MAX_LINE_REPEATS: usize = 2;

/// Duplicate function bodies, repeated lines and overly specific names
pub struct ReusabilityInspector;

impl<'a> Inspector<JsSource<'a>> for ReusabilityInspector {
    fn name(&self) -> &'static str {
        "reusability"
    }

    fn category(&self) -> Category {
        Category::Reusability
    }

    fn inspect(&self, source: &JsSource<'a>) -> CategoryOutcome {
        let mut tally = Tally::new(self.category());

        let groups = duplicate_groups(source.functions.iter().map(|f| f.body.trim()));
        if groups > 0 {
            tally.deduct(
                5,
                format!(
                    "Duplicate function logic found ({} occurrences). Consider reusing a single function.",
                    groups
                ),
            );
        }

        let repeated = repeated_lines(source.text);
        if repeated > 0 {
            tally.deduct(
                5,
                format!(
                    "Repeated code detected ({} occurrences). Consider using functions or loops for reusability.",
                    repeated
                ),
            );
        }

        let pattern = &global_patterns().js_overly_specific_name;
        let mut specific: Vec<&str> = Vec::new();
        for function in &source.functions {
            if pattern.is_match(&function.name) && !specific.contains(&function.name.as_str()) {
                specific.push(&function.name);
            }
        }
        if !specific.is_empty() {
            tally.deduct(
                5,
                format!(
                    "Overly specific function names found: {:?}. Consider making them more general for reusability.",
                    specific
                ),
            );
        }

        tally.finish("Good code reusability and adherence to DRY principles!")
    }
}

/// Number of distinct non-blank lines that occur more than twice
fn repeated_lines(text: &str) -> usize {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in text.split('\n').filter(|line| !line.trim().is_empty()) {
        *counts.entry(line).or_default() += 1;
    }
    counts
        .values()
        .filter(|count| **count > MAX_LINE_REPEATS)
        .count()
}
