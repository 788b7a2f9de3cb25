//! Duplicated function bodies, hardcoded literals and oversized functions.

use super::parsed;
use crate::analyzer::inspectors::{duplicate_groups, CategoryOutcome, Inspector, Tally};
use crate::parser::{NodeKind, PythonSource};
use crate::Category;
use std::collections::BTreeSet;

const MAX_DISTINCT_LITERALS: usize = 5;
const MAX_BODY_LINES: usize = 20;

pub struct ReusabilityInspector;

impl<'a> Inspector<PythonSource<'a>> for ReusabilityInspector {
    fn name(&self) -> &'static str {
        "reusability"
    }

    fn category(&self) -> Category {
        Category::Reusability
    }

    fn inspect(&self, source: &PythonSource<'a>) -> CategoryOutcome {
        let module = match parsed(source) {
            Ok(module) => module,
            Err(degraded) => return degraded,
        };
        let mut tally = Tally::new(self.category());

        let groups = duplicate_groups(
            module
                .functions()
                .map(|(_, def)| def.normalized_body.as_str()),
        );
        if groups > 0 {
            tally.deduct(
                5,
                format!(
                    "Repeated function logic found in {} function(s). Consider reusing them.",
                    groups
                ),
            );
        }

        let literals: BTreeSet<&str> = module
            .walk()
            .filter_map(|node| match &node.kind {
                NodeKind::Literal(literal) => Some(literal.text.as_str()),
                _ => None,
            })
            .filter(|text| text.chars().count() > 2)
            .collect();
        if literals.len() > MAX_DISTINCT_LITERALS {
            tally.deduct(
                5,
                "Too many hardcoded values found. Use constants or variables instead.",
            );
        }

        // A redefinition replaces the earlier body but keeps its position
        let mut by_name: Vec<(&str, &str)> = Vec::new();
        for (_, def) in module.functions() {
            let body = def.normalized_body.as_str();
            match by_name.iter_mut().find(|(name, _)| *name == def.name) {
                Some(entry) => entry.1 = body,
                None => by_name.push((def.name.as_str(), body)),
            }
        }
        for (name, body) in by_name {
            if body.split('\n').count() > MAX_BODY_LINES {
                tally.deduct(
                    5,
                    format!(
                        "Function '{}' is too long. Consider breaking it into smaller functions.",
                        name
                    ),
                );
            }
        }

        tally.finish("Good reusability and DRY principles followed!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspect(source: &str) -> (u8, Vec<String>) {
        let source = PythonSource::parse(source);
        match ReusabilityInspector.inspect(&source) {
            CategoryOutcome::Scored { score, issues } => (score, issues),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_clean() {
        let (score, issues) = inspect("def area(r):\n    return 3.14 * r * r\n");
        assert_eq!(score, 15);
        assert_eq!(issues, vec!["Good reusability and DRY principles followed!"]);
    }

    #[test]
    fn test_duplicate_bodies_ignore_comments_and_indentation() {
        let source = "def a(x):\n    # twice\n    return x * 2\n\nclass K:\n    def b(self, x):\n        return x * 2\n";
        let (score, issues) = inspect(source);
        assert_eq!(score, 10);
        assert_eq!(
            issues,
            vec!["Repeated function logic found in 1 function(s). Consider reusing them."]
        );
    }

    #[test]
    fn test_distinct_literals() {
        let few = "a = 'one'\nb = 'two'\nc = 'two'\nd = 12\ne = 100\n";
        assert_eq!(inspect(few).0, 15);
        let many = "a = 'alpha'\nb = 'beta'\nc = 'gamma'\nd = 1_000\ne = 2.50\nf = True\n";
        let (score, issues) = inspect(many);
        assert_eq!(score, 10);
        assert_eq!(
            issues,
            vec!["Too many hardcoded values found. Use constants or variables instead."]
        );
    }

    #[test]
    fn test_long_function_checked_once_per_name() {
        let mut source = String::from("def big():\n    return 0\n\ndef big():\n");
        for i in 0..21 {
            source.push_str(&format!("    v{i} = v\n"));
        }
        let (score, issues) = inspect(&source);
        assert_eq!(score, 10);
        assert_eq!(
            issues,
            vec!["Function 'big' is too long. Consider breaking it into smaller functions."]
        );
    }
}
