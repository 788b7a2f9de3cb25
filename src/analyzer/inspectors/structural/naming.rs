//! Identifier conventions: snake_case functions and variables, PascalCase
//! classes, UPPER_CASE constants.

use super::parsed;
use crate::analyzer::inspectors::{CategoryOutcome, Inspector, Tally};
use crate::parser::{global_patterns, NodeKind, PythonSource};
use crate::Category;

pub struct NamingInspector;

impl<'a> Inspector<PythonSource<'a>> for NamingInspector {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn category(&self) -> Category {
        Category::Naming
    }

    fn inspect(&self, source: &PythonSource<'a>) -> CategoryOutcome {
        let module = match parsed(source) {
            Ok(module) => module,
            Err(degraded) => return degraded,
        };
        let patterns = global_patterns();
        let mut tally = Tally::new(self.category());
        let mut total = 0usize;

        for node in module.walk() {
            match &node.kind {
                NodeKind::FunctionDef(def) => {
                    total += 1;
                    if !patterns.snake_case.is_match(&def.name) {
                        tally.note(format!(
                            "Function `{}` → Suggested: `{}`",
                            def.name,
                            to_snake_case(&def.name)
                        ));
                    }
                }
                NodeKind::TypeDef(def) => {
                    total += 1;
                    if !patterns.pascal_case.is_match(&def.name) {
                        tally.note(format!(
                            "Class `{}` → Suggested: `{}`",
                            def.name,
                            to_pascal_case(&def.name)
                        ));
                    }
                }
                NodeKind::Assignment(_)
                | NodeKind::Loop
                | NodeKind::Conditional
                | NodeKind::Call
                | NodeKind::Literal(_)
                | NodeKind::Comment => {}
            }
        }

        for target in module
            .top_level_assignments()
            .into_iter()
            .filter_map(|assignment| assignment.target.as_deref())
        {
            total += 1;
            if is_upper(target) {
                if !patterns.upper_case.is_match(target) {
                    tally.note(format!(
                        "Constant `{}` → Suggested: `{}`",
                        target,
                        target.to_uppercase()
                    ));
                }
            } else if !patterns.snake_case.is_match(target) {
                tally.note(format!(
                    "Variable `{}` → Suggested: `{}`",
                    target,
                    to_snake_case(target)
                ));
            }
        }

        if total > 0 {
            let incorrect = tally.issue_count() as f64;
            let ratio = 1.0 - incorrect / total as f64;
            tally.set_score((10.0 * ratio).round_ties_even() as i32);
        }

        tally.finish("All naming conventions are correct!")
    }
}

/// `fetchUserData` → `fetch_user_data`
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (idx, c) in name.chars().enumerate() {
        if idx > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c);
    }
    out.to_lowercase()
}

/// `http_client` → `HttpClient`
pub fn to_pascal_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// At least one cased character and none lower-case
fn is_upper(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}
