use crate::analyzer::inspectors::{CategoryOutcome, Inspector, Tally};
use crate::parser::{global_patterns, JsSource};
use crate::Category;

const VIOLATION_PENALTY: i32 = 2;

/// camelCase or snake_case variables, camelCase functions, PascalCase
/// classes and UPPER_CASE constants
pub struct NamingInspector;

impl<'a> Inspector<JsSource<'a>> for NamingInspector {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn category(&self) -> Category {
        Category::Naming
    }

    fn inspect(&self, source: &JsSource<'a>) -> CategoryOutcome {
        let patterns = global_patterns();
        let code = source.code.as_str();
        let mut tally = Tally::new(self.category());

        for caps in patterns.js_variable.captures_iter(code) {
            let (Some(kind), Some(name)) = (caps.name("kind"), caps.name("name")) else {
                continue;
            };
            let name = name.as_str();
            if kind.as_str() == "const" && looks_constant(name) {
                if !patterns.upper_case.is_match(name) {
                    tally.deduct(
                        VIOLATION_PENALTY,
                        format!("Constant '{}' should be in UPPER_CASE.", name),
                    );
                }
            } else if !patterns.camel_case.is_match(name) && !patterns.js_snake_case.is_match(name)
            {
                tally.deduct(
                    VIOLATION_PENALTY,
                    format!("Variable '{}' should use camelCase or snake_case.", name),
                );
            }
        }

        for name in patterns
            .js_function_name
            .captures_iter(code)
            .filter_map(|caps| caps.name("name"))
        {
            if !patterns.camel_case.is_match(name.as_str()) {
                tally.deduct(
                    VIOLATION_PENALTY,
                    format!("Function '{}' should follow camelCase naming.", name.as_str()),
                );
            }
        }

        for name in patterns
            .js_class
            .captures_iter(code)
            .filter_map(|caps| caps.name("name"))
        {
            if !patterns.pascal_case.is_match(name.as_str()) {
                tally.deduct(
                    VIOLATION_PENALTY,
                    format!("Class '{}' should follow PascalCase naming.", name.as_str()),
                );
            }
        }

        tally.finish("Good naming conventions followed!")
    }
}

/// Upper-case letters, digits and underscores with at least one letter
fn looks_constant(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
