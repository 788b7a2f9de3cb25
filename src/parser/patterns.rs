//! Compiled regex patterns shared by the inspectors.
//!
//! Compiled once per process (see [`global_patterns`]) and only read
//! afterwards, so concurrent analyses share them without locking. The regex
//! crate matches in linear time, which bounds the work on hostile input.

use regex::Regex;
use std::sync::OnceLock;

/// Every pattern used by the inspectors
pub struct Patterns {
    // Identifier conventions
    pub snake_case: Regex,
    pub pascal_case: Regex,
    pub upper_case: Regex,
    pub camel_case: Regex,
    pub js_snake_case: Regex,

    // JavaScript declarations
    pub js_function_header: Regex,
    pub js_function_name: Regex,
    pub js_variable: Regex,
    pub js_class: Regex,

    // JavaScript heuristics
    pub js_loop_keyword: Regex,
    pub js_conditional_keyword: Regex,
    pub js_space_indent: Regex,
    pub js_tab_indent: Regex,
    pub js_operator_without_spaces: Regex,
    pub js_overly_specific_name: Regex,
    pub js_var_keyword: Regex,
    pub js_async_function: Regex,
    pub js_try_block: Regex,
    pub js_dom_write: Regex,

    // Python heuristics
    pub py_secret_literal: Regex,
    pub py_dynamic_eval: Regex,
    pub py_string_built_sql: Regex,
    pub py_debug_call: Regex,
    pub py_env_lookup: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

impl Patterns {
    fn compile() -> Self {
        Self {
            snake_case: compile(r"^[a-z_][a-z0-9_]*$"),
            pascal_case: compile(r"^[A-Z][a-zA-Z0-9]*$"),
            upper_case: compile(r"^[A-Z][A-Z0-9_]*$"),
            camel_case: compile(r"^[a-z]+([A-Z][a-z0-9]*)*$"),
            js_snake_case: compile(r"^[a-z]+(_[a-z0-9]+)*$"),

            js_function_header: compile(
                r"(?P<async>\basync\s+)?\bfunction\s*\*?\s*(?P<name>[A-Za-z_$][\w$]*)\s*\([^)]*\)\s*\{",
            ),
            js_function_name: compile(r"\bfunction\s*\*?\s*(?P<name>[A-Za-z_$][\w$]*)\s*\("),
            js_variable: compile(r"\b(?P<kind>let|const|var)\s+(?P<name>[A-Za-z_$][\w$]*)\s*="),
            js_class: compile(r"\bclass\s+(?P<name>[A-Za-z_$][\w$]*)"),

            js_loop_keyword: compile(r"\b(?:for|while)\b"),
            js_conditional_keyword: compile(r"\b(?:if|switch)\b"),
            js_space_indent: compile(r"^( {2,4})\S"),
            js_tab_indent: compile(r"^\t+\S"),
            js_operator_without_spaces: compile(
                r"[A-Za-z0-9_$)\]](?:===|!==|==|!=|<=|>=|\+=|-=|\*=|/=|=|<|>|\+|-|\*|/|%)[A-Za-z0-9_$(\[]",
            ),
            js_overly_specific_name: compile(r"getUser1|getUser2|processDataA|processDataB"),
            js_var_keyword: compile(r"\bvar\b"),
            js_async_function: compile(r"\basync\s+function\b"),
            js_try_block: compile(r"\btry\s*\{"),
            js_dom_write: compile(
                r"\b(?:innerHTML|outerHTML)\s*=[^=]|\binsertAdjacentHTML\s*\(|\bdocument\.write(?:ln)?\s*\(",
            ),

            py_secret_literal: compile(
                r#"["'](?:sk-[a-zA-Z0-9]+|AIza[0-9A-Za-z_\-]+|AKIA[0-9A-Z]+)"#,
            ),
            py_dynamic_eval: compile(r"\b(?:eval|exec)\s*\("),
            py_string_built_sql: compile(
                r#"(?i)execute\s*\(\s*(?:f["'](?:SELECT|INSERT|UPDATE|DELETE)\b|["'](?:SELECT|INSERT|UPDATE|DELETE)\b[^"'\n]*["']\s*(?:%|\+|\.format\s*\())"#,
            ),
            py_debug_call: compile(
                r"(?m)(?:^|[^.\w])(?P<name>print|pprint|debug|breakpoint)\s*\(",
            ),
            py_env_lookup: compile(r"\bos\.getenv\s*\(|\bos\.environ\b|\bgetenv\s*\("),
        }
    }

    /// Whether `text` calls a debug output function. A definition such as
    /// `def debug(self):` is not a call.
    pub fn has_py_debug_call(&self, text: &str) -> bool {
        self.py_debug_call.captures_iter(text).any(|caps| {
            caps.name("name")
                .is_some_and(|name| !follows_def_keyword(&text[..name.start()]))
        })
    }
}

fn follows_def_keyword(before: &str) -> bool {
    before
        .trim_end()
        .strip_suffix("def")
        .is_some_and(|rest| !rest.ends_with(|c: char| c.is_alphanumeric() || c == '_'))
}

/// Process-wide pattern set (compiled on first use).
pub fn global_patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(Patterns::compile)
}
