//! Python parser using tree-sitter

use anyhow::{Context, Result};
use tree_sitter::{Language, Node, Parser, Tree};

use super::indentation::{scan_indentation, IndentationError};
use super::syntax::Module;

/// Parser for Python files using tree-sitter
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&Self::language())
            .context("Failed to set Python language")?;
        Ok(Self { parser })
    }

    /// Parse source code into a syntax tree
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .context("Failed to parse Python source")
    }

    /// Get the tree-sitter language for Python
    pub fn language() -> Language {
        tree_sitter_python::LANGUAGE.into()
    }
}

/// Why a Python source could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailureKind {
    Syntax,
    Indentation,
}

/// A Python source that does not parse cleanly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub kind: ParseFailureKind,
    pub message: String,
    /// 1-indexed line of the first error
    pub line: usize,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Syntax error in the provided code: {} (line {})",
            self.message, self.line
        )
    }
}

impl ParseFailure {
    fn from_indentation(err: IndentationError) -> Self {
        Self {
            kind: ParseFailureKind::Indentation,
            message: err.message.to_string(),
            line: err.line,
        }
    }
}

/// A Python source prepared for the structural inspectors: the raw text and
/// either the lowered syntax model or the reason it could not be built.
#[derive(Debug)]
pub struct PythonSource<'a> {
    pub text: &'a str,
    pub module: Result<Module, ParseFailure>,
}

impl<'a> PythonSource<'a> {
    pub fn parse(text: &'a str) -> Self {
        let module = Self::build_module(text);
        Self { text, module }
    }

    /// The parse failure when it is an indentation problem
    pub fn indentation_error(&self) -> Option<&ParseFailure> {
        match &self.module {
            Err(failure) if failure.kind == ParseFailureKind::Indentation => Some(failure),
            _ => None,
        }
    }

    fn build_module(text: &str) -> Result<Module, ParseFailure> {
        // tree-sitter accepts some layouts CPython rejects, so the scan runs first
        if let Some(err) = scan_indentation(text) {
            return Err(ParseFailure::from_indentation(err));
        }
        let tree = PythonParser::new()
            .and_then(|mut parser| parser.parse(text))
            .map_err(|e| ParseFailure {
                kind: ParseFailureKind::Syntax,
                message: e.to_string(),
                line: 1,
            })?;
        let root = tree.root_node();
        if root.has_error() {
            let (line, message) = first_error(root)
                .map(|node| {
                    let message = if node.is_missing() {
                        format!("expected '{}'", node.kind())
                    } else {
                        "invalid syntax".to_string()
                    };
                    (node.start_position().row + 1, message)
                })
                .unwrap_or((1, "invalid syntax".to_string()));
            return Err(ParseFailure {
                kind: ParseFailureKind::Syntax,
                message,
                line,
            });
        }
        if let Some(node) = first_legacy_statement(root) {
            let keyword = match node.kind() {
                "exec_statement" => "exec",
                _ => "print",
            };
            return Err(ParseFailure {
                kind: ParseFailureKind::Syntax,
                message: format!("Missing parentheses in call to '{}'", keyword),
                line: node.start_position().row + 1,
            });
        }
        Ok(Module::lower(root, text))
    }
}

/// First Python 2 `print`/`exec` statement in document order. The grammar
/// still accepts them but they no longer parse as Python 3.
fn first_legacy_statement(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if matches!(node.kind(), "print_statement" | "exec_statement") {
            return Some(node);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// First ERROR or MISSING node in document order
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let mut parser = PythonParser::new().unwrap();
        let tree = parser.parse("x = 1\n").unwrap();
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn test_parse_function() {
        let mut parser = PythonParser::new().unwrap();
        let source = "def greet(name):\n    return f\"Hello, {name}!\"\n";
        let tree = parser.parse(source).unwrap();
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let source = "x = 1\ndef broken(:\n    pass\n";
        let parsed = PythonSource::parse(source);
        let failure = parsed.module.unwrap_err();
        assert_eq!(failure.kind, ParseFailureKind::Syntax);
        assert!(failure.to_string().starts_with("Syntax error in the provided code"));
        assert!(parsed_line_is_plausible(failure.line));
    }

    fn parsed_line_is_plausible(line: usize) -> bool {
        (1..=3).contains(&line)
    }

    #[test]
    fn test_indentation_error_is_classified() {
        let source = "def f():\nreturn 1\n";
        let parsed = PythonSource::parse(source);
        let failure = parsed.indentation_error().expect("indentation error");
        assert_eq!(failure.message, "expected an indented block");
        assert_eq!(failure.line, 2);
    }

    #[test]
    fn test_indentation_checked_even_when_tree_is_clean() {
        let parsed = PythonSource::parse("x = 1\n    y = 2\n");
        let failure = parsed.indentation_error().expect("indentation error");
        assert_eq!(failure.message, "unexpected indent");
        assert_eq!(failure.line, 2);
    }

    #[test]
    fn test_python2_print_statement_is_a_syntax_error() {
        let failure = PythonSource::parse("x = 1\nprint 'hi'\n").module.unwrap_err();
        assert_eq!(failure.kind, ParseFailureKind::Syntax);
        assert_eq!(failure.message, "Missing parentheses in call to 'print'");
        assert_eq!(failure.line, 2);
    }

    #[test]
    fn test_python2_exec_statement_is_a_syntax_error() {
        let failure = PythonSource::parse("exec 'x = 1'\n").module.unwrap_err();
        assert_eq!(failure.message, "Missing parentheses in call to 'exec'");
    }

    #[test]
    fn test_print_call_parses() {
        assert!(PythonSource::parse("print('hi')\nexec(code)\n").module.is_ok());
    }

    #[test]
    fn test_empty_source_parses() {
        let parsed = PythonSource::parse("");
        assert!(parsed.module.is_ok());
    }
}
