//! Python-style indentation checking on raw lines.
//!
//! tree-sitter either recovers from indentation mistakes with generic ERROR
//! nodes or accepts them outright, so every Python source is scanned before
//! it is parsed. Only logical line starts are considered: lines inside
//! brackets, triple-quoted strings or after a `\` continuation are skipped.

/// An indentation problem found on a logical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentationError {
    pub message: &'static str,
    /// 1-indexed line number
    pub line: usize,
}

/// Scanner state carried across physical lines
#[derive(Default)]
struct LineState {
    bracket_depth: usize,
    /// Open triple quote delimiter, if inside a multi-line string
    triple_quote: Option<[u8; 3]>,
    backslash_continuation: bool,
}

/// Outcome of scanning one physical line
struct LineScan {
    /// Last significant character outside strings and comments
    last_code_char: Option<u8>,
}

/// Return the first indentation error, if any
pub fn scan_indentation(source: &str) -> Option<IndentationError> {
    let mut state = LineState::default();
    let mut stack: Vec<usize> = vec![0];
    let mut expect_indent_after: Option<usize> = None;

    for (idx, line) in source.split('\n').enumerate() {
        let line_no = idx + 1;
        let continuation = state.bracket_depth > 0
            || state.triple_quote.is_some()
            || state.backslash_continuation;
        let trimmed = line.trim();
        let scan = scan_line(line, &mut state);

        if continuation || trimmed.is_empty() || trimmed.starts_with('#') {
            if continuation && state.bracket_depth == 0 && state.triple_quote.is_none() {
                // Logical line ends here; it may open a block.
                if scan.last_code_char == Some(b':') && !state.backslash_continuation {
                    expect_indent_after = Some(line_no);
                }
            }
            continue;
        }

        let indent = indent_width(line);
        let top = *stack.last().unwrap_or(&0);

        if expect_indent_after.take().is_some() {
            if indent <= top {
                return Some(IndentationError {
                    message: "expected an indented block",
                    line: line_no,
                });
            }
            stack.push(indent);
        } else if indent > top {
            return Some(IndentationError {
                message: "unexpected indent",
                line: line_no,
            });
        } else if indent < top {
            while stack.last().is_some_and(|&level| level > indent) {
                stack.pop();
            }
            if stack.last() != Some(&indent) {
                return Some(IndentationError {
                    message: "unindent does not match any outer indentation level",
                    line: line_no,
                });
            }
        }

        let logical_line_ends = state.bracket_depth == 0
            && state.triple_quote.is_none()
            && !state.backslash_continuation;
        if logical_line_ends && scan.last_code_char == Some(b':') {
            expect_indent_after = Some(line_no);
        }
    }

    None
}

/// Width of leading whitespace, tabs advancing to the next multiple of 8
fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width = (width / 8 + 1) * 8,
            '\x0c' => width = 0,
            _ => break,
        }
    }
    width
}

fn scan_line(line: &str, state: &mut LineState) -> LineScan {
    let bytes = line.as_bytes();
    let mut last_code_char = None;
    let mut i = 0;
    state.backslash_continuation = false;

    while i < bytes.len() {
        if let Some(delim) = state.triple_quote {
            if bytes[i] == b'\\' {
                i += 2;
                continue;
            }
            if bytes[i..].starts_with(&delim) {
                state.triple_quote = None;
                last_code_char = Some(delim[0]);
                i += 3;
                continue;
            }
            i += 1;
            continue;
        }

        let b = bytes[i];
        match b {
            b'#' => break,
            b'"' | b'\'' => {
                let triple = [b, b, b];
                if bytes[i..].starts_with(&triple) {
                    state.triple_quote = Some(triple);
                    i += 3;
                    continue;
                }
                // Single-line string: skip to the closing quote
                i += 1;
                while i < bytes.len() && bytes[i] != b {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                last_code_char = Some(b);
                i += 1;
                continue;
            }
            b'(' | b'[' | b'{' => state.bracket_depth += 1,
            b')' | b']' | b'}' => state.bracket_depth = state.bracket_depth.saturating_sub(1),
            _ => {}
        }
        if !b.is_ascii_whitespace() {
            last_code_char = Some(b);
        }
        i += 1;
    }

    if last_code_char == Some(b'\\') && state.triple_quote.is_none() {
        state.backslash_continuation = true;
    }

    LineScan { last_code_char }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_indented_source() {
        let source = "class A:\n    def f(self):\n        if True:\n            return 1\n        return 2\n\nx = 1\n";
        assert_eq!(scan_indentation(source), None);
    }

    #[test]
    fn test_expected_indented_block() {
        let err = scan_indentation("if x:\npass\n").unwrap();
        assert_eq!(err.message, "expected an indented block");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unexpected_indent() {
        let err = scan_indentation("x = 1\n    y = 2\n").unwrap();
        assert_eq!(err.message, "unexpected indent");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unindent_mismatch() {
        let source = "def f():\n        a = 1\n    b = 2\n";
        let err = scan_indentation(source).unwrap();
        assert_eq!(err.message, "unindent does not match any outer indentation level");
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_brackets_and_strings_are_continuations() {
        let source = "x = foo(1,\n        2)\ny = \"\"\"\n   text:\n\"\"\"\nz = 3\n";
        assert_eq!(scan_indentation(source), None);
    }

    #[test]
    fn test_colon_inside_string_or_comment_does_not_open_block() {
        let source = "x = \"a:\"\ny = 1  # note:\nz = 2\n";
        assert_eq!(scan_indentation(source), None);
    }

    #[test]
    fn test_multiline_header_opens_block() {
        let source = "def f(a,\n      b):\nreturn a\n";
        let err = scan_indentation(source).unwrap();
        assert_eq!(err.line, 3);
    }
}
