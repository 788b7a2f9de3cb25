//! Text preparation for pattern-based (lexical) inspection of JavaScript.
//!
//! Comments, string literals and template literals are blanked out once so
//! declaration patterns never match inside them. Blanking keeps byte offsets
//! and newlines, so positions in the masked code map 1:1 onto the raw text.

use super::patterns::global_patterns;

/// A `function NAME(...) { ... }` declaration found by pattern search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsFunction {
    pub name: String,
    pub is_async: bool,
    /// 1-indexed line of the declaration
    pub line: usize,
    /// Raw text between the opening and the matching closing brace
    pub body: String,
    /// The same span taken from the masked code
    pub code_body: String,
}

impl JsFunction {
    /// Number of lines of the trimmed body
    pub fn body_lines(&self) -> usize {
        self.body.trim().split('\n').count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
    /// `/** ... */`
    Doc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsComment {
    pub kind: CommentKind,
    /// 1-indexed line where the comment starts
    pub line: usize,
}

/// A JavaScript source prepared for the lexical inspectors
#[derive(Debug)]
pub struct JsSource<'a> {
    /// Raw text
    pub text: &'a str,
    /// Text with comments and string contents replaced by spaces
    pub code: String,
    pub comments: Vec<JsComment>,
    pub functions: Vec<JsFunction>,
}

impl<'a> JsSource<'a> {
    pub fn prepare(text: &'a str) -> Self {
        let (code, comments) = mask_comments_and_strings(text);
        let functions = extract_functions(text, &code);
        Self {
            text,
            code,
            comments,
            functions,
        }
    }

    pub fn count_comments(&self, kind: CommentKind) -> usize {
        self.comments.iter().filter(|c| c.kind == kind).count()
    }
}

/// Blank out comments, strings and template literals, keeping newlines.
/// Returns the masked code and the comments that were blanked.
pub fn mask_comments_and_strings(source: &str) -> (String, Vec<JsComment>) {
    let bytes = source.as_bytes();
    let mut out = bytes.to_vec();
    let mut comments = Vec::new();
    let mut line = 1;
    let mut i = 0;

    let blank = |out: &mut Vec<u8>, start: usize, end: usize| {
        for b in &mut out[start..end] {
            if *b != b'\n' {
                *b = b' ';
            }
        }
    };

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                line += 1;
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                comments.push(JsComment {
                    kind: CommentKind::Line,
                    line,
                });
                let start = i;
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                blank(&mut out, start, i);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let start = i;
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
                let text = &bytes[start..i];
                let kind = if text.starts_with(b"/**") && text != b"/**/" {
                    CommentKind::Doc
                } else {
                    CommentKind::Block
                };
                comments.push(JsComment { kind, line });
                line += text.iter().filter(|b| **b == b'\n').count();
                blank(&mut out, start, i);
            }
            b'/' if regex_allowed(&out[..i]) => match regex_end(bytes, i) {
                Some(end) => {
                    blank(&mut out, i + 1, end);
                    i = end + 1;
                }
                None => i += 1,
            },
            quote @ (b'"' | b'\'' | b'`') => {
                // Keep the delimiters, blank the content
                i += 1;
                let start = i;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    } else if bytes[i] == b'\n' && quote != b'`' {
                        // Unterminated single-line string
                        break;
                    }
                    i += 1;
                }
                let end = i.min(bytes.len());
                line += bytes[start..end].iter().filter(|b| **b == b'\n').count();
                blank(&mut out, start, end);
                if bytes.get(end) == Some(&b'\n') {
                    line += 1;
                }
                i = end + 1;
            }
            _ => i += 1,
        }
    }

    (String::from_utf8_lossy(&out).into_owned(), comments)
}

/// Whether a `/` after `before` (already masked) opens a regex literal
/// rather than a division.
fn regex_allowed(before: &[u8]) -> bool {
    let is_word = |b: &u8| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'$';
    let trimmed = before.trim_ascii_end();
    match trimmed.last() {
        None => true,
        Some(b) if is_word(b) => {
            let start = trimmed
                .iter()
                .rposition(|c| !is_word(c))
                .map_or(0, |pos| pos + 1);
            matches!(
                &trimmed[start..],
                b"return" | b"typeof" | b"case" | b"in" | b"of" | b"delete" | b"void"
                    | b"throw" | b"yield" | b"await"
            )
        }
        Some(b) => b"(,=:[!&|?{};+-*%~^>".contains(b),
    }
}

/// Index of the `/` closing the regex literal opened at `start`. `None` when
/// the line ends first, in which case the `/` was not a regex after all.
fn regex_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut in_class = false;
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => return None,
            b'\\' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    return None;
                }
                i += 1;
            }
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Find function declarations and their brace-matched bodies
fn extract_functions(text: &str, code: &str) -> Vec<JsFunction> {
    let patterns = global_patterns();
    let mut functions = Vec::new();

    for caps in patterns.js_function_header.captures_iter(code) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.name("name")) else {
            continue;
        };
        let open = whole.end() - 1;
        let close = matching_brace(code, open).unwrap_or(code.len());
        let body = text.get(open + 1..close).unwrap_or("").to_string();
        let code_body = code.get(open + 1..close).unwrap_or("").to_string();
        functions.push(JsFunction {
            name: name.as_str().to_string(),
            is_async: caps.name("async").is_some(),
            line: line_of(code, whole.start()),
            body,
            code_body,
        });
    }

    functions
}

/// Byte index of the `}` closing the `{` at `open`, on masked code
fn matching_brace(code: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, b) in code.as_bytes().iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn line_of(text: &str, byte: usize) -> usize {
    text.as_bytes()[..byte.min(text.len())]
        .iter()
        .filter(|b| **b == b'\n')
        .count()
        + 1
}
