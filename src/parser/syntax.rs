//! Owned syntax model for Python sources.
//!
//! The tree-sitter tree is lowered once into a closed set of node kinds that
//! the structural inspectors care about. Nodes of any other kind are dropped
//! and their interesting descendants are hoisted into the nearest kept
//! ancestor, so a subtree walk still sees everything below a node.

use std::collections::VecDeque;
use tree_sitter::Node;

/// A lowered Python module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Module docstring, untrimmed
    pub docstring: Option<String>,
    pub body: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// 1-indexed line
    pub line: usize,
    pub children: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// `def` / `async def`
    FunctionDef(FunctionDef),
    /// `class`
    TypeDef(TypeDef),
    /// Plain `target = value` (annotated and augmented assignments excluded)
    Assignment(Assignment),
    /// `for` / `while`
    Loop,
    /// `if` / `elif` / `match`
    Conditional,
    Call,
    /// String, number or boolean constant
    Literal(Literal),
    /// `#` comment
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub is_async: bool,
    pub docstring: Option<String>,
    /// Statements directly in the body (comments excluded)
    pub body_len: usize,
    /// Body with comments and blank lines removed and each line trimmed
    pub normalized_body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: String,
    pub docstring: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The assigned name when the target is a bare identifier
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Python's `str()` of the constant: string content without quotes,
    /// numbers without `_` separators, `True`/`False`
    pub text: String,
}

impl Module {
    /// Lower a tree-sitter `module` node
    pub fn lower(root: Node, source: &str) -> Self {
        let docstring = docstring_of(root, source);
        let mut body = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            lower_into(child, source, &mut body);
        }
        Self { docstring, body }
    }

    /// Breadth-first walk over every node in the module
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            queue: self.body.iter().collect(),
        }
    }

    /// All function definitions, in walk order
    pub fn functions(&self) -> impl Iterator<Item = (&SyntaxNode, &FunctionDef)> {
        self.walk().filter_map(|node| match &node.kind {
            NodeKind::FunctionDef(def) => Some((node, def)),
            _ => None,
        })
    }

    /// Assignments at module scope, i.e. not inside a function or class body
    pub fn top_level_assignments(&self) -> Vec<&Assignment> {
        fn collect<'a>(nodes: &'a [SyntaxNode], out: &mut Vec<&'a Assignment>) {
            for node in nodes {
                match &node.kind {
                    NodeKind::FunctionDef(_) | NodeKind::TypeDef(_) => {}
                    NodeKind::Assignment(assignment) => {
                        out.push(assignment);
                        collect(&node.children, out);
                    }
                    NodeKind::Loop
                    | NodeKind::Conditional
                    | NodeKind::Call
                    | NodeKind::Literal(_)
                    | NodeKind::Comment => collect(&node.children, out),
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.body, &mut out);
        out
    }
}

impl SyntaxNode {
    /// Breadth-first walk over the node's descendants (the node itself excluded)
    pub fn descendants(&self) -> Walk<'_> {
        Walk {
            queue: self.children.iter().collect(),
        }
    }
}

/// Breadth-first iterator over lowered nodes
pub struct Walk<'a> {
    queue: VecDeque<&'a SyntaxNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children.iter());
        Some(node)
    }
}

fn lower_into(node: Node, source: &str, out: &mut Vec<SyntaxNode>) {
    let kind = match node.kind() {
        "function_definition" => Some(NodeKind::FunctionDef(function_def(node, source))),
        "class_definition" => Some(NodeKind::TypeDef(TypeDef {
            name: field_text(node, "name", source),
            docstring: node
                .child_by_field_name("body")
                .and_then(|body| docstring_of(body, source)),
        })),
        "assignment" if node.child_by_field_name("type").is_none() => {
            let target = node
                .child_by_field_name("left")
                .filter(|left| left.kind() == "identifier")
                .map(|left| text_of(left, source).to_string());
            Some(NodeKind::Assignment(Assignment { target }))
        }
        "for_statement" | "while_statement" => Some(NodeKind::Loop),
        "if_statement" | "elif_clause" | "match_statement" => Some(NodeKind::Conditional),
        "call" => Some(NodeKind::Call),
        "comment" => Some(NodeKind::Comment),
        "string" | "concatenated_string" => {
            if let Some(text) = plain_string_text(node, source) {
                out.push(leaf(node, NodeKind::Literal(Literal { text })));
                return;
            }
            // f-string: the interpolations may hold calls
            None
        }
        "integer" | "float" => Some(NodeKind::Literal(Literal {
            text: text_of(node, source).replace('_', ""),
        })),
        "true" => Some(NodeKind::Literal(Literal {
            text: "True".to_string(),
        })),
        "false" => Some(NodeKind::Literal(Literal {
            text: "False".to_string(),
        })),
        _ => None,
    };

    let mut children = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        lower_into(child, source, &mut children);
    }

    match kind {
        Some(kind) => out.push(SyntaxNode {
            kind,
            line: node.start_position().row + 1,
            children,
        }),
        None => out.extend(children),
    }
}

fn leaf(node: Node, kind: NodeKind) -> SyntaxNode {
    SyntaxNode {
        kind,
        line: node.start_position().row + 1,
        children: Vec::new(),
    }
}

fn function_def(node: Node, source: &str) -> FunctionDef {
    let body = node.child_by_field_name("body");
    let mut cursor = node.walk();
    let is_async = node.children(&mut cursor).any(|c| c.kind() == "async");
    let (docstring, body_len, normalized_body) = match body {
        Some(body) => {
            let mut cursor = body.walk();
            let body_len = body
                .named_children(&mut cursor)
                .filter(|c| c.kind() != "comment")
                .count();
            (
                docstring_of(body, source),
                body_len,
                normalized_text(body, source),
            )
        }
        None => (None, 0, String::new()),
    };
    FunctionDef {
        name: field_text(node, "name", source),
        is_async,
        docstring,
        body_len,
        normalized_body,
    }
}

/// Docstring of a module or block: a leading plain string expression statement
fn docstring_of(container: Node, source: &str) -> Option<String> {
    let mut cursor = container.walk();
    let first = container
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment")?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let mut inner_cursor = first.walk();
    let exprs: Vec<Node> = first
        .named_children(&mut inner_cursor)
        .filter(|c| c.kind() != "comment")
        .collect();
    match exprs.as_slice() {
        [only] if matches!(only.kind(), "string" | "concatenated_string") => {
            plain_string_text(*only, source)
        }
        _ => None,
    }
}

/// Content of a string literal without quotes and prefixes; `None` for f-strings
fn plain_string_text(node: Node, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    match node.kind() {
        "concatenated_string" => {
            let mut text = String::new();
            for part in children {
                if part.kind() == "string" {
                    text.push_str(&plain_string_text(part, source)?);
                }
            }
            Some(text)
        }
        "string" => {
            let mut text = String::new();
            for part in children {
                match part.kind() {
                    "string_start" => {
                        let prefix = text_of(part, source);
                        if prefix.contains(['f', 'F']) {
                            return None;
                        }
                    }
                    "interpolation" => return None,
                    "string_content" => text.push_str(text_of(part, source)),
                    _ => {}
                }
            }
            Some(text)
        }
        _ => None,
    }
}

/// Source of `node` without comments, each line trimmed, blank lines dropped
fn normalized_text(node: Node, source: &str) -> String {
    let mut comments = Vec::new();
    collect_comment_ranges(node, &mut comments);

    let mut stripped = String::new();
    let mut pos = node.start_byte();
    for (start, end) in comments {
        if let Some(chunk) = source.get(pos..start) {
            stripped.push_str(chunk);
        }
        pos = end;
    }
    if let Some(chunk) = source.get(pos..node.end_byte()) {
        stripped.push_str(chunk);
    }

    stripped
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_comment_ranges(node: Node, out: &mut Vec<(usize, usize)>) {
    if node.kind() == "comment" {
        out.push((node.start_byte(), node.end_byte()));
        return;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_comment_ranges(child, out);
    }
}

fn field_text(node: Node, field: &str, source: &str) -> String {
    node.child_by_field_name(field)
        .map(|n| text_of(n, source).to_string())
        .unwrap_or_default()
}

fn text_of<'s>(node: Node, source: &'s str) -> &'s str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}
