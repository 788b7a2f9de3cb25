//! Parsers and text preparation for the supported languages

pub mod indentation;
pub mod lexical;
pub mod patterns;
pub mod python;
pub mod syntax;

pub use indentation::{scan_indentation, IndentationError};
pub use lexical::{CommentKind, JsComment, JsFunction, JsSource};
pub use patterns::{global_patterns, Patterns};
pub use python::{ParseFailure, ParseFailureKind, PythonParser, PythonSource};
pub use syntax::{Assignment, FunctionDef, Literal, Module, NodeKind, SyntaxNode, TypeDef};
