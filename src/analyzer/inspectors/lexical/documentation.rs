use crate::analyzer::inspectors::{CategoryOutcome, Inspector, Tally};
use crate::parser::{global_patterns, CommentKind, JsSource};
use crate::Category;

/// Scripts without functions need at least this many `//` comments
const MIN_SCRIPT_COMMENTS: usize = 5;

/// JSDoc blocks per function and `//` comments per function
pub struct DocumentationInspector;

impl<'a> Inspector<JsSource<'a>> for DocumentationInspector {
    fn name(&self) -> &'static str {
        "documentation"
    }

    fn category(&self) -> Category {
        Category::Documentation
    }

    fn inspect(&self, source: &JsSource<'a>) -> CategoryOutcome {
        let functions = global_patterns()
            .js_function_name
            .find_iter(&source.code)
            .count();
        let doc_blocks = source.count_comments(CommentKind::Doc);
        let line_comments = source.count_comments(CommentKind::Line);
        let mut tally = Tally::new(self.category());

        if functions > 0 {
            if doc_blocks < functions {
                tally.deduct(
                    10,
                    format!(
                        "{} function(s) lack documentation (JSDoc comments).",
                        functions - doc_blocks
                    ),
                );
            }
            if line_comments < functions {
                tally.deduct(5, "Not enough inline comments for clarity.");
            }
        } else if line_comments < MIN_SCRIPT_COMMENTS {
            tally.deduct(
                10,
                "Few or no comments found in the script. Consider adding documentation.",
            );
        }

        tally.finish("Good documentation and comments present!")
    }
}
