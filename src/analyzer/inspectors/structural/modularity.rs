use super::parsed;
use crate::analyzer::inspectors::{CategoryOutcome, Inspector, Tally};
use crate::parser::{NodeKind, PythonSource, SyntaxNode};
use crate::Category;

const MAX_BODY_STATEMENTS: usize = 20;
const MAX_BRANCHING: usize = 3;
const MAX_CALLS: usize = 3;

/// Flags functions that are too long or seem to do several things at once
pub struct ModularityInspector;

impl<'a> Inspector<PythonSource<'a>> for ModularityInspector {
    fn name(&self) -> &'static str {
        "modularity"
    }

    fn category(&self) -> Category {
        Category::Modularity
    }

    fn inspect(&self, source: &PythonSource<'a>) -> CategoryOutcome {
        let module = match parsed(source) {
            Ok(module) => module,
            Err(degraded) => return degraded,
        };
        let mut tally = Tally::new(self.category());
        let mut any_function = false;

        for (node, def) in module.functions() {
            any_function = true;

            if def.body_len > MAX_BODY_STATEMENTS {
                tally.deduct(
                    5,
                    format!(
                        "Function `{}` is too long ({} lines). Consider breaking it down.",
                        def.name, def.body_len
                    ),
                );
            }

            let counts = SubtreeCounts::of(node);
            if counts.loops + counts.conditionals > MAX_BRANCHING && counts.calls > MAX_CALLS {
                tally.deduct(
                    5,
                    format!(
                        "Function `{}` seems to perform multiple tasks. Consider splitting it into separate functions.",
                        def.name
                    ),
                );
            }
        }

        if !any_function {
            return tally.finish("No functions defined; nothing to penalize for modularity.");
        }
        tally.finish("All functions are well-structured!")
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct SubtreeCounts {
    loops: usize,
    conditionals: usize,
    calls: usize,
}

impl SubtreeCounts {
    fn of(node: &SyntaxNode) -> Self {
        let mut counts = Self::default();
        for child in node.descendants() {
            match child.kind {
                NodeKind::Loop => counts.loops += 1,
                NodeKind::Conditional => counts.conditionals += 1,
                NodeKind::Call => counts.calls += 1,
                NodeKind::FunctionDef(_)
                | NodeKind::TypeDef(_)
                | NodeKind::Assignment(_)
                | NodeKind::Literal(_)
                | NodeKind::Comment => {}
            }
        }
        counts
    }
}
