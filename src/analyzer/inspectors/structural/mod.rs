//! Inspectors for the structural (syntax-tree based) variant

mod best_practices;
mod documentation;
mod formatting;
mod modularity;
mod naming;
mod reusability;

pub use best_practices::BestPracticesInspector;
pub use documentation::DocumentationInspector;
pub use formatting::FormattingInspector;
pub use modularity::ModularityInspector;
pub use naming::NamingInspector;
pub use reusability::ReusabilityInspector;

use super::{CategoryOutcome, Inspector};
use crate::parser::{Module, PythonSource};

/// All structural inspectors, in category order
pub fn inspectors<'a>() -> Vec<Box<dyn Inspector<PythonSource<'a>>>> {
    vec![
        Box::new(NamingInspector),
        Box::new(ModularityInspector),
        Box::new(DocumentationInspector),
        Box::new(FormattingInspector),
        Box::new(ReusabilityInspector),
        Box::new(BestPracticesInspector),
    ]
}

/// The lowered module, or the degraded outcome for a source that did not parse
fn parsed<'s>(source: &'s PythonSource<'_>) -> Result<&'s Module, CategoryOutcome> {
    source
        .module
        .as_ref()
        .map_err(|failure| CategoryOutcome::Degraded {
            diagnostic: failure.to_string(),
        })
}
