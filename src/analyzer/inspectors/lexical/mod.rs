//! Inspectors for the lexical (pattern based) variant. None of them needs
//! a parse, so none of them degrades.

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

use super::Inspector;
use crate::parser::JsSource;

/// All lexical inspectors, in category order
pub fn inspectors<'a>() -> Vec<Box<dyn Inspector<JsSource<'a>>>> {
    vec![
        Box::new(NamingInspector),
        Box::new(ModularityInspector),
        Box::new(DocumentationInspector),
        Box::new(FormattingInspector),
        Box::new(ReusabilityInspector),
        Box::new(BestPracticesInspector),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    #[test]
    fn test_inspectors_in_category_order() {
        let categories: Vec<Category> = inspectors().iter().map(|i| i.category()).collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }
}
