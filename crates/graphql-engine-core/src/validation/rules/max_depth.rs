use crate::GraphQLError;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use std::collections::HashSet;

/// Reports every field nested deeper than `max_depth`. Root fields have
/// depth 1; fragments and inline fragments add no depth of their own.
pub(crate) fn check_max_depth(ctx: &VisitorContext<'_>, max_depth: usize) -> Vec<GraphQLError> {
    let mut errors = vec![];
    for operation in ctx.document.operations() {
        let mut checker = DepthChecker {
            ctx,
            max_depth,
            fragment_path: vec![],
            expanded: HashSet::new(),
            errors: &mut errors,
        };
        checker.check_selection_set(&operation.selection_set, 1);
    }
    errors
}

struct DepthChecker<'c, 'a> {
    ctx: &'c VisitorContext<'a>,
    max_depth: usize,
    fragment_path: Vec<&'a str>,
    /// A fragment expanded at a given depth reports the same fields every
    /// time, so each `(fragment, depth)` pair is walked once.
    expanded: HashSet<(&'a str, usize)>,
    errors: &'c mut Vec<GraphQLError>,
}

impl<'a> DepthChecker<'_, 'a> {
    fn check_selection_set(&mut self, selection_set: &'a ast::SelectionSet, depth: usize) {
        for selection in &selection_set.selections {
            match selection {
                ast::Selection::Field(field) => {
                    if depth > self.max_depth {
                        self.errors.push(
                            GraphQLError::new(format!(
                                "Field \"{}\" exceeds the maximum query depth of {}.",
                                field.name, self.max_depth,
                            ))
                            .with_location(field.location()),
                        );
                        continue;
                    }
                    if let Some(nested) = &field.selection_set {
                        self.check_selection_set(nested, depth + 1);
                    }
                },
                ast::Selection::InlineFragment(inline) => {
                    self.check_selection_set(&inline.selection_set, depth);
                },
                ast::Selection::FragmentSpread(spread) => {
                    let name = spread.name.as_str();
                    // Cycles are reported by their own rule.
                    if self.fragment_path.contains(&name)
                        || !self.expanded.insert((name, depth))
                    {
                        continue;
                    }
                    if let Some(fragment) = self.ctx.fragment(name) {
                        self.fragment_path.push(name);
                        self.check_selection_set(&fragment.selection_set, depth);
                        self.fragment_path.pop();
                    }
                },
            }
        }
    }
}
