use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use std::collections::HashSet;

/// The fields of a selection set with inline fragments and fragment spreads
/// expanded, in document order. Directives are not evaluated.
pub(crate) fn collect_root_fields<'a>(
    ctx: &VisitorContext<'a>,
    selection_set: &'a ast::SelectionSet,
) -> Vec<&'a ast::Field> {
    let mut fields = vec![];
    let mut visited = HashSet::new();
    collect_into(ctx, selection_set, &mut fields, &mut visited);
    fields
}

fn collect_into<'a>(
    ctx: &VisitorContext<'a>,
    selection_set: &'a ast::SelectionSet,
    fields: &mut Vec<&'a ast::Field>,
    visited: &mut HashSet<&'a str>,
) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => fields.push(field),
            ast::Selection::InlineFragment(inline) => {
                collect_into(ctx, &inline.selection_set, fields, visited)
            },
            ast::Selection::FragmentSpread(spread) => {
                if visited.insert(spread.name.as_str())
                    && let Some(fragment) = ctx.fragment(spread.name.as_str())
                {
                    collect_into(ctx, &fragment.selection_set, fields, visited);
                }
            },
        }
    }
}

/// The fragment spreads directly (not transitively) within a selection
/// set, including inside nested fields and inline fragments, in document
/// order.
pub(crate) fn fragment_spreads(selection_set: &ast::SelectionSet) -> Vec<&ast::FragmentSpread> {
    let mut spreads = vec![];
    spreads_into(selection_set, &mut spreads);
    spreads
}

fn spreads_into<'a>(selection_set: &'a ast::SelectionSet, spreads: &mut Vec<&'a ast::FragmentSpread>) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => {
                if let Some(nested) = &field.selection_set {
                    spreads_into(nested, spreads);
                }
            },
            ast::Selection::InlineFragment(inline) => spreads_into(&inline.selection_set, spreads),
            ast::Selection::FragmentSpread(spread) => spreads.push(spread),
        }
    }
}
