use crate::validation::utils::fragment_spreads;
use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use std::collections::HashSet;

/// Every fragment must be reachable from some operation.
pub struct NoUnusedFragments;

impl<'a> Visitor<'a> for NoUnusedFragments {
    fn exit_document(&mut self, ctx: &mut VisitorContext<'a>, doc: &'a ast::Document) {
        let mut reachable: HashSet<&str> = HashSet::new();
        let mut pending: Vec<&ast::FragmentSpread> = doc
            .operations()
            .flat_map(|operation| fragment_spreads(&operation.selection_set))
            .collect();
        while let Some(spread) = pending.pop() {
            if reachable.insert(spread.name.as_str())
                && let Some(fragment) = ctx.fragment(spread.name.as_str())
            {
                pending.extend(fragment_spreads(&fragment.selection_set));
            }
        }

        for fragment in doc.fragments() {
            if !reachable.contains(fragment.name.as_str()) {
                ctx.report_error(
                    vec![fragment.location()],
                    format!("Fragment \"{}\" is never used.", fragment.name),
                );
            }
        }
    }
}
