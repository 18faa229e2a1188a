use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

pub struct KnownFragmentNames;

impl<'a> Visitor<'a> for KnownFragmentNames {
    fn enter_fragment_spread(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment_spread: &'a ast::FragmentSpread,
    ) {
        if ctx.fragment(fragment_spread.name.as_str()).is_none() {
            ctx.report_error(
                vec![fragment_spread.name.location()],
                format!("Unknown fragment \"{}\".", fragment_spread.name),
            );
        }
    }
}
