use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

/// A fragment may only be spread where its type condition could apply.
pub struct PossibleFragmentSpreads;

impl<'a> Visitor<'a> for PossibleFragmentSpreads {
    fn enter_fragment_spread(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment_spread: &'a ast::FragmentSpread,
    ) {
        let Some(fragment) = ctx.fragment(fragment_spread.name.as_str()) else {
            return;
        };
        let Some(parent_type) = ctx.current_type() else {
            return;
        };
        let Some(fragment_type) = ctx.schema.get_type(fragment.type_condition.as_str()) else {
            return;
        };
        if parent_type.is_composite()
            && fragment_type.is_composite()
            && !ctx.schema.types_overlap(parent_type.name(), fragment_type.name())
        {
            ctx.report_error(
                vec![fragment_spread.location()],
                format!(
                    "Fragment \"{}\" cannot be spread here as objects of type \"{}\" can never \
                     be of type \"{}\".",
                    fragment_spread.name,
                    parent_type.name(),
                    fragment_type.name(),
                ),
            );
        }
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        inline_fragment: &'a ast::InlineFragment,
    ) {
        if inline_fragment.type_condition.is_none() {
            return;
        }
        let (Some(parent_type), Some(fragment_type)) = (ctx.parent_type(), ctx.current_type())
        else {
            return;
        };
        if parent_type.is_composite()
            && fragment_type.is_composite()
            && !ctx.schema.types_overlap(parent_type.name(), fragment_type.name())
        {
            ctx.report_error(
                vec![inline_fragment.location()],
                format!(
                    "Fragment cannot be spread here as objects of type \"{}\" can never be of \
                     type \"{}\".",
                    parent_type.name(),
                    fragment_type.name(),
                ),
            );
        }
    }
}
