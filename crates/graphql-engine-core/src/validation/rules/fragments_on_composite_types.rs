use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

pub struct FragmentsOnCompositeTypes;

impl<'a> Visitor<'a> for FragmentsOnCompositeTypes {
    fn enter_fragment_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        if let Some(condition) = ctx.schema.get_type(fragment.type_condition.as_str())
            && !condition.is_composite()
        {
            ctx.report_error(
                vec![fragment.type_condition.location()],
                format!(
                    "Fragment \"{}\" cannot condition on non composite type \"{}\".",
                    fragment.name, fragment.type_condition,
                ),
            );
        }
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        inline_fragment: &'a ast::InlineFragment,
    ) {
        if let Some(type_condition) = &inline_fragment.type_condition
            && let Some(current_type) = ctx.current_type()
            && !current_type.is_composite()
        {
            ctx.report_error(
                vec![type_condition.location()],
                format!("Fragment cannot condition on non composite type \"{type_condition}\"."),
            );
        }
    }
}
