use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

/// Type conditions and variable types must name types the schema defines.
pub struct KnownTypeNames;

impl KnownTypeNames {
    fn check(ctx: &mut VisitorContext<'_>, name: &ast::Name) {
        if ctx.schema.get_type(name.as_str()).is_none() {
            ctx.report_error(vec![name.location()], format!("Unknown type \"{name}\"."));
        }
    }
}

impl<'a> Visitor<'a> for KnownTypeNames {
    fn enter_fragment_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        Self::check(ctx, &fragment.type_condition);
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        inline_fragment: &'a ast::InlineFragment,
    ) {
        if let Some(type_condition) = &inline_fragment.type_condition {
            Self::check(ctx, type_condition);
        }
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a ast::VariableDefinition,
    ) {
        Self::check(ctx, variable_definition.var_type.innermost_name());
    }
}
