use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

pub struct UniqueDirectivesPerLocation;

impl UniqueDirectivesPerLocation {
    fn check(ctx: &mut VisitorContext<'_>, directives: &[ast::DirectiveAnnotation]) {
        for (idx, directive) in directives.iter().enumerate() {
            if let Some(first) = directives[..idx]
                .iter()
                .find(|prev| prev.name.as_str() == directive.name.as_str())
            {
                ctx.report_error(
                    vec![first.location(), directive.location()],
                    format!(
                        "The directive \"@{}\" can only be used once at this location.",
                        directive.name,
                    ),
                );
            }
        }
    }
}

impl<'a> Visitor<'a> for UniqueDirectivesPerLocation {
    fn enter_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        Self::check(ctx, &operation.directives);
    }

    fn enter_fragment_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        Self::check(ctx, &fragment.directives);
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a ast::VariableDefinition,
    ) {
        Self::check(ctx, &variable_definition.directives);
    }

    fn enter_field(&mut self, ctx: &mut VisitorContext<'a>, field: &'a ast::Field) {
        Self::check(ctx, &field.directives);
    }

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment_spread: &'a ast::FragmentSpread,
    ) {
        Self::check(ctx, &fragment_spread.directives);
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        inline_fragment: &'a ast::InlineFragment,
    ) {
        Self::check(ctx, &inline_fragment.directives);
    }
}
