use crate::schema::DirectiveLocation;
use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

pub struct KnownDirectives;

impl<'a> Visitor<'a> for KnownDirectives {
    fn enter_directive(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        directive: &'a ast::DirectiveAnnotation,
        location: DirectiveLocation,
    ) {
        match ctx.schema.directive(directive.name.as_str()) {
            None => ctx.report_error(
                vec![directive.location()],
                format!("Unknown directive \"@{}\".", directive.name),
            ),
            Some(definition) if !definition.is_valid_at(location) => ctx.report_error(
                vec![directive.location()],
                format!("Directive \"@{}\" may not be used on {location}.", directive.name),
            ),
            Some(_) => (),
        }
    }
}
