use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

/// The schema must define a root type for each operation kind used.
pub struct KnownOperationTypes;

impl<'a> Visitor<'a> for KnownOperationTypes {
    fn enter_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        if ctx.schema.root_type(operation.operation).is_none() {
            ctx.report_error(
                vec![operation.location()],
                format!("Schema is not configured for {}s.", operation.operation),
            );
        }
    }
}
