use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

/// An unnamed operation must be the only operation in its document.
#[derive(Default)]
pub struct LoneAnonymousOperation {
    operation_count: usize,
}

impl<'a> Visitor<'a> for LoneAnonymousOperation {
    fn enter_document(&mut self, _ctx: &mut VisitorContext<'a>, doc: &'a ast::Document) {
        self.operation_count = doc.operations().count();
    }

    fn enter_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        if operation.name.is_none() && self.operation_count > 1 {
            ctx.report_error(
                vec![operation.location()],
                "This anonymous operation must be the only defined operation.",
            );
        }
    }
}
