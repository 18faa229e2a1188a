use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use graphql_engine_parser::ast::AstPos;
use std::collections::HashMap;

#[derive(Default)]
pub struct UniqueOperationNames<'a> {
    names: HashMap<&'a str, AstPos>,
}

impl<'a> Visitor<'a> for UniqueOperationNames<'a> {
    fn enter_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        let Some(name) = &operation.name else {
            return;
        };
        match self.names.get(name.as_str()) {
            Some(first) => ctx.report_error(
                vec![*first, name.location()],
                format!("There can be only one operation named \"{name}\"."),
            ),
            None => {
                self.names.insert(name.as_str(), name.location());
            },
        }
    }
}
