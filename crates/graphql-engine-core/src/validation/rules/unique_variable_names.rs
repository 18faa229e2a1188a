use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use graphql_engine_parser::ast::AstPos;
use std::collections::HashMap;

#[derive(Default)]
pub struct UniqueVariableNames<'a> {
    names: HashMap<&'a str, AstPos>,
}

impl<'a> Visitor<'a> for UniqueVariableNames<'a> {
    fn enter_operation_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _operation: &'a ast::OperationDefinition,
    ) {
        self.names.clear();
    }

    fn enter_fragment_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _fragment: &'a ast::FragmentDefinition,
    ) {
        self.names.clear();
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a ast::VariableDefinition,
    ) {
        let name = variable_definition.variable.as_str();
        let location = variable_definition.variable.location();
        if let Some(first) = self.names.get(name) {
            ctx.report_error(
                vec![*first, location],
                format!("There can be only one variable named \"${name}\"."),
            );
        } else {
            self.names.insert(name, location);
        }
    }
}
