use crate::validation::rules::variable_usages::VariableUsages;
use crate::validation::visitor::VariableUsage;
use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use std::collections::HashSet;

#[derive(Default)]
pub struct NoUnusedVariables<'a> {
    usages: VariableUsages<'a>,
}

impl<'a> Visitor<'a> for NoUnusedVariables<'a> {
    fn enter_operation_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _operation: &'a ast::OperationDefinition,
    ) {
        self.usages.enter_operation();
    }

    fn enter_fragment_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        self.usages.enter_fragment(fragment);
    }

    fn enter_variable_usage(&mut self, _ctx: &mut VisitorContext<'a>, usage: &VariableUsage<'a>) {
        self.usages.record(usage);
    }

    fn exit_document(&mut self, ctx: &mut VisitorContext<'a>, doc: &'a ast::Document) {
        for (index, operation) in doc.operations().enumerate() {
            let used: HashSet<&str> = self
                .usages
                .for_operation(ctx, index, operation)
                .iter()
                .map(|usage| usage.name.as_str())
                .collect();
            for definition in &operation.variable_definitions {
                let name = definition.variable.as_str();
                if used.contains(name) {
                    continue;
                }
                let message = match &operation.name {
                    Some(op_name) => {
                        format!("Variable \"${name}\" is never used in operation \"{op_name}\".")
                    },
                    None => format!("Variable \"${name}\" is never used."),
                };
                ctx.report_error(vec![definition.location()], message);
            }
        }
    }
}
