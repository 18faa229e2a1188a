use crate::validation::rules::variable_usages::VariableUsages;
use crate::validation::visitor::VariableUsage;
use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use std::collections::HashSet;

/// Every variable used by an operation (directly or through fragments) is
/// defined by that operation.
#[derive(Default)]
pub struct NoUndefinedVariables<'a> {
    usages: VariableUsages<'a>,
}

impl<'a> Visitor<'a> for NoUndefinedVariables<'a> {
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
            let defined: HashSet<&str> = operation
                .variable_definitions
                .iter()
                .map(|def| def.variable.as_str())
                .collect();
            let mut reported = HashSet::new();
            for usage in self.usages.for_operation(ctx, index, operation) {
                let name = usage.name.as_str();
                if defined.contains(name) || !reported.insert(name) {
                    continue;
                }
                let message = match &operation.name {
                    Some(op_name) => {
                        format!("Variable \"${name}\" is not defined by operation \"{op_name}\".")
                    },
                    None => format!("Variable \"${name}\" is not defined."),
                };
                ctx.report_error(vec![usage.name.location(), operation.location()], message);
            }
        }
    }
}
