use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

pub struct VariablesAreInputTypes;

impl<'a> Visitor<'a> for VariablesAreInputTypes {
    fn enter_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a ast::VariableDefinition,
    ) {
        let type_name = variable_definition.var_type.innermost_name();
        if let Some(ty) = ctx.schema.get_type(type_name.as_str())
            && !ty.is_input_type()
        {
            ctx.report_error(
                vec![variable_definition.var_type.location()],
                format!(
                    "Variable \"${}\" cannot be non-input type \"{}\".",
                    variable_definition.variable, variable_definition.var_type,
                ),
            );
        }
    }
}
