use crate::coercion::Variables;
use crate::coercion::coerce_literal;
use crate::schema::TypeRef;
use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

/// Variable defaults must be valid values of the variable's type.
pub struct DefaultValuesOfCorrectType;

impl<'a> Visitor<'a> for DefaultValuesOfCorrectType {
    fn enter_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a ast::VariableDefinition,
    ) {
        let Some(default) = &variable_definition.default_value else {
            return;
        };
        let ty = TypeRef::from_ast(&variable_definition.var_type);
        if !ctx
            .schema
            .get_type(ty.innermost_name())
            .is_some_and(|named| named.is_input_type())
        {
            // Unknown and non-input types are reported elsewhere.
            return;
        }
        let name = variable_definition.variable.as_str();
        if let Err(err) = coerce_literal(
            ctx.schema,
            &ty,
            default,
            Some(&Variables::new()),
            &format!("${name}"),
        ) {
            ctx.report_error(
                vec![default.location()],
                format!("Variable \"${name}\" has invalid default value {default}: {err}"),
            );
        }
    }
}
