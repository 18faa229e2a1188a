use crate::schema::Schema;
use crate::schema::TypeRef;
use crate::validation::rules::variable_usages::VariableUsages;
use crate::validation::visitor::VariableUsage;
use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use std::collections::HashMap;

/// A variable's declared type must fit every position it is used in. A
/// nullable variable may fill a non-null position only when the variable or
/// the position has a default value.
#[derive(Default)]
pub struct VariablesInAllowedPosition<'a> {
    usages: VariableUsages<'a>,
}

fn is_allowed(
    schema: &Schema,
    variable_type: &TypeRef,
    variable_has_default: bool,
    expected_type: &TypeRef,
    location_has_default: bool,
) -> bool {
    if expected_type.is_non_null() && !variable_type.is_non_null() {
        if !variable_has_default && !location_has_default {
            return false;
        }
        return schema.is_type_sub_type_of(variable_type, expected_type.nullable());
    }
    schema.is_type_sub_type_of(variable_type, expected_type)
}

impl<'a> Visitor<'a> for VariablesInAllowedPosition<'a> {
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
            let definitions: HashMap<&str, &ast::VariableDefinition> = operation
                .variable_definitions
                .iter()
                .map(|def| (def.variable.as_str(), def))
                .collect();
            for usage in self.usages.for_operation(ctx, index, operation) {
                let (Some(definition), Some(expected_type)) =
                    (definitions.get(usage.name.as_str()), usage.expected_type)
                else {
                    continue;
                };
                let variable_type = TypeRef::from_ast(&definition.var_type);
                let variable_has_default = definition
                    .default_value
                    .as_ref()
                    .is_some_and(|value| !matches!(value, ast::Value::Null { .. }));
                if !is_allowed(
                    ctx.schema,
                    &variable_type,
                    variable_has_default,
                    expected_type,
                    usage.location_has_default,
                ) {
                    ctx.report_error(
                        vec![definition.location(), usage.name.location()],
                        format!(
                            "Variable \"${}\" of type \"{variable_type}\" used in position \
                             expecting type \"{expected_type}\".",
                            usage.name,
                        ),
                    );
                }
            }
        }
    }
}
