use crate::schema::GraphQLType;
use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

pub struct FieldsOnCorrectType;

impl<'a> Visitor<'a> for FieldsOnCorrectType {
    fn enter_field(&mut self, ctx: &mut VisitorContext<'a>, field: &'a ast::Field) {
        let Some(parent_type) = ctx.parent_type() else {
            return;
        };
        if field.name.as_str() == "__typename" || !parent_type.is_composite() {
            return;
        }
        let defined = match parent_type {
            GraphQLType::Object(_) | GraphQLType::Interface(_) => parent_type
                .fields()
                .is_some_and(|fields| fields.contains_key(field.name.as_str())),
            _ => false,
        };
        if !defined {
            ctx.report_error(
                vec![field.location()],
                format!(
                    "Cannot query field \"{}\" on type \"{}\".",
                    field.name,
                    parent_type.name(),
                ),
            );
        }
    }
}
