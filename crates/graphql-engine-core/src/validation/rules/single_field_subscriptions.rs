use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use crate::validation::utils::collect_root_fields;
use graphql_engine_parser::ast;

/// A subscription selects exactly one root field, counting fields reached
/// through fragments.
pub struct SingleFieldSubscriptions;

impl<'a> Visitor<'a> for SingleFieldSubscriptions {
    fn enter_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        if operation.operation != ast::OperationKind::Subscription {
            return;
        }
        let root_fields = collect_root_fields(ctx, &operation.selection_set);
        if root_fields.len() > 1 {
            let message = match operation.name_str() {
                Some(name) => {
                    format!("Subscription \"{name}\" must select only one top level field.")
                },
                None => "Anonymous Subscription must select only one top level field.".to_string(),
            };
            ctx.report_error(
                root_fields.iter().skip(1).map(|field| field.location()).collect(),
                message,
            );
        }
    }
}
