use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;

/// Leaf fields take no selection set; composite fields require one.
pub struct ScalarLeafs;

impl<'a> Visitor<'a> for ScalarLeafs {
    fn enter_field(&mut self, ctx: &mut VisitorContext<'a>, field: &'a ast::Field) {
        let Some(field_type) = ctx.current_type() else {
            return;
        };
        let declared_type = ctx
            .parent_type()
            .and_then(|parent| parent.fields())
            .and_then(|fields| fields.get(field.name.as_str()))
            .map_or_else(|| field_type.name().to_string(), |def| def.ty.to_string());

        if field_type.is_leaf() {
            if let Some(selection_set) = &field.selection_set {
                ctx.report_error(
                    vec![selection_set.location()],
                    format!(
                        "Field \"{}\" must not have a selection since type \"{declared_type}\" \
                         has no subfields.",
                        field.name,
                    ),
                );
            }
        } else if field_type.is_composite() && field.selection_set.is_none() {
            ctx.report_error(
                vec![field.location()],
                format!(
                    "Field \"{}\" of type \"{declared_type}\" must have a selection of \
                     subfields. Did you mean \"{} {{ ... }}\"?",
                    field.name, field.name,
                ),
            );
        }
    }
}
